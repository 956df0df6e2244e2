//! The per-stage worker thread loop (spec §4.3).
//!
//! Grounded on `seis-bench::bench::BenchmarkHelper`: one dedicated thread
//! per unit of concurrent work, reporting its lifecycle transition (there,
//! `State::Started`/`State::Finished` over an `mpsc` channel; here, the
//! stage's `finished` flag plus the queue's own `finished` signal) back to
//! whatever is watching.
//!
//! Rust's move semantics collapse spec §4.3's identity-vs-new-buffer
//! ownership table into nothing the worker needs to track explicitly:
//! [`Transform::apply`] consumes the input `Vec<u8>` by value, so by the
//! time the worker holds the result there is exactly one buffer in scope,
//! whether the transform mutated in place or allocated fresh. Forwarding
//! moves that one buffer into the downstream queue; not forwarding lets it
//! drop at the end of the loop iteration. No manual release bookkeeping is
//! needed either way.

use crate::transform::Transform;
use crate::handle::Downstream;
use lp_core::log::log_error;
use lp_core::{item::Item, Error};
use lp_queue::queue::{BoundedQueue, GetResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Runs the worker loop until the sentinel is observed or the queue ends.
///
/// `finished` is set to `true` exactly when the sentinel is observed,
/// matching the stage state machine's `WIRED -> FINISHED` transition in
/// spec §4.4 (driven by the worker, not by an external call).
pub fn run(
    name: &str,
    queue: &BoundedQueue<Item>,
    transform: &dyn Transform,
    downstream: &Mutex<Option<Downstream>>,
    finished: &AtomicBool,
) {
    loop {
        let item = match queue.get() {
            GetResult::Item(item) => item,
            // Only reachable if the queue was finished by something other
            // than this worker observing the sentinel; the standard
            // shutdown path exits via the sentinel branch below.
            GetResult::EndOfStream => break,
        };

        if item.is_end() {
            forward_sentinel(name, downstream);
            finished.store(true, Ordering::SeqCst);
            queue.signal_finished();
            break;
        }

        let bytes = item
            .into_bytes()
            .expect("is_end() was false, so this item carries bytes");

        match transform.apply(bytes) {
            Ok(result) => forward_data(name, downstream, result),
            Err(e) => log_error(name, format!("transform failed: {e}")),
        }
    }
}

fn forward_sentinel(name: &str, downstream: &Mutex<Option<Downstream>>) {
    let guard = downstream.lock().unwrap_or_else(|p| p.into_inner());
    if let Some(place_work) = guard.as_ref() {
        if let Err(e) = place_work(Item::End) {
            log_error(name, format!("failed to forward sentinel: {e}"));
        }
    }
}

fn forward_data(name: &str, downstream: &Mutex<Option<Downstream>>, result: Vec<u8>) {
    let guard = downstream.lock().unwrap_or_else(|p| p.into_inner());
    match guard.as_ref() {
        Some(place_work) => {
            if let Err(e) = place_work(Item::Data(result)) {
                log_error(name, format!("failed to forward item: {e}"));
            }
        }
        // Terminal stage: the transform already performed its side effect
        // (spec §9's "side effects live in the transform, not the
        // worker"); the result is simply dropped here.
        None => drop(result),
    }
}

