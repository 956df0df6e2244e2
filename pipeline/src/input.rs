//! The main thread's stdin feed loop (spec §4.5 step 4, "Feed").
//!
//! Runs on the caller's own thread rather than a dedicated one: the
//! orchestrator already has one thread per stage doing the concurrent
//! work, and spec §4.5 has the driver itself pump input rather than hand
//! that job to yet another thread.

use lp_core::item::Item;
use lp_core::Error;
use std::io::BufRead;

/// Reads lines from `input` and hands each one, classified via
/// [`Item::from_line`], to `place_work`.
///
/// Strips a trailing `\n` and an optional preceding `\r` from each line.
/// Forwards the sentinel at most once: once a line classifies as
/// [`Item::End`], it is placed and reading stops immediately, leaving
/// any remaining bytes on `input` unconsumed.
///
/// `place_work` errors are logged and do not stop the feed (spec §4.5:
/// "On place-work errors, log and continue — the pipeline stays up.").
pub fn feed<R, F>(input: R, mut place_work: F) -> Result<(), Error>
where
    R: BufRead,
    F: FnMut(Item) -> Result<(), Error>,
{
    for line in input.split(b'\n') {
        let mut bytes = line.map_err(|e| Error::ArgError(format!("stdin read failed: {e}")))?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        let item = Item::from_line(bytes);
        let is_end = item.is_end();
        if let Err(e) = place_work(item) {
            lp_core::log::log_error("input", format!("place_work failed: {e}"));
        }
        if is_end {
            break;
        }
    }
    Ok(())
}
