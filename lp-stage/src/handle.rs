//! The per-stage public contract (spec §4.4): `init`, `place_work`,
//! `attach`, `wait_finished`, `fini`.
//!
//! Generalized, per spec §9's design note, to an instantiable object
//! rather than a process-wide singleton: the orchestrator in
//! `pipeline::orchestrator` owns a `Vec<StageHandle>` instead of the C
//! original's fixed five-symbol-per-dynamically-loaded-image surface.
//! Grounded on `libmem::module::single_level::SingleLevel`'s shape (a
//! struct wrapping inner resources behind a small, validated public API)
//! and on `seis-bench::bench::BenchmarkHelper::join`'s join-exactly-once
//! idiom.

use crate::transform::Transform;
use crate::worker;
use lp_core::{item::Item, Error};
use lp_queue::queue::{BoundedQueue, PutError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle, ThreadId};

/// The downstream hook: a plain function reference to the next stage's
/// enqueue operation, per spec §3's "Stage context" ("a downstream hook
/// (optional function reference to the next stage's place-work)").
pub type Downstream = Arc<dyn Fn(Item) -> Result<(), Error> + Send + Sync>;

struct Inner {
    queue: Arc<BoundedQueue<Item>>,
    downstream: Arc<Mutex<Option<Downstream>>>,
    attached: bool,
    finished: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    worker_thread: ThreadId,
}

/// A single stage's queue, worker thread, and lifecycle state.
///
/// State machine (spec §4.4):
///
/// ```text
/// UNINIT ──init──▶ READY ──attach──▶ WIRED
///                    │                 │
///               place_work*       place_work*
///                                      │
///                                 <END> observed
///                                      ▼
///                                  FINISHED ──fini──▶ UNINIT
/// ```
pub struct StageHandle {
    name: String,
    inner: Option<Inner>,
}

impl StageHandle {
    /// Creates an uninitialized stage handle with the given name.
    ///
    /// The name is borrowed read-only by diagnostics for the handle's
    /// entire lifetime, per spec §3's "Stage context" attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: None,
        }
    }

    /// The stage's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Constructs the stage's queue and starts its worker thread.
    pub fn init(&mut self, queue_capacity: usize, transform: Box<dyn Transform>) -> Result<(), Error> {
        if self.inner.is_some() {
            return Err(Error::AlreadyInitialized);
        }
        if self.name.is_empty() {
            return Err(Error::InvalidName);
        }
        if queue_capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        let queue = Arc::new(BoundedQueue::new(queue_capacity).map_err(|_| Error::InvalidCapacity)?);
        let downstream: Arc<Mutex<Option<Downstream>>> = Arc::new(Mutex::new(None));
        let finished = Arc::new(AtomicBool::new(false));

        let worker_queue = queue.clone();
        let worker_downstream = downstream.clone();
        let worker_finished = finished.clone();
        let worker_name = self.name.clone();

        let handle = thread::Builder::new()
            .name(self.name.clone())
            .spawn(move || {
                worker::run(
                    &worker_name,
                    &worker_queue,
                    transform.as_ref(),
                    &worker_downstream,
                    &worker_finished,
                );
            })
            .map_err(|_| Error::ThreadStartFailed)?;
        let worker_thread = handle.thread().id();

        self.inner = Some(Inner {
            queue,
            downstream,
            attached: false,
            finished,
            worker: Some(handle),
            worker_thread,
        });
        Ok(())
    }

    /// Duplicates `item` is unnecessary in Rust (the caller already hands
    /// over ownership), then enqueues it.
    pub fn place_work(&self, item: Item) -> Result<(), Error> {
        let inner = self.inner.as_ref().ok_or(Error::NotInitialized)?;
        inner
            .queue
            .put(item)
            .map_err(|PutError { error, .. }| error)
    }

    /// Builds a [`Downstream`] hook pointing at this stage's `place_work`,
    /// for a predecessor to [`attach`](Self::attach).
    pub fn place_work_fn(&self) -> Result<Downstream, Error> {
        let inner = self.inner.as_ref().ok_or(Error::NotInitialized)?;
        let queue = inner.queue.clone();
        Ok(Arc::new(move |item: Item| {
            queue.put(item).map_err(|PutError { error, .. }| error)
        }))
    }

    /// Records the downstream hook. `None` marks this stage terminal.
    ///
    /// Rejects if called before `init`, after the stage has finished, or
    /// more than once.
    pub fn attach(&mut self, next: Option<Downstream>) -> Result<(), Error> {
        let inner = self.inner.as_mut().ok_or(Error::NotInitialized)?;
        if inner.finished.load(Ordering::SeqCst) {
            return Err(Error::InternalError(format!(
                "{}: attach called after stage finished",
                self.name
            )));
        }
        if inner.attached {
            return Err(Error::InternalError(format!(
                "{}: attach called more than once",
                self.name
            )));
        }
        *inner.downstream.lock().unwrap_or_else(|p| p.into_inner()) = next;
        inner.attached = true;
        Ok(())
    }

    /// Marks the stage's queue finished without going through the normal
    /// sentinel path.
    ///
    /// A stage that was `init`ed but never wired into a run that reaches
    /// completion (e.g. a sibling stage failed to `init` or `attach`) has
    /// a worker idling in `queue.get()` that will never see `<END>`, so
    /// its `finished` flag never becomes true and [`wait_finished`] (and
    /// therefore [`fini`](Self::fini)) would block forever. Calling
    /// `cancel` first wakes that worker with [`GetResult::EndOfStream`],
    /// which ends its loop without forwarding anything downstream, so
    /// `fini` can proceed. Idempotent; a no-op on a stage that already
    /// finished normally.
    ///
    /// [`wait_finished`]: Self::wait_finished
    pub fn cancel(&self) -> Result<(), Error> {
        let inner = self.inner.as_ref().ok_or(Error::NotInitialized)?;
        inner.queue.signal_finished();
        Ok(())
    }

    /// Blocks until this stage's queue has been finished and drained.
    /// Idempotent.
    pub fn wait_finished(&self) -> Result<(), Error> {
        let inner = self.inner.as_ref().ok_or(Error::NotInitialized)?;
        inner.queue.wait_finished().map_err(|_| Error::QueueWaitFailed)
    }

    /// Drains, joins the worker exactly once, and resets to uninitialized.
    ///
    /// Guards against being called from the worker's own thread (which
    /// would deadlock joining itself), returning [`Error::CannotJoinSelf`]
    /// without disturbing the handle's state. A second call, after a
    /// successful `fini`, returns [`Error::NotInitialized`].
    pub fn fini(&mut self) -> Result<(), Error> {
        if let Some(inner) = &self.inner {
            if inner.worker_thread == thread::current().id() {
                return Err(Error::CannotJoinSelf);
            }
        }
        let mut inner = self.inner.take().ok_or(Error::NotInitialized)?;
        inner.queue.wait_finished().map_err(|_| Error::QueueWaitFailed)?;
        if let Some(handle) = inner.worker.take() {
            let _ = handle.join();
        }
        // `inner.queue` drops here, releasing any still-resident items
        // (none, in a well-formed run that reached FINISHED).
        Ok(())
    }

    /// True once the worker has observed the sentinel.
    pub fn is_finished(&self) -> bool {
        self.inner
            .as_ref()
            .map(|inner| inner.finished.load(Ordering::SeqCst))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::Error as E;

    #[derive(Debug)]
    struct Upper;
    impl Transform for Upper {
        fn apply(&self, input: Vec<u8>) -> Result<Vec<u8>, Error> {
            Ok(input.to_ascii_uppercase())
        }
        fn name(&self) -> &str {
            "upper"
        }
    }

    #[test]
    fn double_init_is_rejected() {
        let mut stage = StageHandle::new("a");
        stage.init(4, Box::new(Upper)).unwrap();
        assert!(matches!(stage.init(4, Box::new(Upper)), Err(E::AlreadyInitialized)));
        stage.place_work(Item::End).unwrap();
        stage.wait_finished().unwrap();
        stage.fini().unwrap();
    }

    #[test]
    fn operations_before_init_are_rejected() {
        let stage = StageHandle::new("a");
        assert!(matches!(stage.place_work(Item::End), Err(E::NotInitialized)));
        assert!(matches!(stage.wait_finished(), Err(E::NotInitialized)));
    }

    #[test]
    fn double_attach_is_rejected() {
        let mut stage = StageHandle::new("a");
        stage.init(4, Box::new(Upper)).unwrap();
        stage.attach(None).unwrap();
        assert!(stage.attach(None).is_err());
        stage.place_work(Item::End).unwrap();
        stage.wait_finished().unwrap();
        stage.fini().unwrap();
    }

    #[test]
    fn fini_twice_is_rejected() {
        let mut stage = StageHandle::new("a");
        stage.init(4, Box::new(Upper)).unwrap();
        stage.attach(None).unwrap();
        stage.place_work(Item::End).unwrap();
        stage.wait_finished().unwrap();
        stage.fini().unwrap();
        assert!(matches!(stage.fini(), Err(E::NotInitialized)));
    }

    #[test]
    fn cancel_unblocks_wait_finished_for_a_stage_never_fed_a_sentinel() {
        let mut stage = StageHandle::new("a");
        stage.init(4, Box::new(Upper)).unwrap();
        stage.attach(None).unwrap();
        // No place_work calls at all: the worker is idling in queue.get().
        stage.cancel().unwrap();
        stage.wait_finished().unwrap();
        stage.fini().unwrap();
    }

    #[test]
    fn cancel_is_a_no_op_after_normal_finish() {
        let mut stage = StageHandle::new("a");
        stage.init(4, Box::new(Upper)).unwrap();
        stage.attach(None).unwrap();
        stage.place_work(Item::End).unwrap();
        stage.wait_finished().unwrap();
        stage.cancel().unwrap();
        stage.fini().unwrap();
    }

    #[test]
    fn end_to_end_single_stage_forwards_to_terminal() {
        let mut stage = StageHandle::new("upper");
        stage.init(4, Box::new(Upper)).unwrap();
        stage.attach(None).unwrap();
        stage.place_work(Item::Data(b"hi".to_vec())).unwrap();
        stage.place_work(Item::End).unwrap();
        stage.wait_finished().unwrap();
        assert!(stage.is_finished());
        stage.fini().unwrap();
    }
}
