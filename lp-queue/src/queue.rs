//! The fixed-capacity, blocking, FIFO item queue.

use lp_core::Error;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

struct Inner<T> {
    buffer: VecDeque<T>,
    finished: bool,
}

/// The result of a successful [`BoundedQueue::get`].
pub enum GetResult<T> {
    /// The next item in FIFO order.
    Item(T),
    /// The queue is finished and drained; no further items will arrive.
    EndOfStream,
}

/// An item that a failed [`BoundedQueue::put`] hands back to the caller,
/// alongside the reason it could not be enqueued.
///
/// The caller retains ownership of `item` on failure, per spec §4.2: a
/// rejected `put` must not leak or silently drop its argument.
pub struct PutError<T> {
    /// The item the caller still owns.
    pub item: T,
    /// Why the put failed.
    pub error: Error,
}

/// A fixed-capacity FIFO of owned items with blocking put/get and a
/// terminal "finished" phase.
///
/// A single [`Mutex`] guards `buffer` and `finished`. Two [`Condvar`]s
/// (`not_full`, `not_empty`) and a third (`drained`) play the role of the
/// three named monitor collaborators in spec §4.2 — implemented as bare
/// condition variables sharing the queue's own mutex rather than as
/// separate [`Monitor`](crate::monitor::Monitor) instances, per the
/// generalization spec §9 explicitly allows ("store the state in the
/// queue itself... using bare condition variables").
///
/// Destruction releases every resident item automatically: dropping a
/// `BoundedQueue<T>` drops its `VecDeque<T>`, which drops each `T` exactly
/// once. There is no manual `destroy` call in this implementation — Rust's
/// ownership model makes the C original's explicit free-on-destroy a
/// no-op to express.
pub struct BoundedQueue<T> {
    capacity: usize,
    inner: Mutex<Inner<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    drained: Condvar,
}

impl<T> BoundedQueue<T> {
    /// Creates a queue with room for `capacity` resident items.
    ///
    /// Fails with [`Error::QueueBadCapacity`] if `capacity == 0`.
    pub fn new(capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::QueueBadCapacity);
        }
        Ok(Self {
            capacity,
            inner: Mutex::new(Inner {
                buffer: VecDeque::with_capacity(capacity),
                finished: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            drained: Condvar::new(),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueues `item`, blocking while the queue is full and not finished.
    ///
    /// A put that is already blocked when [`signal_finished`](Self::signal_finished)
    /// is called is allowed to complete once space frees up; only a put
    /// that has not yet observed a rejection and *starts* after `finished`
    /// is already set is refused immediately with [`Error::QueueFinished`],
    /// per spec §4.2.
    pub fn put(&self, item: T) -> Result<(), PutError<T>> {
        let mut guard = self.lock();
        if guard.finished {
            return Err(PutError {
                item,
                error: Error::QueueFinished,
            });
        }
        loop {
            if guard.buffer.len() < self.capacity {
                guard.buffer.push_back(item);
                drop(guard);
                self.not_empty.notify_one();
                return Ok(());
            }
            guard = self
                .not_full
                .wait(guard)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Dequeues the next item in FIFO order, blocking while the queue is
    /// empty and not finished.
    ///
    /// Returns [`GetResult::EndOfStream`] iff the queue is empty and
    /// finished. A get that empties the queue while finished notifies
    /// [`wait_finished`](Self::wait_finished) waiters.
    pub fn get(&self) -> GetResult<T> {
        let mut guard = self.lock();
        loop {
            if let Some(item) = guard.buffer.pop_front() {
                let drained = guard.buffer.is_empty() && guard.finished;
                drop(guard);
                self.not_full.notify_one();
                if drained {
                    self.drained.notify_all();
                }
                return GetResult::Item(item);
            }
            if guard.finished {
                return GetResult::EndOfStream;
            }
            guard = self
                .not_empty
                .wait(guard)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Marks the queue finished. Idempotent: signalling twice has the same
    /// observable effect as once. Wakes every consumer blocked in `get`
    /// (so they can observe end-of-stream) and every waiter in
    /// `wait_finished`. Rejects subsequent fresh `put` calls.
    pub fn signal_finished(&self) {
        let mut guard = self.lock();
        guard.finished = true;
        drop(guard);
        self.not_empty.notify_all();
        self.drained.notify_all();
    }

    /// Blocks until the queue is finished and empty.
    pub fn wait_finished(&self) -> Result<(), Error> {
        let guard = self.lock();
        let _guard = self
            .drained
            .wait_while(guard, |inner| !(inner.finished && inner.buffer.is_empty()))
            .map_err(|_| Error::QueueInternal)?;
        Ok(())
    }

    /// The number of items currently resident, without blocking.
    pub fn len(&self) -> usize {
        self.lock().buffer.len()
    }

    /// True if the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The fixed capacity this queue was constructed with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True once [`signal_finished`](Self::signal_finished) has been
    /// called, without blocking.
    pub fn is_finished(&self) -> bool {
        self.lock().finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            BoundedQueue::<u8>::new(0),
            Err(Error::QueueBadCapacity)
        ));
    }

    #[test]
    fn fifo_single_producer() {
        let queue = BoundedQueue::new(4).unwrap();
        for i in 0..4u32 {
            queue.put(i).unwrap();
        }
        for i in 0..4u32 {
            match queue.get() {
                GetResult::Item(v) => assert_eq!(v, i),
                GetResult::EndOfStream => panic!("unexpected end of stream"),
            }
        }
    }

    #[test]
    fn get_on_empty_finished_queue_is_end_of_stream() {
        let queue: BoundedQueue<u8> = BoundedQueue::new(1).unwrap();
        queue.signal_finished();
        assert!(matches!(queue.get(), GetResult::EndOfStream));
    }

    #[test]
    fn buffered_items_are_returned_before_end_of_stream() {
        let queue = BoundedQueue::new(2).unwrap();
        queue.put(1u8).unwrap();
        queue.signal_finished();
        assert!(matches!(queue.get(), GetResult::Item(1)));
        assert!(matches!(queue.get(), GetResult::EndOfStream));
    }

    #[test]
    fn fresh_put_after_finished_is_rejected() {
        let queue = BoundedQueue::new(4).unwrap();
        queue.signal_finished();
        match queue.put(1u8) {
            Err(PutError { item, error: Error::QueueFinished }) => assert_eq!(item, 1),
            _ => panic!("expected QueueFinished"),
        }
    }

    #[test]
    fn signal_finished_is_idempotent() {
        let queue: BoundedQueue<u8> = BoundedQueue::new(1).unwrap();
        queue.signal_finished();
        queue.signal_finished();
        assert!(queue.is_finished());
    }

    #[test]
    fn blocked_producer_wakes_on_consumer() {
        let queue = Arc::new(BoundedQueue::new(1).unwrap());
        queue.put(1u8).unwrap();

        let producer_queue = queue.clone();
        let handle = thread::spawn(move || {
            producer_queue.put(2u8).unwrap();
        });

        thread::sleep(Duration::from_millis(20));
        assert!(matches!(queue.get(), GetResult::Item(1)));
        handle.join().unwrap();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn wait_finished_blocks_until_drained() {
        let queue = Arc::new(BoundedQueue::new(2).unwrap());
        queue.put(1u8).unwrap();
        queue.signal_finished();

        let waiter_queue = queue.clone();
        let handle = thread::spawn(move || {
            waiter_queue.wait_finished().unwrap();
        });

        thread::sleep(Duration::from_millis(20));
        queue.get();
        handle.join().unwrap();
    }

    #[test]
    fn destroy_releases_resident_items_exactly_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        struct DropCounter(Arc<AtomicUsize>);
        impl Drop for DropCounter {
            fn drop(&mut self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let count = Arc::new(AtomicUsize::new(0));
        {
            let queue = BoundedQueue::new(4).unwrap();
            queue.put(DropCounter(count.clone())).unwrap();
            queue.put(DropCounter(count.clone())).unwrap();
            queue.put(DropCounter(count.clone())).unwrap();
        }
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }
}
