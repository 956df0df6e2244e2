//! The level-triggered, reset-capable signal primitive used by
//! [`BoundedQueue`](crate::queue::BoundedQueue) to announce state
//! transitions without busy-waiting.

use lp_core::Error;
use std::sync::{Condvar, Mutex};

/// A condition variable with a remembered `signaled` bit.
///
/// A thread that observes `signaled == true` while holding the internal
/// mutex is allowed to proceed; [`reset`](Monitor::reset) clears the bit
/// under the same mutex. [`signal`](Monitor::signal) is idempotent:
/// asserting it twice has the same effect as once.
///
/// This is "level-triggered with explicit reset": it lets a producer
/// *announce* a transition (e.g. "queue finished") and a consumer
/// *consume* that announcement before it goes back to sleep, which avoids
/// the missed-wakeup race that a bare, state-less condition variable
/// notification is prone to.
pub struct Monitor {
    signaled: Mutex<bool>,
    condvar: Condvar,
}

impl Monitor {
    /// Creates a monitor whose `signaled` bit starts `false`.
    ///
    /// `std::sync::{Mutex, Condvar}` construction cannot fail on a hosted
    /// target, so this never returns [`Error::MonitorInitFailed`] in
    /// practice; the fallible signature is kept so callers handle the
    /// error path spec §4.1 names.
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            signaled: Mutex::new(false),
            condvar: Condvar::new(),
        })
    }

    /// Sets `signaled = true` and wakes every waiter. Idempotent.
    pub fn signal(&self) {
        let mut signaled = match self.signaled.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *signaled = true;
        // Waking waiters while still holding the mutex is fine here: the
        // critical section is O(1) (a single bool write), so there is no
        // convoying risk worth avoiding by dropping the guard first.
        self.condvar.notify_all();
    }

    /// Clears the `signaled` bit.
    pub fn reset(&self) {
        let mut signaled = match self.signaled.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *signaled = false;
    }

    /// Blocks until `signaled == true`, handling spurious wakeups by
    /// re-checking the predicate in a loop.
    pub fn wait(&self) -> Result<(), Error> {
        let guard = self
            .signaled
            .lock()
            .map_err(|_| Error::MonitorWaitFailed)?;
        let _guard = self
            .condvar
            .wait_while(guard, |signaled| !*signaled)
            .map_err(|_| Error::MonitorWaitFailed)?;
        Ok(())
    }

    /// True if the monitor is currently signaled, without blocking.
    pub fn is_signaled(&self) -> bool {
        match self.signaled.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new().expect("Mutex/Condvar construction is infallible")
    }
}
