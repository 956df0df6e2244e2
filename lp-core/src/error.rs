//! The error taxonomy shared by every crate in the workspace.
//!
//! spec §7 names failure kinds by effect rather than by type; this module
//! gives each of them a variant of a single hand-rolled enum, in the style
//! of a tagged result rather than `NULL`-or-string (spec §9's "Error
//! transport" design note).

use std::{error::Error as StdError, fmt};

/// The process exit code a fatal [`Error`] maps to, per spec §6/§7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Invalid command-line arguments, or failure to resolve a stage name.
    /// The usage block is printed to standard output alongside the error.
    Usage = 1,
    /// A stage failed to initialize, or attach/feed setup failed
    /// internally. No usage block is printed.
    Init = 2,
}

impl ExitCode {
    /// The raw process exit status.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Whether this exit path prints the usage block on standard output.
    pub fn prints_usage(self) -> bool {
        matches!(self, ExitCode::Usage)
    }
}

/// Every named failure mode in spec §4 and §7.
#[derive(Debug)]
pub enum Error {
    // --- Monitor (C1) ---
    /// The monitor's mutex or condition variable could not be constructed.
    ///
    /// Unreachable on a hosted target with `std::sync::{Mutex, Condvar}`
    /// (their constructors are infallible); kept for taxonomy completeness,
    /// matching how `seis-bench::Error::ThreadError` covers a path that is
    /// rare but type-complete.
    MonitorInitFailed,
    /// The monitor's underlying condition variable reported an error while
    /// waiting.
    MonitorWaitFailed,

    // --- Bounded queue (C2) ---
    /// `capacity` passed to [`BoundedQueue::new`] was zero.
    ///
    /// [`BoundedQueue::new`]: ../../lp_queue/queue/struct.BoundedQueue.html#method.new
    QueueBadCapacity,
    /// The queue could not allocate its ring buffer.
    ///
    /// Unreachable in safe Rust without `try_reserve`; kept for taxonomy
    /// completeness (see [`Error::MonitorInitFailed`]).
    QueueOutOfMemory,
    /// An operation was attempted on a queue that was never initialized.
    QueueUninitialized,
    /// `put` was attempted (and did not complete) after the queue finished.
    QueueFinished,
    /// A monitor failure occurred while the queue was waiting.
    QueueInternal,

    // --- Stage facade (C4) ---
    /// `init` was called with a transform that failed its own validation.
    InvalidTransform,
    /// `init` was called with an empty or otherwise invalid stage name.
    InvalidName,
    /// `init` was called with a zero queue capacity.
    InvalidCapacity,
    /// `init` was called on a stage that is already initialized.
    AlreadyInitialized,
    /// Resource exhaustion during `init` (see [`Error::QueueOutOfMemory`]).
    OutOfMemory,
    /// The stage's worker thread could not be started.
    ThreadStartFailed,
    /// An operation was attempted on a stage that has not been initialized
    /// (or has already been torn down).
    NotInitialized,
    /// `place_work` was called with no input.
    NullInput,
    /// `wait_finished` reported an internal queue failure.
    QueueWaitFailed,
    /// `fini` was called from the stage's own worker thread.
    CannotJoinSelf,

    // --- Process-level (spec §7) ---
    /// Invalid command-line arguments.
    ArgError(String),
    /// A named stage could not be resolved to an implementation.
    ResolveError(String),
    /// A stage's `init` failed during pipeline startup.
    InitError(String),
    /// An unrecoverable internal error during attach/feed setup.
    InternalError(String),
}

impl Error {
    /// The exit code a fatal variant of this error maps to, if any.
    ///
    /// `TransformError`/`DownstreamError`/`PlaceWorkError`/`FiniError` from
    /// spec §7 have no [`ExitCode`]: they are isolated to the item that
    /// caused them and never change the process exit status, so they are
    /// logged at their call site rather than constructed as this enum's
    /// variants.
    pub fn exit_code(&self) -> Option<ExitCode> {
        match self {
            Error::ArgError(_) | Error::ResolveError(_) => Some(ExitCode::Usage),
            Error::InitError(_) | Error::InternalError(_) => Some(ExitCode::Init),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MonitorInitFailed => write!(f, "failed to initialize monitor"),
            Error::MonitorWaitFailed => write!(f, "monitor wait failed"),
            Error::QueueBadCapacity => write!(f, "queue capacity must be at least 1"),
            Error::QueueOutOfMemory => write!(f, "queue allocation failed"),
            Error::QueueUninitialized => write!(f, "queue is not initialized"),
            Error::QueueFinished => write!(f, "queue has finished"),
            Error::QueueInternal => write!(f, "internal queue failure"),
            Error::InvalidTransform => write!(f, "invalid transform"),
            Error::InvalidName => write!(f, "invalid stage name"),
            Error::InvalidCapacity => write!(f, "invalid queue capacity"),
            Error::AlreadyInitialized => write!(f, "stage is already initialized"),
            Error::OutOfMemory => write!(f, "out of memory"),
            Error::ThreadStartFailed => write!(f, "failed to start worker thread"),
            Error::NotInitialized => write!(f, "stage is not initialized"),
            Error::NullInput => write!(f, "place_work called with no input"),
            Error::QueueWaitFailed => write!(f, "wait_finished failed"),
            Error::CannotJoinSelf => write!(f, "cannot join worker from itself"),
            Error::ArgError(msg) => write!(f, "{msg}"),
            Error::ResolveError(msg) => write!(f, "{msg}"),
            Error::InitError(msg) => write!(f, "{msg}"),
            Error::InternalError(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {}

impl From<Error> for String {
    fn from(value: Error) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_print_usage() {
        assert!(Error::ArgError("bad".into()).exit_code().unwrap().prints_usage());
        assert!(Error::ResolveError("bad".into()).exit_code().unwrap().prints_usage());
    }

    #[test]
    fn init_errors_do_not_print_usage() {
        assert!(!Error::InitError("bad".into()).exit_code().unwrap().prints_usage());
        assert!(!Error::InternalError("bad".into()).exit_code().unwrap().prints_usage());
    }

    #[test]
    fn in_flight_errors_have_no_exit_code() {
        assert!(Error::QueueFinished.exit_code().is_none());
        assert!(Error::NotInitialized.exit_code().is_none());
    }
}
