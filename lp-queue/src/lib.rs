//! Bounded, blocking, condition-signalled item queue.
//!
//! [`monitor`] contains the [`Monitor`](monitor::Monitor) primitive: a
//! level-triggered signal with a remembered state bit.
//!
//! [`queue`] contains the [`BoundedQueue`](queue::BoundedQueue)
//! datastructure: a fixed-capacity FIFO with blocking put/get and a
//! terminal "finished" phase.

#![warn(missing_docs)]

pub mod monitor;
pub mod queue;

pub use monitor::Monitor;
pub use queue::BoundedQueue;
