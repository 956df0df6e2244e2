//! Stage worker and facade, built on top of [`lp_queue`].
//!
//! [`transform`] contains the [`Transform`](transform::Transform) trait
//! every stage implements.
//!
//! [`worker`] contains the per-stage worker thread loop (spec §4.3).
//!
//! [`handle`] contains [`StageHandle`](handle::StageHandle), the per-stage
//! public contract (spec §4.4).

#![warn(missing_docs)]

pub mod handle;
pub mod transform;
pub mod worker;

pub use handle::StageHandle;
pub use transform::Transform;
