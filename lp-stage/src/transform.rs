//! The per-stage transform contract.

use lp_core::Error;
use std::fmt::Debug;

/// A stage's transform: a pure function over its argument that may
/// allocate, implemented by every concrete stage in `lp-stages`.
///
/// Modeled after `libpipe`'s `PipelineStage` trait: a small,
/// doc-commented, non-object-safe-by-convention-only trait with one
/// dominant method. Unlike `PipelineStage`, `Transform` *is* object-safe
/// (`apply` takes `&self`, not an associated-type-bearing signature),
/// since the stage registry in `lp-stages` needs `Box<dyn Transform>`.
pub trait Transform: Debug + Send + Sync {
    /// Applies the transform to one line of input.
    ///
    /// May return the same bytes back (in-place semantics), a distinct
    /// buffer, or [`Err`] to indicate the transform failed for this item.
    /// A failed transform never poisons the stage: the worker logs it and
    /// moves on to the next item (spec §4.3 step 3).
    fn apply(&self, input: Vec<u8>) -> Result<Vec<u8>, Error>;

    /// A human-readable name for this transform, used only for
    /// diagnostics. Defaults to the stage's compiled type name.
    fn name(&self) -> &str;
}
