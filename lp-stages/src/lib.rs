//! Built-in stage transforms and the stage registry.
//!
//! spec.md deliberately keeps the individual transforms (uppercase,
//! rotate, reverse, insert spaces, print, animated print) and the
//! dynamic-loading mechanism that discovers them out of scope, describing
//! only the boundary they present to the pipeline core. This crate
//! supplies a concrete, statically compiled implementation of both, so
//! the pipeline can actually run: [`registry::resolve`] stands in for the
//! out-of-scope loader, and each submodule is one out-of-scope transform.
//!
//! Grounded on `libasm::parse`'s one-file-per-concern module layout
//! (`lines/float.rs`, `lines/data.rs`, `lines/integer.rs`, each a small,
//! focused transform over one input shape).

#![warn(missing_docs)]

mod animated_printer;
mod expander;
mod flipper;
mod logger;
mod printer;
pub mod registry;
mod rotator;
mod uppercaser;

pub use registry::resolve;
