//! Stderr diagnostic formatting.
//!
//! The corpus this workspace is grounded on never reaches for a logging
//! crate (`log`, `tracing`); diagnostics are plain `eprintln!` calls. This
//! module keeps that convention while pinning down the exact format spec §6
//! mandates: `[LEVEL][name] - message`.

use std::io::{self, Write};

/// Writes an `[ERROR][name] - message` line to standard error.
pub fn log_error(name: &str, message: impl AsRef<str>) {
    let _ = writeln!(io::stderr(), "[ERROR][{name}] - {}", message.as_ref());
}

/// Writes an `[INFO][name] - message` line to standard error.
pub fn log_info(name: &str, message: impl AsRef<str>) {
    let _ = writeln!(io::stderr(), "[INFO][{name}] - {}", message.as_ref());
}
