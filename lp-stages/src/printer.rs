//! The `printer` transform: writes the bare line to stdout.

use crate::logger::stdout_guard;
use lp_core::Error;
use lp_stage::transform::Transform;
use std::io::Write;

/// Writes the line to stdout, with no tag, and returns it unchanged.
#[derive(Debug, Default)]
pub struct Printer;

impl Transform for Printer {
    fn apply(&self, input: Vec<u8>) -> Result<Vec<u8>, Error> {
        let _held = stdout_guard().lock().unwrap_or_else(|p| p.into_inner());
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(&input)
            .and_then(|_| stdout.write_all(b"\n"))
            .map_err(|e| Error::InternalError(format!("printer: write failed: {e}")))?;
        Ok(input)
    }

    fn name(&self) -> &str {
        "printer"
    }
}
