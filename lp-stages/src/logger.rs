//! The `logger` transform: prints the line, tagged with the stage name,
//! and passes it through unchanged.

use lp_core::Error;
use lp_stage::transform::Transform;
use std::io::Write;
use std::sync::{Mutex, OnceLock};

/// Guards stdout writes across stage worker threads so that concurrently
/// running terminal stages (this one, [`crate::printer::Printer`],
/// [`crate::animated_printer::AnimatedPrinter`]) never interleave a
/// single line's bytes with another's, per spec §5's recommendation.
pub(crate) fn stdout_guard() -> &'static Mutex<()> {
    static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
    GUARD.get_or_init(|| Mutex::new(()))
}

/// Writes `[logger] <line>` to stdout and returns the line unchanged, so
/// it can sit anywhere in a stage chain without altering downstream data.
#[derive(Debug, Default)]
pub struct Logger;

impl Transform for Logger {
    fn apply(&self, input: Vec<u8>) -> Result<Vec<u8>, Error> {
        let _held = stdout_guard().lock().unwrap_or_else(|p| p.into_inner());
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(b"[logger] ")
            .and_then(|_| stdout.write_all(&input))
            .and_then(|_| stdout.write_all(b"\n"))
            .map_err(|e| Error::InternalError(format!("logger: write failed: {e}")))?;
        Ok(input)
    }

    fn name(&self) -> &str {
        "logger"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_input_through_unchanged() {
        assert_eq!(Logger.apply(b"hi".to_vec()).unwrap(), b"hi".to_vec());
    }
}
