//! The `animated-printer` transform: writes the line one byte at a time,
//! with a short pause between bytes, so a terminal viewer sees it appear
//! incrementally.

use crate::logger::stdout_guard;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use lp_core::Error;
use lp_stage::transform::Transform;
use std::io::Write;
use std::thread;
use std::time::Duration;

/// Delay between bytes. Short enough not to stall a long pipeline run,
/// long enough to be visible.
const STEP_DELAY: Duration = Duration::from_millis(15);

/// Writes the line to stdout one byte at a time and returns it unchanged.
#[derive(Debug, Default)]
pub struct AnimatedPrinter;

impl Transform for AnimatedPrinter {
    fn apply(&self, input: Vec<u8>) -> Result<Vec<u8>, Error> {
        let _held = stdout_guard().lock().unwrap_or_else(|p| p.into_inner());
        let mut stdout = std::io::stdout();
        let _ = execute!(stdout, Hide);
        for byte in &input {
            stdout
                .write_all(&[*byte])
                .and_then(|_| stdout.flush())
                .map_err(|e| Error::InternalError(format!("animated-printer: write failed: {e}")))?;
            thread::sleep(STEP_DELAY);
        }
        stdout
            .write_all(b"\n")
            .map_err(|e| Error::InternalError(format!("animated-printer: write failed: {e}")))?;
        let _ = execute!(stdout, Show);
        Ok(input)
    }

    fn name(&self) -> &str {
        "animated-printer"
    }
}
