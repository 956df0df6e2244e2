//! The `uppercaser` transform: ASCII-uppercases its input.

use lp_core::Error;
use lp_stage::transform::Transform;

/// Uppercases every ASCII byte of the line, leaving non-ASCII bytes as-is.
#[derive(Debug, Default)]
pub struct Uppercaser;

impl Transform for Uppercaser {
    fn apply(&self, mut input: Vec<u8>) -> Result<Vec<u8>, Error> {
        input.make_ascii_uppercase();
        Ok(input)
    }

    fn name(&self) -> &str {
        "uppercaser"
    }
}
