//! The `rotator` transform: rotates the line one byte to the right.

use lp_core::Error;
use lp_stage::transform::Transform;

/// Moves the last byte of the line to the front, shifting every other
/// byte one position to the right. A line of length 0 or 1 is unchanged.
#[derive(Debug, Default)]
pub struct Rotator;

impl Transform for Rotator {
    fn apply(&self, input: Vec<u8>) -> Result<Vec<u8>, Error> {
        if input.len() < 2 {
            return Ok(input);
        }
        let mut rotated = Vec::with_capacity(input.len());
        rotated.push(input[input.len() - 1]);
        rotated.extend_from_slice(&input[..input.len() - 1]);
        Ok(rotated)
    }

    fn name(&self) -> &str {
        "rotator"
    }
}
