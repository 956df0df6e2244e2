//! The `expander` transform: inserts a space between every adjacent pair
//! of bytes in the line.

use lp_core::Error;
use lp_stage::transform::Transform;

/// Inserts a single ASCII space strictly between each pair of adjacent
/// bytes, producing a line of length `2 * n - 1` for an `n`-byte input.
/// No leading or trailing space is added, and a line of length 0 or 1 is
/// unchanged.
#[derive(Debug, Default)]
pub struct Expander;

impl Transform for Expander {
    fn apply(&self, input: Vec<u8>) -> Result<Vec<u8>, Error> {
        if input.len() < 2 {
            return Ok(input);
        }
        let mut expanded = Vec::with_capacity(input.len() * 2 - 1);
        for (i, byte) in input.iter().enumerate() {
            if i > 0 {
                expanded.push(b' ');
            }
            expanded.push(*byte);
        }
        Ok(expanded)
    }

    fn name(&self) -> &str {
        "expander"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_spaces_between_bytes() {
        assert_eq!(Expander.apply(b"ABC".to_vec()).unwrap(), b"A B C".to_vec());
    }

    #[test]
    fn short_input_is_unchanged() {
        assert_eq!(Expander.apply(b"".to_vec()).unwrap(), b"".to_vec());
        assert_eq!(Expander.apply(b"a".to_vec()).unwrap(), b"a".to_vec());
    }
}
