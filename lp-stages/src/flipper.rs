//! The `flipper` transform: reverses the line's byte order.

use lp_core::Error;
use lp_stage::transform::Transform;

/// Reverses the byte sequence of the line.
#[derive(Debug, Default)]
pub struct Flipper;

impl Transform for Flipper {
    fn apply(&self, mut input: Vec<u8>) -> Result<Vec<u8>, Error> {
        input.reverse();
        Ok(input)
    }

    fn name(&self) -> &str {
        "flipper"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverses_bytes() {
        assert_eq!(Flipper.apply(b"abc".to_vec()).unwrap(), b"cba".to_vec());
    }

    #[test]
    fn empty_input_is_unchanged() {
        assert_eq!(Flipper.apply(Vec::new()).unwrap(), Vec::<u8>::new());
    }
}
