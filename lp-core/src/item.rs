//! The unit of data that flows through the pipeline.

use std::fmt::{self, Debug};

/// The literal sentinel text recognized by [`Item::from_line`].
///
/// A line from standard input triggers shutdown only if it equals this
/// byte sequence exactly: no leading/trailing whitespace, case-sensitive,
/// no substring matches.
pub const SENTINEL: &[u8] = b"<END>";

/// The maximum number of payload bytes a single line may carry.
///
/// Lines longer than this are truncated to this length (see
/// `SPEC_FULL.md`'s Open Question 3); the sentinel itself is five bytes,
/// so a truncated line can never accidentally become the sentinel.
pub const MAX_LINE_BYTES: usize = 1024;

/// One datum flowing through the pipeline, or the distinguished sentinel.
///
/// Modeled as a tagged variant rather than a magic byte string compared at
/// runtime, per the design note in spec §9: this makes it impossible for a
/// data line that merely *contains* the sentinel text, or that differs from
/// it by whitespace, to be mistaken for the real sentinel once it has been
/// classified at the input boundary.
pub enum Item {
    /// An ordinary line of data, owned by whichever component currently
    /// holds it.
    Data(Vec<u8>),
    /// The end-of-stream sentinel. Produced by the input driver at most
    /// once per run.
    End,
}

impl Item {
    /// Classifies a line read from standard input.
    ///
    /// `line` must already have its trailing `\n` (and an optional
    /// preceding `\r`) stripped. Lines longer than [`MAX_LINE_BYTES`] are
    /// truncated, and the truncation is reported to standard error (spec
    /// §6's diagnostic channel) as `[ERROR][input] - line exceeds maximum
    /// length, truncated`.
    pub fn from_line(mut line: Vec<u8>) -> Self {
        if line == SENTINEL {
            return Item::End;
        }
        if line.len() > MAX_LINE_BYTES {
            line.truncate(MAX_LINE_BYTES);
            crate::log::log_error("input", "line exceeds maximum length, truncated");
        }
        Item::Data(line)
    }

    /// True if this is the sentinel.
    pub fn is_end(&self) -> bool {
        matches!(self, Item::End)
    }

    /// Borrows the payload, if this is a data item.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Item::Data(bytes) => Some(bytes),
            Item::End => None,
        }
    }

    /// Consumes the item, returning the payload if this is a data item.
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Item::Data(bytes) => Some(bytes),
            Item::End => None,
        }
    }
}

impl Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Data(bytes) => write!(f, "Item::Data({:?})", String::from_utf8_lossy(bytes)),
            Item::End => write!(f, "Item::End"),
        }
    }
}
