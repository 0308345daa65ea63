//! Errors reported by sequences, cursors, views and split cursors.
//!
//! Every error is returned synchronously to the caller. A mutation that
//! fails leaves the sequence exactly as it was: all checks run before the
//! first write.

use std::fmt;

use thiserror::Error;

/// A mutating primitive of [`Sequence`](crate::Sequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Set,
    Insert,
    RemoveAt,
    RemoveRange,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Set => "set",
            Operation::Insert => "insert",
            Operation::RemoveAt => "remove_at",
            Operation::RemoveRange => "remove_range",
        };
        return f.write_str(name);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeqError {
    /// An index or range endpoint lies outside `[0, len]`.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// A range whose start exceeds its end.
    #[error("range start {from} exceeds range end {to}")]
    IllegalArgument { from: usize, to: usize },

    /// The sequence does not implement this primitive.
    #[error("`{0}` is not supported by this sequence")]
    Unsupported(Operation),

    /// The root was structurally modified behind this cursor or view.
    #[error("sequence was structurally modified outside this cursor or view")]
    ConcurrentModification,

    /// A cursor-relative operation with no element to act on.
    #[error("no element to act on: step the cursor first")]
    InvalidState,

    /// A cursor stepped past either end.
    #[error("no more elements")]
    Exhausted,

    /// The root sequence behind a view has been dropped.
    #[error("root sequence has been dropped")]
    Detached,
}

pub type Result<T> = std::result::Result<T, SeqError>;

/// Check that `index` addresses an existing element of a sequence of length `len`.
#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(SeqError::OutOfRange { index, len });
    }
    return Ok(());
}

/// Check that `index` is a valid insertion point (`index <= len`).
#[inline]
pub(crate) fn check_position(index: usize, len: usize) -> Result<()> {
    if index > len {
        return Err(SeqError::OutOfRange { index, len });
    }
    return Ok(());
}

/// Check a half-open range `[from, to)` against `len`.
pub(crate) fn check_range(from: usize, to: usize, len: usize) -> Result<()> {
    if to > len {
        return Err(SeqError::OutOfRange { index: to, len });
    }
    if from > to {
        return Err(SeqError::IllegalArgument { from, to });
    }
    return Ok(());
}
