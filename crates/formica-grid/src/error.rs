//! Error types for grid storage.

use std::error::Error;
use std::fmt;

/// Errors from grid construction, growth, and conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Initial side length outside the supported `[2, 7]` range.
    InvalidInitSize {
        /// The rejected value.
        got: u32,
    },
    /// Tripling the side length would overflow the coordinate space.
    SizeOverflow {
        /// The side length whose tripling overflowed.
        size: u32,
    },
    /// A buffer reservation failed — the host is out of memory.
    ///
    /// Growth is unbounded by design, so this is a recoverable outcome
    /// rather than a crash: the grid is left in its pre-call state.
    AllocationFailed {
        /// Bytes the failed reservation asked for.
        bytes: usize,
    },
    /// Persisted raw fields describe an impossible grid.
    InvalidState {
        /// Description of the inconsistency.
        reason: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInitSize { got } => {
                write!(f, "initial size {got} outside the supported [2, 7] range")
            }
            Self::SizeOverflow { size } => {
                write!(f, "tripling side length {size} overflows the coordinate space")
            }
            Self::AllocationFailed { bytes } => {
                write!(f, "failed to reserve {bytes} bytes of cell storage")
            }
            Self::InvalidState { reason } => write!(f, "invalid grid state: {reason}"),
        }
    }
}

impl Error for GridError {}
