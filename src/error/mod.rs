//! Error types for arenars.

use core::fmt;

/// Errors that can occur while creating or using an [`Arena`](crate::Arena).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    /// The buffer cannot host the minimum bookkeeping plus one chunk.
    BufferTooSmall {
        /// Length of the supplied buffer.
        len: usize,
        /// Smallest length that would have been accepted.
        required: usize,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// No free chunk can satisfy the request.
    ///
    /// Covers an exhausted arena, a fragmented one, and a descriptor pool
    /// that could not provide a slot for the split.
    OutOfSpace {
        /// Requested size after normalization to the minimum chunk size.
        requested: usize,
    },

    /// No chunk starts at the released offset.
    UnknownAddress {
        /// The offset passed to `release`.
        offset: usize,
    },

    /// The chunk at the released offset is already free.
    AlreadyFree {
        /// The offset passed to `release`.
        offset: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArenaError::BufferTooSmall { len, required } => {
                write!(f, "buffer too small: {} bytes (need at least {})", len, required)
            }
            ArenaError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
            ArenaError::OutOfSpace { requested } => {
                write!(f, "out of space: no free chunk for {} bytes", requested)
            }
            ArenaError::UnknownAddress { offset } => {
                write!(f, "unknown address: no chunk starts at offset {}", offset)
            }
            ArenaError::AlreadyFree { offset } => {
                write!(f, "chunk at offset {} is already free", offset)
            }
        }
    }
}

impl core::error::Error for ArenaError {}
