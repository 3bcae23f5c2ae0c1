//! container/types.rs

use thiserror::Error;

use crate::chunks::ChunkError;
use crate::headers::HeaderError;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("header error: {0}")]
    Header(#[from] HeaderError),

    #[error("chunk error: {0}")]
    Chunk(#[from] ChunkError),

    /// A derived size does not fit its 32-bit header field.
    #[error("{what} of {size} bytes does not fit a 32-bit field")]
    SizeOverflow { what: &'static str, size: usize },

    #[error("container truncated: need {need} bytes, have {have}")]
    Truncated { need: usize, have: usize },

    #[error("{region} padding contains non-zero bytes")]
    NonZeroPadding { region: &'static str },

    #[error("container length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("packet {index} overruns the data region")]
    PacketOverrun { index: usize },
}
