use std::io;
use thiserror::Error;

use crate::{
    chunks::ChunkError,
    container::ContainerError,
    headers::HeaderError,
    packets::PacketError,
    seek::SeekError,
    source::SourceError,
};

/// Coarse classification used for exit codes and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed invocation arguments.
    Argument,
    /// Input is not what we expect, or a value cannot be represented.
    Format,
    /// Cannot read the input or write the output.
    Io,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Argument => 2,
            ErrorKind::Format | ErrorKind::Io => 1,
        }
    }
}

/// Unified remux error.
/// - `From` impls enable `?` across the pipeline.
/// - Every variant aborts before any output byte is written.
#[derive(Debug, Error)]
pub enum RemuxError {
    #[error("argument error: {0}")]
    Argument(String),

    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("packet error: {0}")]
    Packet(#[from] PacketError),

    #[error("seek table error: {0}")]
    Seek(#[from] SeekError),

    #[error("chunk error: {0}")]
    Chunk(#[from] ChunkError),

    #[error("header error: {0}")]
    Header(#[from] HeaderError),

    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RemuxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RemuxError::Argument(_) => ErrorKind::Argument,
            RemuxError::Io(_) => ErrorKind::Io,
            RemuxError::Source(SourceError::Io(_)) => ErrorKind::Io,
            _ => ErrorKind::Format,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }
}
