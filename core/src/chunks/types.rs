//! chunks/types.rs

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::chunk_ids;
use crate::headers::HeaderError;
use crate::seek::SeekTableEntry;

/// Chunk type tags (7 bits on the wire).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum ChunkType {
    Channels        = chunk_ids::CHANNELS,
    Frequency       = chunk_ids::FREQUENCY,
    Loop            = chunk_ids::LOOP,
    VorbisSeekTable = chunk_ids::VORBIS_SEEK_TABLE,
}

/// Caller supplied loop bounds, in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopPoints {
    pub start: u32,
    pub end: u32,
}

/// Terminal chunk: setup checksum plus the seek table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeekTableChunk {
    pub checksum: u32,
    pub entries: Vec<SeekTableEntry>,
}

impl SeekTableChunk {
    /// checksum (4) + table length (4)
    pub const FIXED_LEN: usize = 8;

    pub fn table_length(&self) -> usize {
        self.entries.len() * SeekTableEntry::LEN
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Channels(u8),
    Frequency(u32),
    Loop(LoopPoints),
    SeekTable(SeekTableChunk),
}

impl Chunk {
    pub fn chunk_type(&self) -> ChunkType {
        match self {
            Chunk::Channels(_) => ChunkType::Channels,
            Chunk::Frequency(_) => ChunkType::Frequency,
            Chunk::Loop(_) => ChunkType::Loop,
            Chunk::SeekTable(_) => ChunkType::VorbisSeekTable,
        }
    }

    /// Declared payload size (excludes the 4-byte chunk header).
    pub fn body_len(&self) -> usize {
        match self {
            Chunk::Channels(_) => 1,
            Chunk::Frequency(_) => 4,
            Chunk::Loop(_) => 8,
            Chunk::SeekTable(t) => SeekTableChunk::FIXED_LEN + t.table_length(),
        }
    }

    pub fn write_body(&self, out: &mut Vec<u8>) -> Result<(), ChunkError> {
        match self {
            Chunk::Channels(n) => out.push(*n),
            Chunk::Frequency(rate) => out.extend_from_slice(&rate.to_le_bytes()),
            Chunk::Loop(lp) => {
                out.extend_from_slice(&lp.start.to_le_bytes());
                out.extend_from_slice(&lp.end.to_le_bytes());
            }
            Chunk::SeekTable(t) => {
                let table_len = u32::try_from(t.table_length())
                    .map_err(|_| ChunkError::BodyTooLarge { len: t.table_length() })?;
                out.extend_from_slice(&t.checksum.to_le_bytes());
                out.extend_from_slice(&table_len.to_le_bytes());
                for e in &t.entries {
                    e.write_le(out);
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("chunk header error: {0}")]
    Header(#[from] HeaderError),

    #[error("unknown chunk type: {0}")]
    UnknownType(u8),

    #[error("{chunk_type:?} chunk size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { chunk_type: ChunkType, expected: usize, actual: usize },

    #[error("chunk chain truncated: need {need} bytes, have {have}")]
    Truncated { need: usize, have: usize },

    #[error("chunk body of {len} bytes does not fit its size field")]
    BodyTooLarge { len: usize },

    #[error("chunk chain has no seek table chunk")]
    MissingSeekTable,

    #[error("seek table chunk must terminate the chain")]
    SeekTableNotLast,
}
