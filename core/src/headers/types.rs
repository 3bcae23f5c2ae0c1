//! headers/types.rs
//! Header structs and their error type.

use thiserror::Error;

use crate::constants::{
    FSB5_MAGIC, FSB5_SAMPLE_COUNT, FSB5_VERSION, HEADER_FLAG_BYTE, MODE_VORBIS,
};

/// Fixed container header size in bytes.
pub const CONTAINER_HEADER_LEN: usize = 60;

/// Top-level FSB5 header.
///
/// Layout:
///
/// ```text
/// [ magic (4) ]
/// [ version (4) ]
/// [ sample_count (4) ]
/// [ sample_header_size (4) ]
/// [ name_table_size (4) ]
/// [ data_size (4) ]
/// [ mode (4) ]
/// [ flags (8) ]
/// [ hash (16) ]
/// [ reserved (8) ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub magic: u32,
    pub version: u32,
    /// Always 1: one logical sample per container.
    pub sample_count: u32,
    /// Sample header + chunk chain + chunk-region padding.
    pub sample_header_size: u32,
    pub name_table_size: u32,
    /// Framed packet bytes + data-region padding.
    pub data_size: u32,
    pub mode: u32,
    /// flags[0] is an opaque marker set to 1, the rest are zero.
    pub flags: [u8; 8],
    /// Content hash. Never computed, left zero and never checked.
    pub hash: [u8; 16],
    pub reserved: [u8; 8],
}

impl ContainerHeader {
    pub const LEN: usize = CONTAINER_HEADER_LEN;

    pub fn new(sample_header_size: u32, data_size: u32) -> Self {
        let mut flags = [0u8; 8];
        flags[0] = HEADER_FLAG_BYTE;
        Self {
            magic: FSB5_MAGIC,
            version: FSB5_VERSION,
            sample_count: FSB5_SAMPLE_COUNT,
            sample_header_size,
            name_table_size: 0,
            data_size,
            mode: MODE_VORBIS,
            flags,
            hash: [0u8; 16],
            reserved: [0u8; 8],
        }
    }

    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.magic != FSB5_MAGIC {
            return Err(HeaderError::InvalidMagic { have: self.magic, need: FSB5_MAGIC });
        }
        if self.version != FSB5_VERSION {
            return Err(HeaderError::UnsupportedVersion { have: self.version });
        }
        if self.sample_count != FSB5_SAMPLE_COUNT {
            return Err(HeaderError::UnsupportedSampleCount { have: self.sample_count });
        }
        if self.mode != MODE_VORBIS {
            return Err(HeaderError::UnsupportedMode { have: self.mode });
        }
        if self.name_table_size != 0 {
            return Err(HeaderError::Validation(format!(
                "name table not supported, size {}",
                self.name_table_size
            )));
        }
        if self.reserved.iter().any(|&b| b != 0) {
            return Err(HeaderError::ReservedBytesNonZero { reserved: hex::encode(self.reserved) });
        }
        Ok(())
    }
}

/// Per-sample header, 64 bits packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleHeader {
    /// Always set: a chunk chain follows.
    pub extra_param: bool,
    pub frequency: u8,
    pub stereo: bool,
    /// Always 0 for a single-sample container.
    pub data_offset: u32,
    /// Maximum defined position marker.
    pub sample_count: u32,
}

impl SampleHeader {
    pub const LEN: usize = 8;
}

/// Header in front of every chunk body, 32 bits packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Another chunk immediately follows this one's body.
    pub has_next: bool,
    /// Body size in bytes (24 bits).
    pub size: u32,
    /// Chunk type tag (7 bits).
    pub chunk_type: u8,
}

impl ChunkHeader {
    pub const LEN: usize = 4;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("header buffer too short: {have} < {need}")]
    BufferTooShort { have: usize, need: usize },

    #[error("invalid magic: expected 0x{need:08x}, got 0x{have:08x}")]
    InvalidMagic { have: u32, need: u32 },

    #[error("unsupported version: {have}")]
    UnsupportedVersion { have: u32 },

    #[error("unsupported sample count: {have} (only single-sample containers)")]
    UnsupportedSampleCount { have: u32 },

    #[error("unsupported mode: {have}")]
    UnsupportedMode { have: u32 },

    /// A value does not fit its bit field.
    #[error("{field} = {value} does not fit in {bits} bits")]
    FieldOverflow { field: &'static str, value: u64, bits: u32 },

    #[error("reserved bytes must be zero, got 0x{reserved}")]
    ReservedBytesNonZero { reserved: String },

    #[error("header validation error: {0}")]
    Validation(String),
}
