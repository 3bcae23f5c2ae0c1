//! constants.rs
//! FSB5 wire constants shared by the encoder and the conforming reader.
//!
//! Design notes:
//! - All multi-byte integers on the wire are little-endian.
//! - Bit-field widths are the single source of truth for packing and unpacking.

/// Magic number for the container header.
/// "FSB5" read as a little-endian u32.
pub const FSB5_MAGIC: u32 = 0x3542_5346;
pub const FSB5_VERSION: u32 = 1;

/// The container always wraps exactly one logical sample.
pub const FSB5_SAMPLE_COUNT: u32 = 1;

/// Codec mode identifier for Vorbis payloads.
pub const MODE_VORBIS: u32 = 15;

/// Value of the first opaque flag byte after `mode`.
pub const HEADER_FLAG_BYTE: u8 = 1;

/// Chunk region (header + sample header + chunks) alignment.
pub const CHUNK_REGION_ALIGN: usize = 16;
/// Packet data region alignment.
pub const DATA_REGION_ALIGN: usize = 32;

/// Packets are framed with a u16 length prefix.
pub const PACKET_LEN_PREFIX: usize = 2;
pub const MAX_PACKET_LEN: usize = u16::MAX as usize;

/// Bit widths inside the packed sample header (u64, LSB first).
pub mod sample_bits {
    pub const EXTRA_PARAM: u32 = 1;
    pub const FREQUENCY: u32 = 4;
    pub const STEREO: u32 = 1;
    pub const DATA_OFFSET: u32 = 28;
    pub const SAMPLE_COUNT: u32 = 30;
}

/// Bit widths inside a packed chunk header (u32, LSB first).
pub mod chunk_bits {
    pub const HAS_NEXT: u32 = 1;
    pub const SIZE: u32 = 24;
    pub const CHUNK_TYPE: u32 = 7;
}

/// Chunk type tags (mirrored in `chunks::ChunkType`).
pub mod chunk_ids {
    pub const CHANNELS: u8 = 1;
    pub const FREQUENCY: u8 = 2;
    pub const LOOP: u8 = 3;
    pub const VORBIS_SEEK_TABLE: u8 = 11;
}

/// Largest value representable in `bits` bits.
#[inline]
pub const fn field_max(bits: u32) -> u64 {
    (1u64 << bits) - 1
}
