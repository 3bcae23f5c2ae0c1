//! headers/encode.rs
//!
//! Header encoding utilities.
//!
//! Design notes:
//! - Field order must match `decode.rs` exactly.
//! - Bit fields are range-checked before packing; nothing is truncated.

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{chunk_bits, field_max, sample_bits};
use crate::headers::types::{ChunkHeader, ContainerHeader, HeaderError, SampleHeader, CONTAINER_HEADER_LEN};

/// Packs named fields into a word, least significant bit first.
struct FieldPacker {
    word: u64,
    shift: u32,
}

impl FieldPacker {
    fn new() -> Self {
        Self { word: 0, shift: 0 }
    }

    fn put(mut self, field: &'static str, bits: u32, value: u64) -> Result<Self, HeaderError> {
        if value > field_max(bits) {
            return Err(HeaderError::FieldOverflow { field, value, bits });
        }
        self.word |= value << self.shift;
        self.shift += bits;
        Ok(self)
    }

    fn finish(self) -> u64 {
        self.word
    }
}

/// Serialize a `ContainerHeader` into its 60-byte little-endian form.
pub fn encode_container_header(h: &ContainerHeader) -> [u8; CONTAINER_HEADER_LEN] {
    let mut out = [0u8; CONTAINER_HEADER_LEN];

    LittleEndian::write_u32(&mut out[0..4], h.magic);                 // 0..4
    LittleEndian::write_u32(&mut out[4..8], h.version);               // 4..8
    LittleEndian::write_u32(&mut out[8..12], h.sample_count);         // 8..12
    LittleEndian::write_u32(&mut out[12..16], h.sample_header_size);  // 12..16
    LittleEndian::write_u32(&mut out[16..20], h.name_table_size);     // 16..20
    LittleEndian::write_u32(&mut out[20..24], h.data_size);           // 20..24
    LittleEndian::write_u32(&mut out[24..28], h.mode);                // 24..28
    out[28..36].copy_from_slice(&h.flags);                            // 28..36
    out[36..52].copy_from_slice(&h.hash);                             // 36..52
    out[52..60].copy_from_slice(&h.reserved);                         // 52..60

    out
}

/// Pack a sample header into its 64-bit word.
pub fn pack_sample_header(h: &SampleHeader) -> Result<u64, HeaderError> {
    Ok(FieldPacker::new()
        .put("extra_param", sample_bits::EXTRA_PARAM, h.extra_param as u64)?
        .put("frequency", sample_bits::FREQUENCY, h.frequency as u64)?
        .put("stereo", sample_bits::STEREO, h.stereo as u64)?
        .put("data_offset", sample_bits::DATA_OFFSET, h.data_offset as u64)?
        .put("sample_count", sample_bits::SAMPLE_COUNT, h.sample_count as u64)?
        .finish())
}

pub fn encode_sample_header(h: &SampleHeader) -> Result<[u8; SampleHeader::LEN], HeaderError> {
    let mut out = [0u8; SampleHeader::LEN];
    LittleEndian::write_u64(&mut out, pack_sample_header(h)?);
    Ok(out)
}

/// Pack a chunk header into its 32-bit word.
pub fn pack_chunk_header(h: &ChunkHeader) -> Result<u32, HeaderError> {
    let word = FieldPacker::new()
        .put("has_next", chunk_bits::HAS_NEXT, h.has_next as u64)?
        .put("chunk_size", chunk_bits::SIZE, h.size as u64)?
        .put("chunk_type", chunk_bits::CHUNK_TYPE, h.chunk_type as u64)?
        .finish();
    Ok(word as u32)
}

pub fn encode_chunk_header(h: &ChunkHeader) -> Result<[u8; ChunkHeader::LEN], HeaderError> {
    let mut out = [0u8; ChunkHeader::LEN];
    LittleEndian::write_u32(&mut out, pack_chunk_header(h)?);
    Ok(out)
}
