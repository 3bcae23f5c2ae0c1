//! headers/decode.rs
//!
//! Header decoding utilities. Mirror of `encode.rs`.

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{chunk_bits, field_max, sample_bits};
use crate::headers::types::{ChunkHeader, ContainerHeader, HeaderError, SampleHeader, CONTAINER_HEADER_LEN};

struct FieldUnpacker {
    word: u64,
    shift: u32,
}

impl FieldUnpacker {
    fn new(word: u64) -> Self {
        Self { word, shift: 0 }
    }

    fn take(&mut self, bits: u32) -> u64 {
        let v = (self.word >> self.shift) & field_max(bits);
        self.shift += bits;
        v
    }
}

/// Deserialize and validate a 60-byte container header.
pub fn decode_container_header(buf: &[u8]) -> Result<ContainerHeader, HeaderError> {
    if buf.len() < CONTAINER_HEADER_LEN {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: CONTAINER_HEADER_LEN });
    }

    let mut flags = [0u8; 8];
    let mut hash = [0u8; 16];
    let mut reserved = [0u8; 8];
    flags.copy_from_slice(&buf[28..36]);
    hash.copy_from_slice(&buf[36..52]);
    reserved.copy_from_slice(&buf[52..60]);

    let h = ContainerHeader {
        magic: LittleEndian::read_u32(&buf[0..4]),
        version: LittleEndian::read_u32(&buf[4..8]),
        sample_count: LittleEndian::read_u32(&buf[8..12]),
        sample_header_size: LittleEndian::read_u32(&buf[12..16]),
        name_table_size: LittleEndian::read_u32(&buf[16..20]),
        data_size: LittleEndian::read_u32(&buf[20..24]),
        mode: LittleEndian::read_u32(&buf[24..28]),
        flags,
        hash,
        reserved,
    };

    h.validate()?;
    Ok(h)
}

pub fn unpack_sample_header(word: u64) -> SampleHeader {
    let mut u = FieldUnpacker::new(word);
    let extra_param = u.take(sample_bits::EXTRA_PARAM) != 0;
    let frequency = u.take(sample_bits::FREQUENCY) as u8;
    let stereo = u.take(sample_bits::STEREO) != 0;
    let data_offset = u.take(sample_bits::DATA_OFFSET) as u32;
    let sample_count = u.take(sample_bits::SAMPLE_COUNT) as u32;
    SampleHeader { extra_param, frequency, stereo, data_offset, sample_count }
}

pub fn decode_sample_header(buf: &[u8]) -> Result<SampleHeader, HeaderError> {
    if buf.len() < SampleHeader::LEN {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: SampleHeader::LEN });
    }
    Ok(unpack_sample_header(LittleEndian::read_u64(&buf[..SampleHeader::LEN])))
}

pub fn unpack_chunk_header(word: u32) -> ChunkHeader {
    let mut u = FieldUnpacker::new(word as u64);
    let has_next = u.take(chunk_bits::HAS_NEXT) != 0;
    let size = u.take(chunk_bits::SIZE) as u32;
    let chunk_type = u.take(chunk_bits::CHUNK_TYPE) as u8;
    ChunkHeader { has_next, size, chunk_type }
}

pub fn decode_chunk_header(buf: &[u8]) -> Result<ChunkHeader, HeaderError> {
    if buf.len() < ChunkHeader::LEN {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: ChunkHeader::LEN });
    }
    Ok(unpack_chunk_header(LittleEndian::read_u32(&buf[..ChunkHeader::LEN])))
}
