//! container/decode.rs
//!
//! Conforming reader for single-sample Vorbis FSB5 containers.
//!
//! Design notes:
//! - Zero-copy: packet payloads borrow from the input buffer.
//! - Declared sizes are authoritative; the file must end exactly at the end
//!   of the data region.
//! - A zero-length packet at the very end of the data region cannot be told
//!   apart from padding and is read as padding.

use byteorder::{ByteOrder, LittleEndian};

use crate::chunks::{parse_chunk_chain, Chunk, SeekTableChunk};
use crate::constants::{DATA_REGION_ALIGN, PACKET_LEN_PREFIX};
use crate::container::types::ContainerError;
use crate::headers::{decode_container_header, decode_sample_header, ChunkHeader, ContainerHeader, SampleHeader, CONTAINER_HEADER_LEN};

#[derive(Debug, Clone)]
pub struct ParsedContainer<'a> {
    pub header: ContainerHeader,
    pub sample_header: SampleHeader,
    pub chunks: Vec<(ChunkHeader, Chunk)>,
    pub chunk_padding: usize,
    pub packets: Vec<&'a [u8]>,
    pub data_padding: usize,
}

impl<'a> ParsedContainer<'a> {
    pub fn seek_table(&self) -> Option<&SeekTableChunk> {
        self.chunks.iter().find_map(|(_, c)| match c {
            Chunk::SeekTable(t) => Some(t),
            _ => None,
        })
    }

    pub fn channels_override(&self) -> Option<u8> {
        self.chunks.iter().find_map(|(_, c)| match c {
            Chunk::Channels(n) => Some(*n),
            _ => None,
        })
    }

    pub fn frequency_override(&self) -> Option<u32> {
        self.chunks.iter().find_map(|(_, c)| match c {
            Chunk::Frequency(r) => Some(*r),
            _ => None,
        })
    }
}

fn require(buf: &[u8], need: usize) -> Result<(), ContainerError> {
    if buf.len() < need {
        return Err(ContainerError::Truncated { need, have: buf.len() });
    }
    Ok(())
}

fn all_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0)
}

pub fn parse_container(buf: &[u8]) -> Result<ParsedContainer<'_>, ContainerError> {
    let header = decode_container_header(buf)?;

    let region_end = CONTAINER_HEADER_LEN + header.sample_header_size as usize;
    let data_end = region_end + header.data_size as usize;
    require(buf, region_end)?;
    let chain_start = CONTAINER_HEADER_LEN + SampleHeader::LEN;
    if region_end < chain_start {
        return Err(ContainerError::Truncated { need: chain_start, have: region_end });
    }

    // --- Sample header + chunk chain ---
    let sample_header = decode_sample_header(&buf[CONTAINER_HEADER_LEN..region_end])?;
    let (chunks, consumed) = parse_chunk_chain(&buf[chain_start..region_end])?;

    let padding = &buf[chain_start + consumed..region_end];
    if !all_zero(padding) {
        return Err(ContainerError::NonZeroPadding { region: "chunk region" });
    }
    let chunk_padding = padding.len();

    // --- Data region ---
    require(buf, data_end)?;
    if buf.len() != data_end {
        return Err(ContainerError::LengthMismatch { expected: data_end, actual: buf.len() });
    }
    let data = &buf[region_end..data_end];

    let mut packets = Vec::new();
    let mut off = 0usize;
    loop {
        let rest = &data[off..];
        if rest.len() < DATA_REGION_ALIGN && all_zero(rest) {
            break;
        }
        if rest.len() < PACKET_LEN_PREFIX {
            return Err(ContainerError::PacketOverrun { index: packets.len() });
        }
        let len = LittleEndian::read_u16(rest) as usize;
        let end = PACKET_LEN_PREFIX + len;
        if rest.len() < end {
            return Err(ContainerError::PacketOverrun { index: packets.len() });
        }
        packets.push(&rest[PACKET_LEN_PREFIX..end]);
        off += end;
    }

    Ok(ParsedContainer {
        header,
        sample_header,
        chunks,
        chunk_padding,
        packets,
        data_padding: data.len() - off,
    })
}
