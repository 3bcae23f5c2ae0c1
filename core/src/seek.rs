//! seek.rs
//! Seek table derivation: (position, byte offset) for each packet with a
//! defined marker, offsets relative to the start of the packet data region.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::packets::PacketStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekTableEntry {
    pub position: u32,
    pub offset: u32,
}

impl SeekTableEntry {
    pub const LEN: usize = 8;

    pub fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.position.to_le_bytes());
        out.extend_from_slice(&self.offset.to_le_bytes());
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeekError {
    #[error("packet {index}: position {position} does not fit a 32-bit seek entry")]
    PositionOverflow { index: usize, position: u64 },

    #[error("packet {index}: data offset {offset} does not fit a 32-bit seek entry")]
    OffsetOverflow { index: usize, offset: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeekTable {
    entries: Vec<SeekTableEntry>,
    max_position: u32,
}

impl SeekTable {
    pub fn entries(&self) -> &[SeekTableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest defined marker, 0 when none.
    pub fn max_position(&self) -> u32 {
        self.max_position
    }

    /// Encoded size of the entries alone.
    pub fn byte_len(&self) -> usize {
        self.entries.len() * SeekTableEntry::LEN
    }
}

/// Single pass over the frozen stream.
///
/// Each entry records the offset *before* its own packet; the running offset
/// advances by prefix + payload for every packet, marked or not.
pub fn build_seek_table(stream: &PacketStream) -> Result<SeekTable, SeekError> {
    let mut entries = Vec::with_capacity(stream.defined_marker_count());
    let mut max_position = 0u32;
    let mut offset = 0usize;

    for (index, packet) in stream.iter().enumerate() {
        if let Some(position) = packet.marker().value() {
            let position32 = u32::try_from(position)
                .map_err(|_| SeekError::PositionOverflow { index, position })?;
            let offset32 = u32::try_from(offset)
                .map_err(|_| SeekError::OffsetOverflow { index, offset })?;

            entries.push(SeekTableEntry { position: position32, offset: offset32 });
            max_position = max_position.max(position32);
        }
        offset += packet.framed_len();
    }

    Ok(SeekTable { entries, max_position })
}
