//! packets/types.rs
//! Owned packet records and the frozen packet stream.

use std::fmt;
use bytes::Bytes;
use thiserror::Error;

use crate::constants::{MAX_PACKET_LEN, PACKET_LEN_PREFIX};

/// Sample position reached at a packet's decode boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionMarker {
    Defined(u64),
    /// Continuation packet, no boundary.
    Undefined,
}

impl PositionMarker {
    /// Ogg encodes "no granule position" as all ones (-1 as i64).
    pub fn from_granule(granule: u64) -> Self {
        if granule == u64::MAX {
            PositionMarker::Undefined
        } else {
            PositionMarker::Defined(granule)
        }
    }

    #[inline]
    pub fn value(self) -> Option<u64> {
        match self {
            PositionMarker::Defined(v) => Some(v),
            PositionMarker::Undefined => None,
        }
    }

    #[inline]
    pub fn is_defined(self) -> bool {
        matches!(self, PositionMarker::Defined(_))
    }
}

impl fmt::Display for PositionMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionMarker::Defined(v) => write!(f, "{}", v),
            PositionMarker::Undefined => f.write_str("-"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PacketError {
    /// The u16 length prefix cannot represent this payload.
    #[error("packet {index} payload is {len} bytes, exceeds {max} byte limit")]
    PayloadTooLarge { index: usize, len: usize, max: usize },
}

/// One demuxed packet with an independently owned payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketRecord {
    payload: Bytes,
    marker: PositionMarker,
}

impl PacketRecord {
    /// Copy `payload` into a new record. `index` is only used for diagnostics.
    pub fn copy_from(index: usize, payload: &[u8], marker: PositionMarker) -> Result<Self, PacketError> {
        if payload.len() > MAX_PACKET_LEN {
            return Err(PacketError::PayloadTooLarge {
                index,
                len: payload.len(),
                max: MAX_PACKET_LEN,
            });
        }
        Ok(Self {
            payload: Bytes::copy_from_slice(payload),
            marker,
        })
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload length; fits by construction.
    pub fn len(&self) -> u16 {
        self.payload.len() as u16
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn marker(&self) -> PositionMarker {
        self.marker
    }

    /// Bytes this packet occupies in the data region (prefix + payload).
    pub fn framed_len(&self) -> usize {
        PACKET_LEN_PREFIX + self.payload.len()
    }
}

/// Ordered, frozen sequence of packets. Only `PacketCollector::freeze` builds one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacketStream {
    packets: Box<[PacketRecord]>,
}

impl PacketStream {
    pub(crate) fn from_records(packets: Vec<PacketRecord>) -> Self {
        Self { packets: packets.into_boxed_slice() }
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PacketRecord> {
        self.packets.iter()
    }

    pub fn as_slice(&self) -> &[PacketRecord] {
        &self.packets
    }

    /// Sum of prefix + payload over all packets, before padding.
    pub fn framed_size(&self) -> usize {
        self.packets.iter().map(PacketRecord::framed_len).sum()
    }

    pub fn defined_marker_count(&self) -> usize {
        self.packets.iter().filter(|p| p.marker().is_defined()).count()
    }
}

impl<'a> IntoIterator for &'a PacketStream {
    type Item = &'a PacketRecord;
    type IntoIter = std::slice::Iter<'a, PacketRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.packets.iter()
    }
}
