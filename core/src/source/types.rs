//! source/types.rs

use std::io;
use bytes::Bytes;
use thiserror::Error;

use crate::packets::PositionMarker;

/// Stream-level facts established during the header phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    pub sample_rate: u32,
    pub channels: u8,
    /// Raw bytes of the codec setup header (checksummed).
    pub setup_packet: Bytes,
    pub vendor: String,
    pub comments: Vec<(String, String)>,
}

/// One packet as yielded by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePacket {
    pub data: Vec<u8>,
    pub marker: PositionMarker,
}

/// A demuxer that has validated its headers and now streams packets.
pub trait PacketSource {
    fn info(&self) -> &StreamInfo;

    /// Next packet in stream order, `None` at end of stream.
    fn next_packet(&mut self) -> Result<Option<SourcePacket>, SourceError>;

    /// Units dropped because of corrupt or missing data.
    fn skipped(&self) -> u64 {
        0
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("input does not appear to be an Ogg bitstream")]
    NotOgg,

    #[error("this Ogg bitstream does not contain Vorbis audio data ({0})")]
    NotVorbis(String),

    #[error("corrupt secondary header ({0})")]
    CorruptHeader(String),

    #[error("end of file before finding all Vorbis headers")]
    TruncatedHeaders,

    /// A second logical stream follows the first one.
    #[error("chained Ogg streams are not supported (new stream serial 0x{serial:08x})")]
    ChainedStream { serial: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
