//! source/mod.rs
//! Demux/codec collaborator boundary.
//!
//! Responsibilities:
//! - Header phase: sample rate, channel count, raw setup packet
//! - Streaming phase: packets in stream order with position markers
//! - Absorb mid-stream corruption (skip, log, continue)

pub mod types;
pub mod ogg_vorbis;
pub mod memory;

pub use types::{PacketSource, SourceError, SourcePacket, StreamInfo};
pub use ogg_vorbis::{LogicalStream, OggVorbisSource};
pub use memory::MemorySource;
