//! fsb5-core
//!
//! Pure Rust Ogg Vorbis -> FSB5 remux engine.
//! No audio decoding: packets are copied verbatim into the destination
//! container together with a derived seek table.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Format building blocks
pub mod checksum;
pub mod fields;
pub mod packets;
pub mod headers;
pub mod seek;
pub mod chunks;
pub mod container;

// Collaborator boundary
pub mod source;

pub mod telemetry;

// Pipeline
pub mod remux;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::chunks::LoopPoints;
    pub use crate::container::{parse_container, ParsedContainer};
    pub use crate::packets::PositionMarker;
    pub use crate::remux::{remux, remux_to_writer, RemuxOptions, RemuxOutput};
    pub use crate::source::{MemorySource, OggVorbisSource, PacketSource, SourcePacket, StreamInfo};
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::{ErrorKind, RemuxError};
}
