//! packets/mod.rs
//! Packet stream adapter.
//!
//! Responsibilities:
//! - Copy demuxed packets into owned, immutable records
//! - Keep arrival order, never resort
//! - Reject payloads the u16 length prefix cannot describe
//!
//! Non-responsibilities:
//! - Demuxing (see `source`)
//! - Seek table or layout derivation

pub mod types;
pub mod collect;

pub use types::{PacketRecord, PacketStream, PositionMarker, PacketError};
pub use collect::PacketCollector;
