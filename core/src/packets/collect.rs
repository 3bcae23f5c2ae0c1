//! packets/collect.rs
//! Append-only collection phase. `freeze` ends it.

use log::trace;

use crate::packets::types::{PacketError, PacketRecord, PacketStream, PositionMarker};

#[derive(Debug, Default)]
pub struct PacketCollector {
    packets: Vec<PacketRecord>,
    payload_bytes: u64,
}

impl PacketCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy one packet out of the collaborator's (transient) buffer.
    pub fn push(&mut self, payload: &[u8], marker: PositionMarker) -> Result<(), PacketError> {
        let index = self.packets.len();
        let record = PacketRecord::copy_from(index, payload, marker)?;
        trace!("collected packet {} ({} bytes, marker {})", index, payload.len(), marker);
        self.payload_bytes += payload.len() as u64;
        self.packets.push(record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn payload_bytes(&self) -> u64 {
        self.payload_bytes
    }

    /// End collection. The returned stream cannot be modified.
    pub fn freeze(self) -> PacketStream {
        PacketStream::from_records(self.packets)
    }
}
