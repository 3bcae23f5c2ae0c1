//! source/memory.rs
//! Packet source over already demuxed packets.

use std::collections::VecDeque;

use crate::source::types::{PacketSource, SourceError, SourcePacket, StreamInfo};

#[derive(Debug, Clone)]
pub struct MemorySource {
    info: StreamInfo,
    packets: VecDeque<SourcePacket>,
}

impl MemorySource {
    pub fn new(info: StreamInfo, packets: impl IntoIterator<Item = SourcePacket>) -> Self {
        Self { info, packets: packets.into_iter().collect() }
    }
}

impl PacketSource for MemorySource {
    fn info(&self) -> &StreamInfo {
        &self.info
    }

    fn next_packet(&mut self) -> Result<Option<SourcePacket>, SourceError> {
        Ok(self.packets.pop_front())
    }
}
