//! telemetry/counters.rs
//! Mutable counters filled while collecting and serializing.

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemuxCounters {
    pub packets: u64,
    pub packets_with_marker: u64,
    /// Units the source dropped for corrupt or missing data.
    pub packets_skipped: u64,
    pub bytes_payload: u64,
    /// Length prefixes.
    pub bytes_framing: u64,
    /// Container header + sample header + chunk chain.
    pub bytes_header: u64,
    pub bytes_chunk_padding: u64,
    pub bytes_data_padding: u64,
}

impl RemuxCounters {
    /// Record one collected packet.
    pub fn add_packet(&mut self, payload_len: usize, prefix_len: usize, has_marker: bool) {
        self.packets += 1;
        self.bytes_payload += payload_len as u64;
        self.bytes_framing += prefix_len as u64;
        if has_marker {
            self.packets_with_marker += 1;
        }
    }

    pub fn add_skipped(&mut self, n: u64) {
        self.packets_skipped += n;
    }

    /// Record the fixed layout overhead.
    pub fn add_layout(&mut self, header_len: usize, chunk_padding: usize, data_padding: usize) {
        self.bytes_header += header_len as u64;
        self.bytes_chunk_padding += chunk_padding as u64;
        self.bytes_data_padding += data_padding as u64;
    }

    /// Everything that is not payload.
    pub fn overhead_bytes(&self) -> u64 {
        self.bytes_framing + self.bytes_header + self.bytes_chunk_padding + self.bytes_data_padding
    }

    pub fn output_bytes(&self) -> u64 {
        self.bytes_payload + self.overhead_bytes()
    }
}
