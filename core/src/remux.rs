//! remux.rs
//! collect -> derive -> serialize, strictly sequential.
//!
//! Design notes:
//! - The packet stream is frozen before any derivation starts.
//! - The whole container is built in memory; a writer only ever receives a
//!   complete, valid container.

use std::io::Write;

use log::{debug, warn};

use crate::checksum::setup_checksum;
use crate::chunks::{ChunkChain, LoopPoints};
use crate::constants::PACKET_LEN_PREFIX;
use crate::container::{encode_container, ContainerLayout};
use crate::fields::derive_fields;
use crate::packets::{PacketCollector, PacketStream};
use crate::seek::build_seek_table;
use crate::source::{PacketSource, StreamInfo};
use crate::telemetry::{RemuxCounters, Stage, TelemetrySnapshot, TelemetryTimer};
use crate::types::RemuxError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemuxOptions {
    /// Attach a loop chunk. Both bounds or nothing.
    pub loop_points: Option<LoopPoints>,
}

impl RemuxOptions {
    pub fn with_loop(start: u32, end: u32) -> Self {
        Self { loop_points: Some(LoopPoints { start, end }) }
    }
}

/// Finished container plus everything derived on the way.
#[derive(Debug)]
pub struct RemuxOutput {
    pub bytes: Vec<u8>,
    pub layout: ContainerLayout,
    pub setup_checksum: u32,
    pub counters: RemuxCounters,
    pub timer: TelemetryTimer,
}

impl RemuxOutput {
    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, &self.timer)
    }
}

/// Drain `source` into a frozen stream.
pub fn collect_packets<S: PacketSource>(source: &mut S) -> Result<PacketStream, RemuxError> {
    let mut collector = PacketCollector::new();
    while let Some(pkt) = source.next_packet()? {
        collector.push(&pkt.data, pkt.marker)?;
    }
    debug!("collected {} packets ({} payload bytes)", collector.len(), collector.payload_bytes());
    Ok(collector.freeze())
}

/// Pure derivation of the container plan from the frozen stream.
pub fn derive_layout(
    info: &StreamInfo,
    stream: &PacketStream,
    options: &RemuxOptions,
) -> Result<(ContainerLayout, u32), RemuxError> {
    let checksum = setup_checksum(&info.setup_packet);
    let fields = derive_fields(info.sample_rate, info.channels);
    let seek = build_seek_table(stream)?;

    if let Some(lp) = options.loop_points {
        if lp.start > lp.end {
            warn!("loop start {} is after loop end {}", lp.start, lp.end);
        }
        if lp.end > seek.max_position() {
            warn!("loop end {} is past the last sample {}", lp.end, seek.max_position());
        }
    }

    debug!(
        "setup checksum 0x{:08x}, frequency code {}, stereo {}, {} seek entries, {} samples",
        checksum,
        fields.frequency.code(),
        fields.stereo,
        seek.len(),
        seek.max_position()
    );

    let chain = ChunkChain::build(&fields, options.loop_points, checksum, &seek);
    let layout = ContainerLayout::plan(stream, &fields, &seek, chain)?;
    Ok((layout, checksum))
}

/// Run the whole pipeline in memory.
pub fn remux<S: PacketSource>(mut source: S, options: &RemuxOptions) -> Result<RemuxOutput, RemuxError> {
    let mut timer = TelemetryTimer::new();
    let mut counters = RemuxCounters::default();

    let stream = timer.time(Stage::Read, || collect_packets(&mut source))?;
    for p in &stream {
        counters.add_packet(p.payload().len(), PACKET_LEN_PREFIX, p.marker().is_defined());
    }
    counters.add_skipped(source.skipped());

    let (layout, checksum) = timer.time(Stage::Derive, || derive_layout(source.info(), &stream, options))?;
    counters.add_layout(
        layout.chunk_region_len() - layout.chunk_padding,
        layout.chunk_padding,
        layout.data_padding,
    );

    let bytes = timer.time(Stage::Serialize, || encode_container(&layout, &stream))?;

    Ok(RemuxOutput { bytes, layout, setup_checksum: checksum, counters, timer })
}

/// Run the pipeline and hand the finished container to `out`.
pub fn remux_to_writer<S: PacketSource, W: Write>(
    source: S,
    options: &RemuxOptions,
    out: &mut W,
) -> Result<TelemetrySnapshot, RemuxError> {
    let mut output = remux(source, options)?;
    let bytes = std::mem::take(&mut output.bytes);
    output.timer.time(Stage::Write, || -> std::io::Result<()> {
        out.write_all(&bytes)?;
        out.flush()
    })?;
    output.timer.finish();
    Ok(output.telemetry())
}
