//! container/encode.rs
//! Pure write pass over a resolved layout and the frozen packet stream.

use crate::container::layout::ContainerLayout;
use crate::container::types::ContainerError;
use crate::headers::{encode_container_header, encode_sample_header};
use crate::packets::PacketStream;

/// Serialize the whole container into memory.
///
/// Nothing is returned unless every field packed successfully, so callers
/// never see a partially valid container.
pub fn encode_container(layout: &ContainerLayout, stream: &PacketStream) -> Result<Vec<u8>, ContainerError> {
    let expected = layout.total_len();
    let mut out = Vec::with_capacity(expected);

    // --- Header region ---
    out.extend_from_slice(&encode_container_header(&layout.header));
    out.extend_from_slice(&encode_sample_header(&layout.sample_header)?);
    layout.chain.encode_into(&mut out)?;
    out.resize(out.len() + layout.chunk_padding, 0);

    // --- Data region ---
    for packet in stream {
        out.extend_from_slice(&packet.len().to_le_bytes());
        out.extend_from_slice(packet.payload());
    }
    out.resize(out.len() + layout.data_padding, 0);

    // --- Validation ---
    if out.len() != expected {
        return Err(ContainerError::LengthMismatch { expected, actual: out.len() });
    }

    Ok(out)
}
