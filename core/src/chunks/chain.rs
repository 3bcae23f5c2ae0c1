//! chunks/chain.rs
//! Chain assembly and encoding.

use log::debug;

use crate::chunks::types::{Chunk, ChunkError, LoopPoints, SeekTableChunk};
use crate::headers::{encode_chunk_header, ChunkHeader};
use crate::fields::FieldCodes;
use crate::seek::SeekTable;

/// Linear chunk chain. Always ends with the seek table chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkChain {
    chunks: Vec<Chunk>,
}

impl ChunkChain {
    /// Fixed order: channels, frequency, loop (each only when needed), then
    /// the seek table.
    pub fn build(
        fields: &FieldCodes,
        loop_points: Option<LoopPoints>,
        setup_checksum: u32,
        seek: &SeekTable,
    ) -> Self {
        let mut chunks = Vec::with_capacity(4);

        if let Some(channels) = fields.channels_override {
            debug!("attaching channels chunk ({} channels)", channels);
            chunks.push(Chunk::Channels(channels));
        }
        if let Some(rate) = fields.frequency_override {
            debug!("attaching frequency chunk ({} Hz)", rate);
            chunks.push(Chunk::Frequency(rate));
        }
        if let Some(lp) = loop_points {
            debug!("attaching loop chunk ({}..{})", lp.start, lp.end);
            chunks.push(Chunk::Loop(lp));
        }
        chunks.push(Chunk::SeekTable(SeekTableChunk {
            checksum: setup_checksum,
            entries: seek.entries().to_vec(),
        }));

        Self { chunks }
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk headers with continuation flags resolved.
    pub fn headers(&self) -> Result<Vec<ChunkHeader>, ChunkError> {
        let last = self.chunks.len().saturating_sub(1);
        self.chunks
            .iter()
            .enumerate()
            .map(|(i, c)| -> Result<ChunkHeader, ChunkError> {
                let len = c.body_len();
                let size = u32::try_from(len).map_err(|_| ChunkError::BodyTooLarge { len })?;
                Ok(ChunkHeader {
                    has_next: i != last,
                    size,
                    chunk_type: c.chunk_type() as u8,
                })
            })
            .collect()
    }

    /// Total encoded size, headers included.
    pub fn encoded_len(&self) -> usize {
        self.chunks.iter().map(|c| ChunkHeader::LEN + c.body_len()).sum()
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), ChunkError> {
        let start = out.len();
        for (header, chunk) in self.headers()?.iter().zip(&self.chunks) {
            out.extend_from_slice(&encode_chunk_header(header)?);
            chunk.write_body(out)?;
        }
        debug_assert_eq!(out.len() - start, self.encoded_len(), "chunk chain length drift");
        Ok(())
    }
}
