//! container/layout.rs
//! Derives every header value and both paddings before any byte is written.

use log::debug;

use crate::chunks::ChunkChain;
use crate::constants::{CHUNK_REGION_ALIGN, DATA_REGION_ALIGN};
use crate::container::types::ContainerError;
use crate::fields::FieldCodes;
use crate::headers::{ContainerHeader, SampleHeader, CONTAINER_HEADER_LEN};
use crate::packets::PacketStream;
use crate::seek::SeekTable;
use crate::utils::{fit_u32, padding_for};

/// Fully resolved container plan. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerLayout {
    pub header: ContainerHeader,
    pub sample_header: SampleHeader,
    pub chain: ChunkChain,
    /// Zero bytes after the chain.
    pub chunk_padding: usize,
    /// Framed packet bytes, before padding.
    pub data_len: usize,
    /// Zero bytes after the last packet.
    pub data_padding: usize,
}

impl ContainerLayout {
    pub fn plan(
        stream: &PacketStream,
        fields: &FieldCodes,
        seek: &SeekTable,
        chain: ChunkChain,
    ) -> Result<Self, ContainerError> {
        let sample_and_chain = SampleHeader::LEN + chain.encoded_len();
        let chunk_padding = padding_for(CONTAINER_HEADER_LEN + sample_and_chain, CHUNK_REGION_ALIGN);
        let sample_header_size = sample_and_chain + chunk_padding;

        let data_len = stream.framed_size();
        let data_padding = padding_for(data_len, DATA_REGION_ALIGN);
        let data_size = data_len + data_padding;

        debug!(
            "layout: sample header region {} (+{} pad), data region {} (+{} pad)",
            sample_and_chain, chunk_padding, data_len, data_padding
        );

        let header = ContainerHeader::new(
            fit_u32(sample_header_size).ok_or(ContainerError::SizeOverflow {
                what: "sample header region",
                size: sample_header_size,
            })?,
            fit_u32(data_size).ok_or(ContainerError::SizeOverflow {
                what: "data region",
                size: data_size,
            })?,
        );

        let sample_header = SampleHeader {
            extra_param: true,
            frequency: fields.frequency.code(),
            stereo: fields.stereo,
            data_offset: 0,
            sample_count: seek.max_position(),
        };

        Ok(Self {
            header,
            sample_header,
            chain,
            chunk_padding,
            data_len,
            data_padding,
        })
    }

    /// Header + sample header + chain + chunk padding.
    pub fn chunk_region_len(&self) -> usize {
        CONTAINER_HEADER_LEN + self.header.sample_header_size as usize
    }

    pub fn data_region_len(&self) -> usize {
        self.data_len + self.data_padding
    }

    pub fn total_len(&self) -> usize {
        self.chunk_region_len() + self.data_region_len()
    }
}
