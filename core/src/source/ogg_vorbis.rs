//! source/ogg_vorbis.rs
//!
//! Ogg Vorbis packet source.
//!
//! Design notes:
//! - `ogg::PacketReader` does page sync and packet reassembly.
//! - `lewton` header readers validate identification, comment and setup.
//! - Losing data inside the three headers is fatal; after them, corrupt
//!   pages are logged and skipped. A packet with a fragment on the bad page
//!   is dropped whole and reading resyncs on the next page boundary.
//! - Only the last packet completed on a page carries that page's granule
//!   position, every other packet gets an undefined marker.
//! - A second chained logical stream is rejected.

use std::io::{self, Read, Seek};

use bytes::Bytes;
use lewton::header::{read_header_comment, read_header_ident, read_header_setup};
use log::{debug, info, warn};
use ogg::{OggReadError, Packet, PacketReader};

use crate::packets::PositionMarker;
use crate::source::types::{PacketSource, SourceError, SourcePacket, StreamInfo};

/// Give up on a stream that yields nothing but errors.
const MAX_CONSECUTIVE_ERRORS: u32 = 64;

pub struct OggVorbisSource<R: Read + Seek> {
    info: StreamInfo,
    packets: LogicalStream<R>,
}

/// Post-header packet loop over a single logical stream.
pub struct LogicalStream<R: Read + Seek> {
    reader: PacketReader<R>,
    serial: u32,
    /// Our logical stream has seen its end-of-stream packet.
    ended: bool,
    skipped: u64,
}

fn is_eof(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::UnexpectedEof
}

/// First packet of the file: anything short of a packet means "not Ogg".
fn read_first_packet<R: Read + Seek>(reader: &mut PacketReader<R>) -> Result<Packet, SourceError> {
    match reader.read_packet() {
        Ok(Some(p)) => Ok(p),
        Ok(None) => Err(SourceError::NotOgg),
        Err(OggReadError::ReadError(e)) if !is_eof(&e) => Err(SourceError::Io(e)),
        Err(e) => {
            debug!("first page unreadable: {}", e);
            Err(SourceError::NotOgg)
        }
    }
}

/// Next packet of `serial` during the header phase.
fn read_header_packet<R: Read + Seek>(reader: &mut PacketReader<R>, serial: u32) -> Result<Packet, SourceError> {
    loop {
        match reader.read_packet() {
            Ok(Some(p)) if p.stream_serial() == serial => return Ok(p),
            Ok(Some(p)) => {
                debug!("ignoring header-phase packet from stream 0x{:08x}", p.stream_serial());
            }
            Ok(None) => return Err(SourceError::TruncatedHeaders),
            Err(OggReadError::ReadError(e)) if is_eof(&e) => return Err(SourceError::TruncatedHeaders),
            Err(OggReadError::ReadError(e)) => return Err(SourceError::Io(e)),
            Err(e) => return Err(SourceError::CorruptHeader(e.to_string())),
        }
    }
}

impl<R: Read + Seek> OggVorbisSource<R> {
    /// Run the header phase. On success the source is positioned at the
    /// first audio packet.
    pub fn open(rdr: R) -> Result<Self, SourceError> {
        let mut reader = PacketReader::new(rdr);

        let ident_pkt = read_first_packet(&mut reader)?;
        let serial = ident_pkt.stream_serial();
        let ident = read_header_ident(&ident_pkt.data)
            .map_err(|e| SourceError::NotVorbis(format!("{:?}", e)))?;

        let comment_pkt = read_header_packet(&mut reader, serial)?;
        let comment = read_header_comment(&comment_pkt.data)
            .map_err(|e| SourceError::CorruptHeader(format!("comment: {:?}", e)))?;

        let setup_pkt = read_header_packet(&mut reader, serial)?;
        read_header_setup(
            &setup_pkt.data,
            ident.audio_channels,
            (ident.blocksize_0, ident.blocksize_1),
        )
        .map_err(|e| SourceError::CorruptHeader(format!("setup: {:?}", e)))?;

        for (key, value) in &comment.comment_list {
            info!("{}={}", key, value);
        }
        info!(
            "Bitstream is {} channel, {}Hz",
            ident.audio_channels, ident.audio_sample_rate
        );
        info!("Encoded by: {}", comment.vendor);

        let mut packets = LogicalStream::new(reader, serial);
        packets.ended = setup_pkt.last_in_stream();
        Ok(Self {
            info: StreamInfo {
                sample_rate: ident.audio_sample_rate,
                channels: ident.audio_channels,
                setup_packet: Bytes::from(setup_pkt.data),
                vendor: comment.vendor,
                comments: comment.comment_list,
            },
            packets,
        })
    }
}

impl<R: Read + Seek> LogicalStream<R> {
    /// Follow `serial` on a reader that is already past its headers.
    pub fn new(reader: PacketReader<R>, serial: u32) -> Self {
        Self { reader, serial, ended: false, skipped: 0 }
    }

    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// Pages dropped for corrupt or missing data.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    fn marker_of(pkt: &Packet) -> PositionMarker {
        if pkt.last_in_page() {
            PositionMarker::from_granule(pkt.absgp_page())
        } else {
            PositionMarker::Undefined
        }
    }

    pub fn next_packet(&mut self) -> Result<Option<SourcePacket>, SourceError> {
        let mut errors = 0u32;
        loop {
            let pkt = match self.reader.read_packet() {
                Ok(Some(p)) => p,
                Ok(None) => return Ok(None),
                Err(OggReadError::ReadError(e)) if is_eof(&e) => {
                    warn!("stream truncated: {}", e);
                    return Ok(None);
                }
                Err(OggReadError::ReadError(e)) => return Err(SourceError::Io(e)),
                Err(e) => {
                    self.skipped += 1;
                    errors += 1;
                    warn!("Corrupt or missing data in bitstream; continuing... ({})", e);
                    // Drop the partial packet and resync on the next page.
                    self.reader.delete_unread_packets();
                    if errors >= MAX_CONSECUTIVE_ERRORS {
                        warn!("giving up after {} consecutive errors", errors);
                        return Ok(None);
                    }
                    continue;
                }
            };

            if pkt.stream_serial() != self.serial {
                if self.ended && pkt.first_in_stream() {
                    return Err(SourceError::ChainedStream { serial: pkt.stream_serial() });
                }
                debug!("ignoring packet from stream 0x{:08x}", pkt.stream_serial());
                continue;
            }
            if self.ended {
                // Our stream already ended; nothing of it may follow.
                debug!("ignoring packet after end of stream");
                continue;
            }

            self.ended = pkt.last_in_stream();
            let marker = Self::marker_of(&pkt);
            return Ok(Some(SourcePacket { data: pkt.data, marker }));
        }
    }
}

impl<R: Read + Seek> PacketSource for OggVorbisSource<R> {
    fn info(&self) -> &StreamInfo {
        &self.info
    }

    fn next_packet(&mut self) -> Result<Option<SourcePacket>, SourceError> {
        self.packets.next_packet()
    }

    fn skipped(&self) -> u64 {
        self.packets.skipped()
    }
}
