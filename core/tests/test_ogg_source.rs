// Ogg Vorbis source: header phase and the packet loop that follows it.
//
// Input streams are produced with `ogg::PacketWriter` so page framing and
// CRCs are real. `data/setup_mono.bin` is a minimal valid Vorbis setup header
// (one codebook, floor 1, residue 0, one mapping, one mode).

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ogg::{PacketReader, PacketWriteEndInfo, PacketWriter};
    use fsb5_core::container::parse_container;
    use fsb5_core::packets::PositionMarker;
    use fsb5_core::remux::{remux, RemuxOptions};
    use fsb5_core::source::{LogicalStream, OggVorbisSource, PacketSource, SourceError};
    use fsb5_core::types::{ErrorKind, RemuxError};

    const SERIAL: u32 = 0x1234_5678;
    const OTHER: u32 = 0x0BAD_F00D;
    const SETUP: &[u8] = include_bytes!("data/setup_mono.bin");

    fn ident_header(channels: u8, rate: u32) -> Vec<u8> {
        let mut h = b"\x01vorbis".to_vec();
        h.extend_from_slice(&0u32.to_le_bytes()); // version
        h.push(channels);
        h.extend_from_slice(&rate.to_le_bytes());
        h.extend_from_slice(&0i32.to_le_bytes()); // bitrate max
        h.extend_from_slice(&128_000i32.to_le_bytes()); // bitrate nominal
        h.extend_from_slice(&0i32.to_le_bytes()); // bitrate min
        h.push(0xB8); // blocksizes 256 / 2048
        h.push(1); // framing
        h
    }

    fn comment_header(vendor: &str) -> Vec<u8> {
        let mut h = b"\x03vorbis".to_vec();
        h.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
        h.extend_from_slice(vendor.as_bytes());
        h.extend_from_slice(&0u32.to_le_bytes());
        h.push(1);
        h
    }

    /// (payload, serial, end info, granule)
    type Entry = (Vec<u8>, u32, PacketWriteEndInfo, u64);

    fn ogg_bytes(packets: Vec<Entry>) -> Vec<u8> {
        let mut w = PacketWriter::new(Vec::new());
        for (data, serial, end, granule) in packets {
            w.write_packet(data, serial, end, granule).unwrap();
        }
        w.into_inner()
    }

    fn ogg_stream(packets: Vec<(Vec<u8>, PacketWriteEndInfo)>) -> Vec<u8> {
        ogg_bytes(packets.into_iter().map(|(d, e)| (d, SERIAL, e, 0)).collect())
    }

    /// Three valid headers on their own pages, ready for audio packets.
    fn vorbis_headers(channels: u8, rate: u32) -> Vec<Entry> {
        vec![
            (ident_header(channels, rate), SERIAL, PacketWriteEndInfo::EndPage, 0),
            (comment_header("unit-test"), SERIAL, PacketWriteEndInfo::NormalPacket, 0),
            (SETUP.to_vec(), SERIAL, PacketWriteEndInfo::EndPage, 0),
        ]
    }

    /// (start, len) of every page.
    fn page_spans(bytes: &[u8]) -> Vec<(usize, usize)> {
        let mut pages = Vec::new();
        let mut at = 0;
        while at + 27 <= bytes.len() {
            assert_eq!(&bytes[at..at + 4], b"OggS");
            let segments = bytes[at + 26] as usize;
            let body: usize = bytes[at + 27..at + 27 + segments].iter().map(|&b| b as usize).sum();
            let len = 27 + segments + body;
            pages.push((at, len));
            at += len;
        }
        pages
    }

    fn logical(bytes: Vec<u8>) -> LogicalStream<Cursor<Vec<u8>>> {
        LogicalStream::new(PacketReader::new(Cursor::new(bytes)), SERIAL)
    }

    fn drain(stream: &mut LogicalStream<Cursor<Vec<u8>>>) -> Vec<(usize, PositionMarker)> {
        let mut out = Vec::new();
        while let Some(p) = stream.next_packet().unwrap() {
            out.push((p.data.len(), p.marker));
        }
        out
    }

    fn open(bytes: Vec<u8>) -> Result<OggVorbisSource<Cursor<Vec<u8>>>, SourceError> {
        OggVorbisSource::open(Cursor::new(bytes))
    }

    fn kind_of(err: SourceError) -> ErrorKind {
        RemuxError::from(err).kind()
    }

// # ✅ 1. Not Ogg at all

    #[test]
    fn empty_input() {
        let err = open(Vec::new()).err().unwrap();
        assert!(matches!(err, SourceError::NotOgg));
        assert_eq!(kind_of(err), ErrorKind::Format);
    }

    #[test]
    fn garbage_input() {
        let err = open(b"RIFF\x24\x00\x00\x00WAVEfmt garbage garbage garbage".to_vec()).err().unwrap();
        assert!(matches!(err, SourceError::NotOgg));
    }

// # ✅ 2. Ogg, but not Vorbis

    #[test]
    fn opus_stream_is_not_vorbis() {
        let mut head = b"OpusHead".to_vec();
        head.extend_from_slice(&[1, 2, 0x38, 0x01, 0x80, 0xBB, 0, 0, 0, 0, 0]);
        let bytes = ogg_stream(vec![(head, PacketWriteEndInfo::EndStream)]);

        let err = open(bytes).err().unwrap();
        assert!(matches!(err, SourceError::NotVorbis(_)));
        assert_eq!(kind_of(err), ErrorKind::Format);
    }

// # ✅ 3. Missing or broken secondary headers

    #[test]
    fn stream_ends_after_ident() {
        let bytes = ogg_stream(vec![(ident_header(2, 44100), PacketWriteEndInfo::EndStream)]);
        let err = open(bytes).err().unwrap();
        assert!(matches!(err, SourceError::TruncatedHeaders));
        assert_eq!(kind_of(err), ErrorKind::Format);
    }

    #[test]
    fn bogus_setup_header() {
        let mut setup = b"\x05vorbis".to_vec();
        setup.extend_from_slice(&[0xFF; 24]);
        let bytes = ogg_stream(vec![
            (ident_header(1, 48000), PacketWriteEndInfo::EndPage),
            (comment_header("unit-test"), PacketWriteEndInfo::NormalPacket),
            (setup, PacketWriteEndInfo::EndStream),
        ]);

        let err = open(bytes).err().unwrap();
        assert!(matches!(err, SourceError::CorruptHeader(_)), "got {:?}", err);
        assert_eq!(kind_of(err), ErrorKind::Format);
    }

    #[test]
    fn comment_header_with_wrong_type() {
        let bytes = ogg_stream(vec![
            (ident_header(1, 48000), PacketWriteEndInfo::EndPage),
            (b"\x07vorbis-not-a-comment".to_vec(), PacketWriteEndInfo::EndStream),
        ]);
        let err = open(bytes).err().unwrap();
        assert!(matches!(err, SourceError::CorruptHeader(_)), "got {:?}", err);
    }

// # ✅ 4. Valid headers

    #[test]
    fn setup_is_the_third_header() {
        let mut packets = vorbis_headers(1, 44100);
        packets.push((vec![0x11; 40], SERIAL, PacketWriteEndInfo::EndStream, 128));
        let source = open(ogg_bytes(packets)).unwrap();

        let info = source.info();
        assert_eq!(info.sample_rate, 44100);
        assert_eq!(info.channels, 1);
        assert_eq!(info.vendor, "unit-test");
        assert_eq!(&info.setup_packet[..], SETUP);
    }

    #[test]
    fn foreign_packets_between_headers_are_skipped() {
        let packets = vec![
            (ident_header(1, 22050), SERIAL, PacketWriteEndInfo::EndPage, 0),
            (b"other-bos".to_vec(), OTHER, PacketWriteEndInfo::EndPage, 0),
            (comment_header("unit-test"), SERIAL, PacketWriteEndInfo::EndPage, 0),
            (b"other-data".to_vec(), OTHER, PacketWriteEndInfo::EndPage, 0),
            (SETUP.to_vec(), SERIAL, PacketWriteEndInfo::EndPage, 0),
            (vec![0x22; 20], SERIAL, PacketWriteEndInfo::EndStream, 64),
        ];
        let mut source = open(ogg_bytes(packets)).unwrap();
        assert_eq!(&source.info().setup_packet[..], SETUP);

        let first = source.next_packet().unwrap().unwrap();
        assert_eq!(first.data, vec![0x22; 20]);
        assert_eq!(first.marker, PositionMarker::Defined(64));
        assert!(source.next_packet().unwrap().is_none());
    }

    #[test]
    fn remux_checksums_the_setup_header() {
        let mut packets = vorbis_headers(1, 44100);
        packets.push((vec![0x33; 30], SERIAL, PacketWriteEndInfo::NormalPacket, 256));
        packets.push((vec![0x44; 30], SERIAL, PacketWriteEndInfo::EndStream, 256));
        let source = open(ogg_bytes(packets)).unwrap();

        let out = remux(source, &RemuxOptions::default()).unwrap();
        assert_eq!(out.setup_checksum, crc32fast::hash(SETUP));
        assert_ne!(out.setup_checksum, crc32fast::hash(&comment_header("unit-test")));

        let c = parse_container(&out.bytes).unwrap();
        assert_eq!(c.packets.len(), 2);
        assert_eq!(c.sample_header.sample_count, 256);
        assert_eq!(c.seek_table().unwrap().entries.len(), 1);
    }

// # ✅ 5. Position markers

    #[test]
    fn only_the_last_packet_on_a_page_gets_the_granule() {
        let bytes = ogg_bytes(vec![
            (vec![1; 10], SERIAL, PacketWriteEndInfo::NormalPacket, 100),
            (vec![2; 20], SERIAL, PacketWriteEndInfo::NormalPacket, 100),
            (vec![3; 30], SERIAL, PacketWriteEndInfo::EndPage, 100),
            (vec![4; 40], SERIAL, PacketWriteEndInfo::EndStream, 300),
        ]);
        let got = drain(&mut logical(bytes));
        assert_eq!(
            got,
            vec![
                (10, PositionMarker::Undefined),
                (20, PositionMarker::Undefined),
                (30, PositionMarker::Defined(100)),
                (40, PositionMarker::Defined(300)),
            ]
        );
    }

    #[test]
    fn all_ones_granule_is_undefined() {
        let bytes = ogg_bytes(vec![
            (vec![1; 10], SERIAL, PacketWriteEndInfo::EndPage, u64::MAX),
            (vec![2; 10], SERIAL, PacketWriteEndInfo::EndStream, 50),
        ]);
        let got = drain(&mut logical(bytes));
        assert_eq!(got, vec![(10, PositionMarker::Undefined), (10, PositionMarker::Defined(50))]);
    }

// # ✅ 6. Other logical streams

    #[test]
    fn multiplexed_stream_is_ignored() {
        let bytes = ogg_bytes(vec![
            (vec![1; 10], SERIAL, PacketWriteEndInfo::EndPage, 10),
            (vec![9; 99], OTHER, PacketWriteEndInfo::EndPage, 5),
            (vec![2; 10], SERIAL, PacketWriteEndInfo::EndPage, 20),
            (vec![9; 99], OTHER, PacketWriteEndInfo::EndStream, 6),
            (vec![3; 10], SERIAL, PacketWriteEndInfo::EndStream, 30),
        ]);
        let got = drain(&mut logical(bytes));
        let markers: Vec<PositionMarker> = got.iter().map(|(_, m)| *m).collect();
        assert_eq!(
            markers,
            vec![PositionMarker::Defined(10), PositionMarker::Defined(20), PositionMarker::Defined(30)]
        );
    }

    #[test]
    fn chained_stream_is_rejected() {
        let bytes = ogg_bytes(vec![
            (vec![1; 10], SERIAL, PacketWriteEndInfo::EndStream, 10),
            (vec![2; 10], OTHER, PacketWriteEndInfo::EndStream, 10),
        ]);
        let mut stream = logical(bytes);
        assert!(stream.next_packet().unwrap().is_some());

        let err = stream.next_packet().unwrap_err();
        assert!(matches!(err, SourceError::ChainedStream { serial: OTHER }), "got {:?}", err);
        assert_eq!(kind_of(err), ErrorKind::Format);
    }

// # ✅ 7. Corrupt pages after the headers

    /// One small packet, one packet spanning three pages, then ten small ones.
    fn spanning_stream() -> Vec<u8> {
        let mut packets: Vec<Entry> = vec![
            (vec![0x01; 10], SERIAL, PacketWriteEndInfo::EndPage, 0),
            (vec![0x02; 140_000], SERIAL, PacketWriteEndInfo::EndPage, 100),
        ];
        for i in 0..10u64 {
            let end = if i == 9 { PacketWriteEndInfo::EndStream } else { PacketWriteEndInfo::EndPage };
            packets.push((vec![0x03; 50], SERIAL, end, 200 + i));
        }
        ogg_bytes(packets)
    }

    fn expected_tail() -> Vec<(usize, PositionMarker)> {
        (0..10u64).map(|i| (50, PositionMarker::Defined(200 + i))).collect()
    }

    #[test]
    fn intact_spanning_stream() {
        let bytes = spanning_stream();
        assert_eq!(page_spans(&bytes).len(), 14);

        let got = drain(&mut logical(bytes));
        assert_eq!(got[1], (140_000, PositionMarker::Defined(100)));
        assert_eq!(got.len(), 12);
    }

    #[test]
    fn corrupt_final_page_of_spanning_packet_is_skipped() {
        let mut bytes = spanning_stream();
        let (start, len) = page_spans(&bytes)[3];
        bytes[start + len - 5] ^= 0xFF;

        let mut stream = logical(bytes);
        let got = drain(&mut stream);

        let mut want = vec![(10, PositionMarker::Defined(0))];
        want.extend(expected_tail());
        assert_eq!(got, want);
        assert_eq!(stream.skipped(), 1);
    }

    #[test]
    fn corrupt_middle_page_never_splices_fragments() {
        let mut bytes = spanning_stream();
        let (start, len) = page_spans(&bytes)[2];
        bytes[start + len / 2] ^= 0xFF;

        let mut stream = logical(bytes);
        let got = drain(&mut stream);

        // Nothing but the packets that never touched the bad page.
        assert!(got.iter().all(|(n, _)| *n == 10 || *n == 50), "got {:?}", got);
        assert_eq!(got[0], (10, PositionMarker::Defined(0)));
        assert_eq!(got[got.len() - 10..], expected_tail()[..]);
        assert!(stream.skipped() >= 1);
    }

    #[test]
    fn remux_counts_skipped_pages() {
        let mut packets = vorbis_headers(1, 48000);
        for i in 1..=3u64 {
            let end = if i == 3 { PacketWriteEndInfo::EndStream } else { PacketWriteEndInfo::EndPage };
            packets.push((vec![i as u8; 64], SERIAL, end, i * 128));
        }
        let mut bytes = ogg_bytes(packets);
        let pages = page_spans(&bytes);
        assert_eq!(pages.len(), 5);
        let (start, len) = pages[3];
        bytes[start + len - 1] ^= 0x55;

        let out = remux(open(bytes).unwrap(), &RemuxOptions::default()).unwrap();
        assert_eq!(out.counters.packets_skipped, 1);

        let c = parse_container(&out.bytes).unwrap();
        assert_eq!(c.packets, vec![&[1u8; 64][..], &[3u8; 64][..]]);
        assert_eq!(c.sample_header.sample_count, 384);
    }
}
