//! chunks/decode.rs
//! Parse a chunk chain by following `has_next`.

use byteorder::{ByteOrder, LittleEndian};

use crate::chunks::types::{Chunk, ChunkError, ChunkType, LoopPoints, SeekTableChunk};
use crate::headers::{decode_chunk_header, ChunkHeader};
use crate::seek::SeekTableEntry;

fn expect_size(chunk_type: ChunkType, expected: usize, actual: usize) -> Result<(), ChunkError> {
    if expected != actual {
        return Err(ChunkError::SizeMismatch { chunk_type, expected, actual });
    }
    Ok(())
}

fn parse_body(chunk_type: ChunkType, body: &[u8]) -> Result<Chunk, ChunkError> {
    match chunk_type {
        ChunkType::Channels => {
            expect_size(chunk_type, 1, body.len())?;
            Ok(Chunk::Channels(body[0]))
        }
        ChunkType::Frequency => {
            expect_size(chunk_type, 4, body.len())?;
            Ok(Chunk::Frequency(LittleEndian::read_u32(body)))
        }
        ChunkType::Loop => {
            expect_size(chunk_type, 8, body.len())?;
            Ok(Chunk::Loop(LoopPoints {
                start: LittleEndian::read_u32(&body[0..4]),
                end: LittleEndian::read_u32(&body[4..8]),
            }))
        }
        ChunkType::VorbisSeekTable => {
            if body.len() < SeekTableChunk::FIXED_LEN {
                return Err(ChunkError::Truncated { need: SeekTableChunk::FIXED_LEN, have: body.len() });
            }
            let checksum = LittleEndian::read_u32(&body[0..4]);
            let table_len = LittleEndian::read_u32(&body[4..8]) as usize;
            let table = &body[SeekTableChunk::FIXED_LEN..];
            expect_size(chunk_type, SeekTableChunk::FIXED_LEN + table_len, body.len())?;
            if table_len % SeekTableEntry::LEN != 0 {
                return Err(ChunkError::SizeMismatch {
                    chunk_type,
                    expected: table_len - table_len % SeekTableEntry::LEN,
                    actual: table_len,
                });
            }
            let entries = table
                .chunks_exact(SeekTableEntry::LEN)
                .map(|e| SeekTableEntry {
                    position: LittleEndian::read_u32(&e[0..4]),
                    offset: LittleEndian::read_u32(&e[4..8]),
                })
                .collect();
            Ok(Chunk::SeekTable(SeekTableChunk { checksum, entries }))
        }
    }
}

/// Parse chunks from the start of `buf`.
///
/// Returns the chunks with their headers and the number of bytes consumed.
/// The chain must end with the seek table chunk.
pub fn parse_chunk_chain(buf: &[u8]) -> Result<(Vec<(ChunkHeader, Chunk)>, usize), ChunkError> {
    let mut chunks = Vec::new();
    let mut off = 0usize;

    loop {
        let header = decode_chunk_header(&buf[off.min(buf.len())..])?;
        off += ChunkHeader::LEN;

        let size = header.size as usize;
        if buf.len() < off + size {
            return Err(ChunkError::Truncated { need: off + size, have: buf.len() });
        }
        let chunk_type = ChunkType::try_from(header.chunk_type)
            .map_err(|_| ChunkError::UnknownType(header.chunk_type))?;
        let chunk = parse_body(chunk_type, &buf[off..off + size])?;
        off += size;

        let is_seek = matches!(chunk, Chunk::SeekTable(_));
        chunks.push((header, chunk));

        if !header.has_next {
            if !is_seek {
                return Err(ChunkError::MissingSeekTable);
            }
            break;
        }
        if is_seek {
            return Err(ChunkError::SeekTableNotLast);
        }
    }

    Ok((chunks, off))
}
