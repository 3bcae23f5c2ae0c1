//! Sample chunk chain.
//!
//! Responsibilities:
//! - Decide which optional chunks a stream needs
//! - Keep the fixed chain order: channels, frequency, loop, seek table
//! - Encode and parse the flat chain (`has_next` means "bytes follow")

pub mod types;
pub mod chain;
pub mod decode;

pub use types::{Chunk, ChunkError, ChunkType, LoopPoints, SeekTableChunk};
pub use chain::ChunkChain;
pub use decode::parse_chunk_chain;
