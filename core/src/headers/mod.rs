//! headers/mod.rs
//! Container header, bit-packed sample header and chunk headers.
//!
//! Design notes:
//! - Fixed-size 60-byte container header, little-endian fields.
//! - Sample and chunk headers are packed with explicit shifts and masks,
//!   least significant bit first, then written as little-endian words.
//!   Nothing here depends on in-memory struct layout.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
