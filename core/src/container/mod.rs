//! container/mod.rs
//! FSB5 container layout, serializer and conforming reader.
//!
//! Output layout:
//!
//! ```text
//! [ container header (60) ]
//! [ sample header (8) ]
//! [ chunk chain ]
//! [ chunk-region padding ]   -> header + sample header + chain is a multiple of 16
//! [ u16 len | payload ] * N
//! [ data-region padding ]    -> framed packet bytes is a multiple of 32
//! ```

pub mod types;
pub mod layout;
pub mod encode;
pub mod decode;

pub use types::ContainerError;
pub use layout::ContainerLayout;
pub use encode::encode_container;
pub use decode::{parse_container, ParsedContainer};
