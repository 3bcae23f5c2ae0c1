//! telemetry/mod.rs
//! Counters, stage timers and an immutable snapshot for one remux run.
//!
//! Notes:
//! - Counters are plain integers; the pipeline is single-threaded.
//! - The snapshot is serde-serializable so callers can log or persist it.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
