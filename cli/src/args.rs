//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use fsb5_core::remux::RemuxOptions;
use fsb5_core::types::RemuxError;
use log::warn;

#[derive(Debug, Parser)]
#[command(
    name = "fsb5-remux",
    version,
    about = "Remux a single Ogg Vorbis file into an FSB5 container"
)]
pub struct Cli {
    /// Input Ogg Vorbis file
    pub input: PathBuf,

    /// Output FSB5 file
    pub output: PathBuf,

    /// Loop start in samples (only used together with LOOP_END)
    pub loop_start: Option<u32>,

    /// Loop end in samples
    pub loop_end: Option<u32>,
}

impl Cli {
    /// Loop bounds only take effect as a pair.
    pub fn remux_options(&self) -> RemuxOptions {
        match (self.loop_start, self.loop_end) {
            (Some(start), Some(end)) => RemuxOptions::with_loop(start, end),
            (Some(start), None) => {
                warn!("loop start {} given without loop end, ignoring", start);
                RemuxOptions::default()
            }
            _ => RemuxOptions::default(),
        }
    }
}

/// Bad invocations map onto the shared error taxonomy.
pub fn usage_error(err: &clap::Error) -> RemuxError {
    RemuxError::Argument(err.kind().to_string())
}
