//! fsb5-remux
//!
//! `fsb5-remux <input> <output> [loop-start loop-end]`
//!
//! Exit codes: 0 success, 1 I/O or format error, 2 bad arguments.

mod args;
mod output;

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{debug, error, info};

use fsb5_core::remux::remux_to_writer;
use fsb5_core::source::OggVorbisSource;
use fsb5_core::telemetry::{Stage, TelemetrySnapshot};
use fsb5_core::types::RemuxError;

use crate::args::{usage_error, Cli};
use crate::output::AtomicOutput;

fn run(cli: &Cli) -> anyhow::Result<TelemetrySnapshot> {
    let file = File::open(&cli.input)
        .map_err(RemuxError::Io)
        .with_context(|| format!("could not open input file {}", cli.input.display()))?;
    let source = OggVorbisSource::open(BufReader::new(file)).map_err(RemuxError::from)?;

    let mut out = AtomicOutput::create(&cli.output)
        .map_err(RemuxError::Io)
        .with_context(|| format!("could not open output file {}", cli.output.display()))?;

    let snapshot = remux_to_writer(source, &cli.remux_options(), &mut out)?;

    out.commit()
        .map_err(RemuxError::Io)
        .with_context(|| format!("could not write output file {}", cli.output.display()))?;

    Ok(snapshot)
}

fn log_telemetry(snapshot: &TelemetrySnapshot) {
    for stage in [Stage::Read, Stage::Derive, Stage::Serialize, Stage::Write] {
        debug!("{} stage: {:.3} ms", stage, snapshot.stage_times.get_ms(stage));
    }
    debug!(
        "stages {:?} of {:?} elapsed",
        snapshot.stage_times.total(),
        snapshot.elapsed
    );
    if let Ok(json) = snapshot.to_json() {
        debug!("telemetry: {}", json);
    }
}

fn exit_code_of(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<RemuxError>()
        .map(RemuxError::exit_code)
        .unwrap_or(1)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help / --version
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            let err = usage_error(&e);
            debug!("{}", err);
            return ExitCode::from(err.exit_code());
        }
    };

    match run(&cli) {
        Ok(snapshot) => {
            log_telemetry(&snapshot);
            info!(
                "wrote {} bytes ({} packets, {} seek entries)",
                snapshot.output_bytes(),
                snapshot.counters.packets,
                snapshot.counters.packets_with_marker
            );
            info!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(exit_code_of(&e))
        }
    }
}
