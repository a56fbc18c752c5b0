//! # countlines
//!
//! Counts code, comment, and blank lines in a directory tree. With `--web`
//! it serves the same count over HTTP for the browser UI instead.
//!
//! Set `COUNTLINES_LOG` (for example `COUNTLINES_LOG=debug`) to see which
//! paths are excluded or skipped.

use std::process::ExitCode;

use clap::error::ErrorKind;
use countlines::cli::{build_command, parse_invocation, run};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("COUNTLINES_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();

    let matches = match build_command().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let result = parse_invocation(&matches).and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
