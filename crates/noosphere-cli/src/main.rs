//! # validate-registry entry point
//!
//! Parses arguments, installs the tracing subscriber and maps the run
//! result onto the process exit status.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use noosphere_cli::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cli.log_level()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    match run(&cli, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
