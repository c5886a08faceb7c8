//! # noosphere-cli — Registry Validation Command
//!
//! Provides the `validate-registry` binary. Run from the registry
//! repository root with no arguments, it validates `registry.json` against
//! `schemas/container-schema.json` and `schemas/verifier-schema.json`:
//!
//! ```bash
//! validate-registry              # exit 0: all entries valid
//! validate-registry --root ../registry -vv
//! ```
//!
//! Exit status is 0 when every entry is valid and 1 when any entry fails or
//! an input document cannot be loaded.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use noosphere_registry::{validate_inputs, RegistryInputs, RegistryLayout};

/// Validate the Noosphere registry against its container and verifier schemas.
#[derive(Parser, Debug)]
#[command(name = "validate-registry", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Directory holding `registry.json` and `schemas/`.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,
}

impl Cli {
    /// Log filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn layout(&self) -> RegistryLayout {
        RegistryLayout::with_root(&self.root)
    }
}

/// Load, validate and report.
///
/// Returns the exit code for a completed run (0 or 1). Load and compile
/// failures are returned as errors before anything is written to `out`.
pub fn run(cli: &Cli, out: &mut impl Write, err: &mut impl Write) -> Result<u8> {
    let layout = cli.layout();
    tracing::debug!(root = %layout.root().display(), "validating registry");

    let inputs = RegistryInputs::load(&layout).context("failed to load registry inputs")?;
    let report = validate_inputs(&inputs).context("failed to compile registry schemas")?;

    report
        .render(out, err)
        .context("failed to write validation report")?;

    Ok(report.exit_code())
}
