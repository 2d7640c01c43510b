//! Lennard-Jones molecular dynamics command-line interface.
//!
//! Runs one simulation described by a YAML configuration file or a named
//! preset and streams per-step diagnostics to stdout (or a file).

use std::fs::File;
use std::io::Write;

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing::info;

use ljfluid::{output, runner, DiagnosticWriter, RunConfig};

/// Molecular dynamics of a Lennard-Jones fluid in a periodic box
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a YAML configuration file (takes precedence over --preset)
    #[arg(short, long)]
    config: Option<String>,

    /// Named configuration preset
    #[arg(short, long, default_value = "two-particle")]
    preset: String,

    /// Override the number of integration steps
    #[arg(long)]
    steps: Option<usize>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write the diagnostic stream to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    output::setup_logging();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => RunConfig::from_file(path)
            .wrap_err_with(|| format!("failed to load configuration from {}", path))?,
        None => RunConfig::preset(&args.preset)
            .ok_or_else(|| eyre!("unknown preset: {}", args.preset))?,
    };

    if let Some(steps) = args.steps {
        config.n_steps = steps;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate()?;

    info!(
        "running {} particles for {} steps (dt = {}, T = {})",
        config.n, config.n_steps, config.time_step, config.temperature
    );

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).wrap_err_with(|| format!("could not create {}", path))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = DiagnosticWriter::new(sink);
    let outcome = runner::run(&config, &mut writer)?;

    if let Some(last) = outcome.lambda.last() {
        info!("final order parameter {:.4}", last);
    }

    Ok(())
}
