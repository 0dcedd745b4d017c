//! actlint binary entry point.
//! Parses the pattern, runs the lint pipeline, and prints the report.

use actlint::cli::Cli;
use actlint::config::Settings;
use actlint::engine::WorkflowLinter;
use actlint::{lint, output};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::resolve().context("failed to resolve working directory")?;
    let engine = WorkflowLinter::initialize().context("failed to initialize lint engine")?;
    let report = lint::run_lint(&cli.pattern, &engine, &settings)
        .with_context(|| format!("lint run for `{}` failed", cli.pattern))?;
    output::print_report(&report).context("failed to write report")?;
    Ok(())
}
