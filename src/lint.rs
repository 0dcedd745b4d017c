//! Lint pipeline: expand, read, lint, format.
//!
//! `run_lint` is pure apart from the filesystem reads; printing is left to
//! the caller so the report can be inspected in tests.

use crate::config::Settings;
use crate::engine::{lint_files, LintEngine};
use crate::error::Result;
use crate::files::{expand, read_files};
use crate::output::format_report;
use std::path::PathBuf;

/// Run the whole pipeline for `pattern` and return the rendered report.
///
/// An empty string means there is nothing to print.
pub fn run_lint<E>(pattern: &str, engine: &E, settings: &Settings) -> Result<String>
where
    E: LintEngine + ?Sized,
{
    let paths: Vec<PathBuf> = expand(pattern)?
        .iter()
        .map(|p| settings.absolutize(p))
        .collect();
    let files = read_files(&paths)?;
    let entries = lint_files(engine, &files)?;
    tracing::debug!(files = files.len(), findings = entries.len(), "lint finished");
    Ok(format_report(&entries, &settings.cwd, settings.color))
}
