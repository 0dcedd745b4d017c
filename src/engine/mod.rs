//! Lint engine seam and the per-file invoker.
//!
//! A `LintEngine` is initialized once by the caller and then handed to
//! `lint_files` by reference. The built-in engine lives in `workflow`.

pub mod locate;
pub mod workflow;

use crate::error::{EngineError, Error, Result};
use crate::models::{Diagnostic, FileRecord, ReportEntry};
use std::path::Path;

pub use workflow::WorkflowLinter;

/// Anything that can turn file content into diagnostics.
pub trait LintEngine: Send + Sync {
    fn lint(&self, content: &str, path: &Path) -> Result<Vec<Diagnostic>, EngineError>;
}

/// Run `engine` over every file, in order, and pair findings with files.
///
/// Diagnostics with an empty message are dropped.
pub fn lint_files<'a, E>(engine: &E, files: &'a [FileRecord]) -> Result<Vec<ReportEntry<'a>>>
where
    E: LintEngine + ?Sized,
{
    let mut entries = Vec::new();
    for file in files {
        let diags = engine
            .lint(&file.content, &file.path)
            .map_err(|source| Error::Engine {
                path: file.path.clone(),
                source,
            })?;
        tracing::debug!(path = %file.path.display(), diagnostics = diags.len(), "linted file");
        entries.extend(
            diags
                .into_iter()
                .filter(|d| !d.message.is_empty())
                .map(|d| ReportEntry::new(file, d)),
        );
    }
    Ok(entries)
}
