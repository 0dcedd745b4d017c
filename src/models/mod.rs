//! Shared data models passed between the reader, the engine, and the printer.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A file discovered by pattern expansion together with its text.
pub struct FileRecord {
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single finding reported by a lint engine.
///
/// `line` and `column` are 1-based. An empty `message` means "no finding".
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub kind: String,
}

impl Diagnostic {
    pub fn new(line: usize, column: usize, message: impl Into<String>, kind: &str) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            kind: kind.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A diagnostic paired with the file it was found in.
pub struct ReportEntry<'a> {
    pub path: &'a Path,
    pub content: &'a str,
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub kind: String,
}

impl<'a> ReportEntry<'a> {
    pub fn new(file: &'a FileRecord, diag: Diagnostic) -> Self {
        Self {
            path: &file.path,
            content: &file.content,
            line: diag.line,
            column: diag.column,
            message: diag.message,
            kind: diag.kind,
        }
    }
}
