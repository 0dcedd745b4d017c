//! Pattern expansion and parallel file reading.

use crate::error::{Error, Result};
use crate::models::FileRecord;
use glob::glob;
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;

/// Expand `pattern` into the regular files it matches, in glob order.
///
/// Matching nothing is not an error. Directories are skipped.
pub fn expand(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob(pattern).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?;
        if path.is_file() {
            paths.push(path);
        }
    }
    tracing::debug!(pattern, matched = paths.len(), "expanded pattern");
    Ok(paths)
}

/// Read every path concurrently. Output order matches input order.
///
/// The first failing read aborts the whole batch.
pub fn read_files(paths: &[PathBuf]) -> Result<Vec<FileRecord>> {
    let files = paths
        .par_iter()
        .map(|path| {
            fs::read_to_string(path)
                .map(|content| FileRecord {
                    path: path.clone(),
                    content,
                })
                .map_err(|source| Error::Read {
                    path: path.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(files = files.len(), "read files");
    Ok(files)
}
