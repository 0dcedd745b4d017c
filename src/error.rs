//! Error types for the lint pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a run. None of them are recovered from.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid glob pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to expand glob pattern")]
    Glob(#[from] glob::GlobError),

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lint engine failed on {}", path.display())]
    Engine {
        path: PathBuf,
        #[source]
        source: EngineError,
    },
}

/// Faults raised from inside a lint engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to initialize engine: {0}")]
    Init(String),

    #[error("{0}")]
    Other(String),
}

impl From<regex::Error> for EngineError {
    fn from(e: regex::Error) -> Self {
        EngineError::Init(e.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
