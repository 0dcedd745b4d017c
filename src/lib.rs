//! actlint core library.
//!
//! Expands a glob pattern, reads the matching files in parallel, runs each
//! through a lint engine, and renders the findings with code frames.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Runtime settings resolved from the environment.
//! - `files`: Pattern expansion and parallel reads.
//! - `engine`: The `LintEngine` seam, the invoker, and the built-in workflow checks.
//! - `frame`: Code excerpt rendering.
//! - `output`: Report rendering and printing.
//! - `lint`: The end-to-end pipeline.
//! - `models`: Records passed between stages.
//! - `error`: Error types.
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod files;
pub mod frame;
pub mod lint;
pub mod models;
pub mod output;
