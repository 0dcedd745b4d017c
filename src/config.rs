//! Runtime settings resolution.
//!
//! actlint takes no config file and no flags besides the pattern. The few
//! knobs it has are resolved from the process environment:
//! - `cwd`: base directory for relative paths in the report.
//! - `color`: on unless `NO_COLOR` is set or stdout is not a terminal.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
/// Fully-resolved settings used by the lint pipeline.
pub struct Settings {
    pub cwd: PathBuf,
    pub color: bool,
}

impl Settings {
    pub fn new(cwd: impl Into<PathBuf>, color: bool) -> Self {
        Self {
            cwd: cwd.into(),
            color,
        }
    }

    /// Resolve settings from the current process.
    pub fn resolve() -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        let color = color_enabled(
            std::env::var_os("NO_COLOR").is_some(),
            std::io::stdout().is_terminal(),
        );
        Ok(Self { cwd, color })
    }

    /// Make `path` absolute against `cwd` if it is relative.
    pub fn absolutize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

fn color_enabled(no_color: bool, is_tty: bool) -> bool {
    !no_color && is_tty
}
