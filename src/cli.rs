//! CLI argument parsing via `clap`.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "actlint",
    version,
    about = "Lint GitHub Actions workflow files",
    long_about = "actlint — expand a glob pattern, lint every matching workflow file, and print each finding with a code frame.\n\nFindings do not change the exit status; only failures to expand, read, or lint do.",
    after_help = "Examples:\n  actlint '.github/workflows/*.yml'\n  actlint '**/*.yml'\n\nSet NO_COLOR to disable colors and RUST_LOG=debug for diagnostics on stderr.",
    arg_required_else_help = true
)]
/// Command-line arguments.
pub struct Cli {
    /// Glob pattern selecting the files to lint
    #[arg(value_name = "PATTERN")]
    pub pattern: String,
}
