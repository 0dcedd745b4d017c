//! Human-readable report rendering.
//!
//! Each finding becomes a metadata line followed by a code frame:
//!
//! ```text
//! .github/workflows/ci.yml:4:3 "runs-on" section is missing in job "a" [syntax-check]
//! ```

use crate::frame::code_frame;
use crate::models::ReportEntry;
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::path::Path;

/// Render all entries into one string. Empty input yields an empty string.
///
/// Paths are shown relative to `base`; this function performs no I/O.
pub fn format_report(entries: &[ReportEntry<'_>], base: &Path, color: bool) -> String {
    let mut text = String::new();
    for e in entries {
        let rel = pathdiff::diff_paths(e.path, base).unwrap_or_else(|| e.path.to_path_buf());
        let rel = rel.to_string_lossy();
        if color {
            text.push_str(&format!(
                "{}{}{}{}{} {} {}\n",
                rel.yellow(),
                ":".bright_black(),
                e.line,
                ":".bright_black(),
                e.column,
                e.message.white().bold(),
                format!("[{}]", e.kind).bright_black()
            ));
        } else {
            text.push_str(&format!(
                "{}:{}:{} {} [{}]\n",
                rel, e.line, e.column, e.message, e.kind
            ));
        }
        text.push_str(&code_frame(e.content, e.line, e.column));
        text.push('\n');
    }
    text
}

/// Print the report to stdout unless it is empty.
pub fn print_report(text: &str) -> io::Result<()> {
    write_report(&mut io::stdout().lock(), text)
}

/// Write the report followed by a newline. A closed pipe is not an error.
pub fn write_report<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    match writeln!(out, "{}", text).and_then(|_| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        res => res,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Diagnostic, FileRecord};
    use std::path::PathBuf;

    fn file(path: &str, content: &str) -> FileRecord {
        FileRecord {
            path: PathBuf::from(path),
            content: content.into(),
        }
    }

    #[test]
    fn test_empty_entries_render_nothing() {
        assert_eq!(format_report(&[], Path::new("/w"), false), "");
    }

    #[test]
    fn test_single_finding_line_and_frame() {
        let f = file("/w/a.yml", "on: push\njobs: {}");
        let entries = vec![ReportEntry::new(
            &f,
            Diagnostic::new(1, 4, "missing required key", "syntax"),
        )];
        let out = format_report(&entries, Path::new("/w"), false);
        assert_eq!(
            out,
            "a.yml:1:4 missing required key [syntax]\n\
             > 1 | on: push\n    |    ^\n  2 | jobs: {}\n"
        );
    }

    #[test]
    fn test_relative_to_base_and_ordering() {
        let a = file("/repo/.github/workflows/a.yml", "x: 1\ny: 2");
        let b = file("/repo/b.yml", "z: 3");
        let entries = vec![
            ReportEntry::new(&a, Diagnostic::new(2, 1, "m1", "k1")),
            ReportEntry::new(&a, Diagnostic::new(1, 1, "m2", "k2")),
            ReportEntry::new(&b, Diagnostic::new(1, 1, "m3", "k3")),
        ];
        let out = format_report(&entries, Path::new("/repo/.github"), false);
        let heads: Vec<&str> = out.lines().filter(|l| l.contains('[')).collect();
        assert_eq!(
            heads,
            vec!["workflows/a.yml:2:1 m1 [k1]", "workflows/a.yml:1:1 m2 [k2]", "../b.yml:1:1 m3 [k3]"]
        );
    }

    #[test]
    fn test_color_keeps_fields() {
        let f = file("/w/a.yml", "on: push");
        let entries = vec![ReportEntry::new(&f, Diagnostic::new(1, 1, "msg", "kind"))];
        let out = format_report(&entries, Path::new("/w"), true);
        assert!(out.contains('\u{1b}'));
        assert!(out.contains("a.yml"));
        assert!(out.contains("msg"));
        assert!(out.contains("[kind]"));
        let frame = out.split_once('\n').map(|(_, rest)| rest).unwrap();
        assert_eq!(frame, "> 1 | on: push\n    | ^\n");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_report_appends_newline_and_skips_empty() {
        let mut buf = Vec::new();
        write_report(&mut buf, "").unwrap();
        assert!(buf.is_empty());
        write_report(&mut buf, "a.yml:1:1 m [k]\n> 1 | x").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a.yml:1:1 m [k]\n> 1 | x\n");
    }

    #[test]
    fn test_write_report_tolerates_closed_pipe() {
        assert!(write_report(&mut ClosedPipe, "a.yml:1:1 m [k]").is_ok());
    }
}
