//! Code excerpt rendering around a 1-based line/column.
//!
//! Frames are plain text; only the metadata line above them is colored.
//!
//! ```text
//!   1 | on: push
//! > 2 | jobs:
//!     |   ^
//!   3 |   build:
//! ```

/// Context lines shown before the marked line.
pub const LINES_ABOVE: usize = 2;
/// Context lines shown after the marked line.
pub const LINES_BELOW: usize = 3;

/// Render the lines surrounding `line` and put a caret under `column`.
///
/// Locations outside the content are not an error: whatever part of the
/// window exists is shown, and the marker row is omitted when the marked
/// line does not exist.
pub fn code_frame(content: &str, line: usize, column: usize) -> String {
    let lines: Vec<&str> = content
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    let end = lines.len().min(line.saturating_add(LINES_BELOW));
    let start = line.saturating_sub(LINES_ABOVE + 1).min(end);
    let width = end.to_string().len();

    let mut rows: Vec<String> = Vec::with_capacity(end - start + 1);
    for (idx, text) in lines[start..end].iter().enumerate() {
        let number = start + idx + 1;
        let gutter = format!(" {:>width$} |", number);
        let body = if text.is_empty() {
            String::new()
        } else {
            format!(" {}", text)
        };
        if number == line {
            let blank_gutter = format!(" {:>width$} |", "");
            let pad: String = text
                .chars()
                .take(column.saturating_sub(1))
                .map(|c| if c == '\t' { '\t' } else { ' ' })
                .collect();
            rows.push(format!(">{gutter}{body}"));
            rows.push(format!(" {blank_gutter} {pad}^"));
        } else {
            rows.push(format!(" {gutter}{body}"));
        }
    }
    rows.join("\n")
}
