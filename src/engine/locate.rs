//! Line-based key locator for block-style YAML.
//!
//! The YAML parser gives us structure but no node positions, so this scans
//! the raw text once and records where each mapping key and sequence item
//! starts. Paths are dot-joined: `jobs.build.steps.0.run`.
//! Flow collections (`{...}`, `[...]`) are not descended into.

use regex::Regex;
use std::collections::HashMap;

/// 1-based line/column of a key or sequence item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const START: Position = Position { line: 1, column: 1 };
}

/// Compiled scanner; build once and reuse across files.
pub struct KeyLocator {
    key_re: Regex,
}

struct Frame {
    indent: usize,
    path: String,
    item: bool,
}

impl KeyLocator {
    pub fn new() -> Result<Self, regex::Error> {
        let key_re = Regex::new(
            r#"^(?:"([^"]+)"|'([^']+)'|([^\s:#"'\[\]{},&*!|>%@`-][^:#]*?))[ \t]*:(?:[ \t]+(.*))?$"#,
        )?;
        Ok(Self { key_re })
    }

    /// Scan `content` and return the positions of every block key.
    pub fn index(&self, content: &str) -> KeyIndex {
        let mut positions: HashMap<String, Position> = HashMap::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut items: HashMap<String, usize> = HashMap::new();
        let mut block_scalar: Option<usize> = None;

        for (n, raw) in content.lines().enumerate() {
            let line_no = n + 1;
            let trimmed = raw.trim_start_matches(' ');
            let indent = raw.len() - trimmed.len();
            if trimmed.trim().is_empty() {
                continue;
            }
            if let Some(owner) = block_scalar {
                if indent > owner {
                    continue;
                }
                block_scalar = None;
            }
            if trimmed.starts_with('#') || trimmed.starts_with("---") || trimmed.starts_with("...")
            {
                continue;
            }

            let mut col = indent;
            let mut rest = trimmed.trim_end();
            if rest == "-" || rest.starts_with("- ") {
                while stack
                    .last()
                    .is_some_and(|f| f.indent > col || (f.indent == col && f.item))
                {
                    stack.pop();
                }
                let parent = stack.last().map(|f| f.path.clone()).unwrap_or_default();
                let counter = items.entry(parent.clone()).or_insert(0);
                let path = join(&parent, &counter.to_string());
                *counter += 1;
                positions.entry(path.clone()).or_insert(Position {
                    line: line_no,
                    column: col + 1,
                });
                stack.push(Frame {
                    indent: col,
                    path,
                    item: true,
                });
                let after = rest[1..].trim_start_matches(' ');
                col += rest.len() - after.len();
                rest = after;
                if rest.is_empty() {
                    continue;
                }
            }

            let Some(caps) = self.key_re.captures(rest) else {
                continue;
            };
            let key = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();
            while stack.last().is_some_and(|f| f.indent >= col) {
                stack.pop();
            }
            let parent = stack.last().map(|f| f.path.as_str()).unwrap_or("");
            let path = join(parent, key);
            positions.entry(path.clone()).or_insert(Position {
                line: line_no,
                column: col + 1,
            });
            let value = caps.get(4).map(|m| m.as_str()).unwrap_or("");
            if value.starts_with('|') || value.starts_with('>') {
                block_scalar = Some(col);
            }
            stack.push(Frame {
                indent: col,
                path,
                item: false,
            });
        }
        KeyIndex { positions }
    }
}

fn join(parent: &str, seg: &str) -> String {
    if parent.is_empty() {
        seg.to_string()
    } else {
        format!("{parent}.{seg}")
    }
}

/// Key positions for one document.
#[derive(Debug, Default)]
pub struct KeyIndex {
    positions: HashMap<String, Position>,
}

impl KeyIndex {
    /// Exact position of `path`, if it was seen.
    pub fn get(&self, path: &[&str]) -> Option<Position> {
        self.positions.get(&path.join(".")).copied()
    }

    /// Position of `path`, falling back to the closest located ancestor.
    pub fn find(&self, path: &[&str]) -> Position {
        (0..=path.len())
            .rev()
            .find_map(|len| self.get(&path[..len]))
            .unwrap_or(Position::START)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, column: usize) -> Option<Position> {
        Some(Position { line, column })
    }

    const WORKFLOW: &str = r#"name: ci
on: push

jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - name: test
        run: |
          cargo test
          name: not-a-key
  "lint":
    steps:
    - run: echo hi
"#;

    #[test]
    fn test_top_level_and_nested_keys() {
        let idx = KeyLocator::new().unwrap().index(WORKFLOW);
        assert_eq!(idx.get(&["name"]), pos(1, 1));
        assert_eq!(idx.get(&["on"]), pos(2, 1));
        assert_eq!(idx.get(&["jobs", "build"]), pos(5, 3));
        assert_eq!(idx.get(&["jobs", "build", "runs-on"]), pos(6, 5));
    }

    #[test]
    fn test_sequence_items_are_indexed() {
        let idx = KeyLocator::new().unwrap().index(WORKFLOW);
        assert_eq!(idx.get(&["jobs", "build", "steps", "0"]), pos(8, 7));
        assert_eq!(idx.get(&["jobs", "build", "steps", "0", "uses"]), pos(8, 9));
        assert_eq!(idx.get(&["jobs", "build", "steps", "1", "name"]), pos(9, 9));
        assert_eq!(idx.get(&["jobs", "build", "steps", "1", "run"]), pos(10, 9));
    }

    #[test]
    fn test_block_scalars_and_quoted_keys() {
        let idx = KeyLocator::new().unwrap().index(WORKFLOW);
        assert_eq!(idx.get(&["jobs", "build", "steps", "1", "name", "name"]), None);
        assert_eq!(idx.get(&["jobs", "build", "steps", "1", "run", "name"]), None);
        assert_eq!(idx.get(&["jobs", "lint"]), pos(13, 3));
        // Sequence at the same indent as its parent key.
        assert_eq!(idx.get(&["jobs", "lint", "steps", "0", "run"]), pos(15, 7));
    }

    #[test]
    fn test_non_ascii_and_spaced_keys() {
        let src = "on: push\njobs:\n  é:\n    runs-on: x\n    foo: 1\n  build docs :\n    runs-on: y\n";
        let idx = KeyLocator::new().unwrap().index(src);
        assert_eq!(idx.get(&["jobs", "é"]), pos(3, 3));
        assert_eq!(idx.get(&["jobs", "é", "foo"]), pos(5, 5));
        assert_eq!(idx.get(&["jobs", "build docs"]), pos(6, 3));
        assert_eq!(idx.get(&["jobs", "build docs", "runs-on"]), pos(7, 5));
    }

    #[test]
    fn test_scalars_with_colons_are_not_keys() {
        let src = "on: push\nenv:\n  URL: http://example.com\n  [a, b]\n";
        let idx = KeyLocator::new().unwrap().index(src);
        assert_eq!(idx.get(&["env", "URL"]), pos(3, 3));
        assert_eq!(idx.get(&["env", "URL", "http"]), None);
        assert_eq!(idx.get(&["env", "[a, b]"]), None);
    }

    #[test]
    fn test_find_falls_back_to_ancestor() {
        let idx = KeyLocator::new().unwrap().index(WORKFLOW);
        assert_eq!(
            idx.find(&["jobs", "build", "needs"]),
            Position { line: 5, column: 3 }
        );
        assert_eq!(idx.find(&["missing"]), Position::START);
    }
}
