//! Built-in GitHub Actions workflow checks.
//!
//! Diagnostics use the same kind names as actionlint (`syntax-check`,
//! `job-needs`, `expression`) and are returned sorted by position.

use super::locate::{KeyIndex, KeyLocator, Position};
use super::LintEngine;
use crate::error::EngineError;
use crate::models::Diagnostic;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;
use std::path::Path;

const WORKFLOW_KEYS: &[&str] = &[
    "concurrency",
    "defaults",
    "env",
    "jobs",
    "name",
    "on",
    "permissions",
    "run-name",
];

const JOB_KEYS: &[&str] = &[
    "concurrency",
    "container",
    "continue-on-error",
    "defaults",
    "env",
    "environment",
    "if",
    "name",
    "needs",
    "outputs",
    "permissions",
    "runs-on",
    "secrets",
    "services",
    "steps",
    "strategy",
    "timeout-minutes",
    "uses",
    "with",
];

const STEP_KEYS: &[&str] = &[
    "continue-on-error",
    "env",
    "id",
    "if",
    "name",
    "run",
    "shell",
    "timeout-minutes",
    "uses",
    "with",
    "working-directory",
];

const SYNTAX: &str = "syntax-check";
const JOB_NEEDS: &str = "job-needs";
const EXPRESSION: &str = "expression";

/// Workflow checker. Construct once with `initialize`.
pub struct WorkflowLinter {
    locator: KeyLocator,
    expr_open: Regex,
}

impl WorkflowLinter {
    /// Compile the scanners used by every `lint` call.
    pub fn initialize() -> Result<Self, EngineError> {
        let linter = Self {
            locator: KeyLocator::new()?,
            expr_open: Regex::new(r"\$\{\{")?,
        };
        tracing::debug!("workflow engine initialized");
        Ok(linter)
    }

    /// Walk every string value and flag a `${{` that is never closed.
    ///
    /// Whole scalars are scanned, so expressions folded over several lines
    /// are fine. A finding points at the opener when it can be found in the
    /// raw text, otherwise at the owning key.
    fn check_expressions(
        &self,
        value: &Value,
        path: &mut Vec<String>,
        content: &str,
        index: &KeyIndex,
        out: &mut Vec<Diagnostic>,
    ) {
        match value {
            Value::String(s) => {
                let Some(start) = self.unclosed_expression(s) else {
                    return;
                };
                let keys: Vec<&str> = path.iter().map(String::as_str).collect();
                let owner = index.find(&keys);
                let fragment = s[start..].split('\n').next().unwrap_or_default();
                let pos = locate_fragment(content, owner, fragment).unwrap_or(owner);
                out.push(at(
                    pos,
                    r#"expression "${{" is not closed with "}}""#.to_string(),
                    EXPRESSION,
                ));
            }
            Value::Mapping(map) => {
                for (k, v) in map.iter() {
                    if let Some(k) = k.as_str() {
                        path.push(k.to_string());
                        self.check_expressions(v, path, content, index, out);
                        path.pop();
                    }
                }
            }
            Value::Sequence(seq) => {
                for (i, v) in seq.iter().enumerate() {
                    path.push(i.to_string());
                    self.check_expressions(v, path, content, index, out);
                    path.pop();
                }
            }
            Value::Tagged(tagged) => {
                self.check_expressions(&tagged.value, path, content, index, out)
            }
            _ => {}
        }
    }

    fn unclosed_expression(&self, s: &str) -> Option<usize> {
        self.expr_open
            .find_iter(s)
            .find(|m| !s[m.end()..].contains("}}"))
            .map(|m| m.start())
    }
}

/// First occurrence of `fragment` at or after `from.line`.
fn locate_fragment(content: &str, from: Position, fragment: &str) -> Option<Position> {
    content
        .lines()
        .enumerate()
        .skip(from.line.saturating_sub(1))
        .find_map(|(n, line)| {
            line.find(fragment).map(|b| Position {
                line: n + 1,
                column: line[..b].chars().count() + 1,
            })
        })
}

impl LintEngine for WorkflowLinter {
    fn lint(&self, content: &str, _path: &Path) -> Result<Vec<Diagnostic>, EngineError> {
        let doc: Value = match serde_yaml::from_str(content) {
            Ok(v) => v,
            Err(e) => {
                let (line, column) = e
                    .location()
                    .map(|l| (l.line().max(1), l.column().max(1)))
                    .unwrap_or((1, 1));
                return Ok(vec![Diagnostic::new(
                    line,
                    column,
                    format!("could not parse as YAML: {e}"),
                    SYNTAX,
                )]);
            }
        };

        let index = self.locator.index(content);
        let mut out = Vec::new();
        let empty = Mapping::new();
        let root = match &doc {
            Value::Mapping(m) => m,
            Value::Null => &empty,
            _ => {
                out.push(at(
                    Position::START,
                    r#""workflow" section must be a mapping"#.to_string(),
                    SYNTAX,
                ));
                return Ok(out);
            }
        };

        check_workflow(root, &index, &mut out);
        self.check_expressions(&doc, &mut Vec::new(), content, &index, &mut out);
        out.sort_by_key(|d| (d.line, d.column));
        Ok(out)
    }
}

fn at(pos: Position, message: String, kind: &str) -> Diagnostic {
    Diagnostic::new(pos.line, pos.column, message, kind)
}

fn expected(keys: &[&str]) -> String {
    keys.iter()
        .map(|k| format!("\"{k}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

fn unknown_keys(
    map: &Mapping,
    allowed: &[&str],
    section: &str,
    base: &[&str],
    index: &KeyIndex,
    out: &mut Vec<Diagnostic>,
) {
    for key in map.keys().filter_map(Value::as_str) {
        if allowed.contains(&key) {
            continue;
        }
        let mut path = base.to_vec();
        path.push(key);
        out.push(at(
            index.find(&path),
            format!(
                "unexpected key \"{key}\" for \"{section}\" section. expected one of {}",
                expected(allowed)
            ),
            SYNTAX,
        ));
    }
}

fn check_workflow(root: &Mapping, index: &KeyIndex, out: &mut Vec<Diagnostic>) {
    if !root.contains_key("on") {
        out.push(at(
            Position::START,
            r#""on" section is missing in workflow"#.to_string(),
            SYNTAX,
        ));
    }
    unknown_keys(root, WORKFLOW_KEYS, "workflow", &[], index, out);

    let jobs = match root.get("jobs") {
        None => {
            out.push(at(
                Position::START,
                r#""jobs" section is missing in workflow"#.to_string(),
                SYNTAX,
            ));
            return;
        }
        Some(Value::Mapping(m)) => m,
        Some(Value::Null) => {
            out.push(at(
                index.find(&["jobs"]),
                r#""jobs" section should not be empty"#.to_string(),
                SYNTAX,
            ));
            return;
        }
        Some(_) => {
            out.push(at(
                index.find(&["jobs"]),
                r#""jobs" section must be a mapping"#.to_string(),
                SYNTAX,
            ));
            return;
        }
    };
    if jobs.is_empty() {
        out.push(at(
            index.find(&["jobs"]),
            r#""jobs" section should not be empty"#.to_string(),
            SYNTAX,
        ));
        return;
    }

    let ids: HashSet<&str> = jobs.keys().filter_map(Value::as_str).collect();
    for (id, job) in jobs.iter().filter_map(|(k, v)| k.as_str().map(|k| (k, v))) {
        check_job(id, job, &ids, index, out);
    }
}

fn check_job(
    id: &str,
    job: &Value,
    ids: &HashSet<&str>,
    index: &KeyIndex,
    out: &mut Vec<Diagnostic>,
) {
    let base = ["jobs", id];
    let Value::Mapping(job) = job else {
        out.push(at(
            index.find(&base),
            format!("job \"{id}\" must be a mapping"),
            SYNTAX,
        ));
        return;
    };
    unknown_keys(job, JOB_KEYS, "job", &base, index, out);

    if !job.contains_key("runs-on") && !job.contains_key("uses") {
        out.push(at(
            index.find(&base),
            format!("\"runs-on\" section is missing in job \"{id}\""),
            SYNTAX,
        ));
    }

    if let Some(needs) = job.get("needs") {
        let names: Vec<&str> = match needs {
            Value::String(s) => vec![s.as_str()],
            Value::Sequence(seq) => seq.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        };
        let pos = index.find(&["jobs", id, "needs"]);
        for name in names {
            let message = if name == id {
                format!("job \"{id}\" needs itself")
            } else if !ids.contains(name) {
                format!("job \"{id}\" needs job \"{name}\" which does not exist in this workflow")
            } else {
                continue;
            };
            out.push(at(pos, message, JOB_NEEDS));
        }
    }

    match job.get("steps") {
        Some(Value::Sequence(steps)) => {
            for (i, step) in steps.iter().enumerate() {
                check_step(id, i, step, index, out);
            }
        }
        Some(Value::Null) | None => {}
        Some(_) => out.push(at(
            index.find(&["jobs", id, "steps"]),
            r#""steps" section must be a sequence"#.to_string(),
            SYNTAX,
        )),
    }
}

fn check_step(job: &str, i: usize, step: &Value, index: &KeyIndex, out: &mut Vec<Diagnostic>) {
    let n = i.to_string();
    let base = ["jobs", job, "steps", n.as_str()];
    let Value::Mapping(step) = step else {
        out.push(at(
            index.find(&base),
            "step must be a mapping".to_string(),
            SYNTAX,
        ));
        return;
    };
    unknown_keys(step, STEP_KEYS, "step", &base, index, out);

    match (step.contains_key("run"), step.contains_key("uses")) {
        (false, false) => out.push(at(
            index.find(&base),
            r#"step must run script with "run" section or run action with "uses" section"#
                .to_string(),
            SYNTAX,
        )),
        (true, true) => out.push(at(
            index.find(&base),
            r#"step contains both "run" and "uses" sections. a step can only do one of them"#
                .to_string(),
            SYNTAX,
        )),
        _ => {}
    }
}
