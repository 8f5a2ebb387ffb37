//! Line-oriented parser for `tasks.md` documents.
//!
//! Grammar, per line:
//!
//! ```text
//! - [ ] 1. Top-level task            pending
//! - [-] 1.2 Nested task              in-progress
//!   - _Prompt: Role: ... | Task: ..._
//!   - _Leverage: src/db.rs, src/api/mod.rs_
//!   - _Requirements: 1.1, 2.3_
//! - [x] 2. Done                      completed
//! ```
//!
//! Sub-lines indented deeper than a task line attach to that task until a
//! non-blank line at the same or lesser indentation.

use std::collections::HashSet;

use serde::Serialize;

use super::task::{Task, TaskStatus, TaskSummary};

/// Non-fatal anomaly found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    /// 1-based line number in the source document.
    pub line: usize,
    /// What was wrong with the line.
    pub message: String,
}

/// Result of parsing one task document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedTasks {
    /// Tasks in document order.
    pub tasks: Vec<Task>,
    /// Status counts over `tasks`.
    pub summary: TaskSummary,
    /// Lines that were skipped or defaulted.
    pub warnings: Vec<ParseWarning>,
}

impl ParsedTasks {
    /// Looks up a task by its exact identifier.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

/// Checkbox line split into its parts.
struct CheckboxLine<'a> {
    marker: &'a str,
    rest: &'a str,
}

/// Parses a task document. Never fails; see [`ParsedTasks::warnings`].
#[must_use]
pub fn parse(document: &str) -> ParsedTasks {
    let mut tasks: Vec<Task> = Vec::new();
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();
    // Indentation of the open task line and the task its sub-lines feed
    // (`None` when the task was dropped as a duplicate).
    let mut open: Option<(usize, Option<usize>)> = None;

    for (idx, raw) in document.lines().enumerate() {
        let line_no = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let indent = indentation(raw);
        let trimmed = raw.trim();

        // A multi-character bracket without an id is ordinary bracketed text.
        let checkbox = split_checkbox(trimmed)
            .filter(|c| c.marker.chars().count() <= 1 || split_id(c.rest).is_some());
        if let Some(checkbox) = checkbox {
            open = None;
            let Some((id, description)) = split_id(checkbox.rest) else {
                warnings.push(ParseWarning {
                    line: line_no,
                    message: format!("checkbox line has no task id: {trimmed}"),
                });
                continue;
            };
            let status = status_for(checkbox.marker).unwrap_or_else(|| {
                warnings.push(ParseWarning {
                    line: line_no,
                    message: format!(
                        "unrecognised marker '[{}]' on task {id}, treating as pending",
                        checkbox.marker
                    ),
                });
                TaskStatus::Pending
            });
            if !seen.insert(id.to_string()) {
                warnings.push(ParseWarning {
                    line: line_no,
                    message: format!("duplicate task id {id}, keeping the first occurrence"),
                });
                open = Some((indent, None));
                continue;
            }
            tasks.push(Task {
                id: id.to_string(),
                status,
                description: description.to_string(),
                prompt: None,
                leverage: Vec::new(),
                requirements: Vec::new(),
            });
            open = Some((indent, Some(tasks.len() - 1)));
            continue;
        }

        match open {
            Some((block_indent, target)) if indent > block_indent => {
                if let Some(i) = target {
                    apply_metadata(&mut tasks[i], trimmed);
                }
            }
            _ => open = None,
        }
    }

    let summary = TaskSummary::of(&tasks);
    ParsedTasks { tasks, summary, warnings }
}

fn indentation(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// Recognises `- [m] rest`. A bracket followed by `(` is a link, not a box.
fn split_checkbox(line: &str) -> Option<CheckboxLine<'_>> {
    let after_bullet = line.strip_prefix(['-', '*', '+'])?;
    if !after_bullet.starts_with(char::is_whitespace) {
        return None;
    }
    let inner = after_bullet.trim_start().strip_prefix('[')?;
    let close = inner.find(']')?;
    let rest = &inner[close + 1..];
    if rest.starts_with('(') {
        return None;
    }
    Some(CheckboxLine { marker: &inner[..close], rest: rest.trim_start() })
}

/// Splits `1.2. Description` into `("1.2", "Description")`.
fn split_id(rest: &str) -> Option<(&str, &str)> {
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let token = &rest[..end];
    let id = token.strip_suffix('.').unwrap_or(token);
    let well_formed = !id.is_empty()
        && id.split('.').all(|seg| !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_digit()));
    well_formed.then(|| (id, rest[end..].trim()))
}

fn status_for(marker: &str) -> Option<TaskStatus> {
    match marker {
        "" | " " => Some(TaskStatus::Pending),
        "-" => Some(TaskStatus::InProgress),
        "x" | "X" => Some(TaskStatus::Completed),
        _ => None,
    }
}

fn apply_metadata(task: &mut Task, line: &str) {
    let body = line.strip_prefix(['-', '*', '+']).map_or(line, str::trim_start);
    let body = body.strip_prefix('_').unwrap_or(body);
    let body = body.strip_suffix('_').unwrap_or(body);

    if let Some(value) = body.strip_prefix("Prompt:") {
        task.prompt = Some(value.trim().to_string());
    } else if let Some(value) = body.strip_prefix("Leverage:") {
        task.leverage.extend(split_list(value));
    } else if let Some(value) = body.strip_prefix("Requirements:") {
        task.requirements.extend(split_list(value));
    }
}

fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}
