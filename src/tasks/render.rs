//! Canonical rendering of a task list back to markdown.

use std::fmt::Write as _;

use super::task::Task;

/// Renders tasks in the canonical `tasks.md` form.
///
/// Nested ids are indented two spaces per level; metadata sub-lines sit one
/// level deeper than their task. Parsing the output yields the same tasks.
///
/// Leverage and requirement items are joined with `", "`, so they must not
/// contain commas themselves. Items produced by [`parse`](super::parse) never
/// do; a hand-built item such as `"a, b"` reads back as two items.
#[must_use]
pub fn render(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        let pad = "  ".repeat(task.depth().saturating_sub(1));
        let id = if task.id.contains('.') { task.id.clone() } else { format!("{}.", task.id) };
        let _ = write!(out, "{pad}- [{}] {id}", task.status.marker());
        if !task.description.is_empty() {
            let _ = write!(out, " {}", task.description);
        }
        out.push('\n');

        if let Some(prompt) = &task.prompt {
            let _ = writeln!(out, "{pad}  - _Prompt: {prompt}_");
        }
        if !task.leverage.is_empty() {
            let _ = writeln!(out, "{pad}  - _Leverage: {}_", task.leverage.join(", "));
        }
        if !task.requirements.is_empty() {
            let _ = writeln!(out, "{pad}  - _Requirements: {}_", task.requirements.join(", "));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::parse;

    #[test]
    fn rendered_document_reparses_to_same_tasks() {
        let source = "\
Intro paragraph that is not a task.

* [X] 1 Setup
    - _Leverage: Cargo.toml_
- [-] 1.1. Wire config
- [ ] 1.1.1 Read env
      - _Prompt: Role: dev | Task: read env vars_
      - _Requirements: 4.2,4.3_
- [ ] 2. Ship
";
        let first = parse(source);
        let second = parse(&render(&first.tasks));

        assert_eq!(first.tasks, second.tasks);
        assert!(second.warnings.is_empty());
    }

    #[test]
    fn renders_canonical_markers() {
        let parsed = parse("- [X] 1. Done\n- [-] 1.1 Going\n");
        assert_eq!(render(&parsed.tasks), "- [x] 1. Done\n  - [-] 1.1 Going\n");
    }

    #[test]
    fn list_items_with_commas_split_on_reparse() {
        let mut task = parse("- [ ] 1. Task\n").tasks.remove(0);
        task.leverage = vec!["a, b".to_string()];
        task.requirements = vec!["1.1".to_string(), "2".to_string()];

        let reparsed = parse(&render(&[task])).tasks.remove(0);
        assert_eq!(reparsed.leverage, vec!["a", "b"]);
        assert_eq!(reparsed.requirements, vec!["1.1", "2"]);
    }
}
