//! Task list model and the markdown task parser.
//!
//! A spec's `tasks.md` is hand-edited, so parsing never fails: lines that
//! cannot be understood become warnings next to the tasks that could.

mod parser;
mod render;
mod task;

pub use parser::{parse, ParseWarning, ParsedTasks};
pub use render::render;
pub use task::{Task, TaskStatus, TaskSummary};
