//! Domain models for taskline
//!
//! Contains the task model, the ordered task list and the task file line
//! format, without any I/O concerns.

pub mod codec;
mod date;
mod list;
mod task;

pub use codec::{CodecError, LineError};
pub use date::TaskDate;
pub use list::{ListError, SortCriterion, TaskList};
pub use task::{Task, TaskError, TaskKind, TaskPriority, TaskVariant};
