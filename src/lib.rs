//! taskline - a text-command task tracker
//!
//! Tasks (to-dos, deadlines and events) live in an ordered list that is
//! driven by one-line text commands and persisted to a plain text file, one
//! task per line.

pub mod domain;
pub mod storage;
pub mod command;
pub mod cli;

pub use command::{CommandError, Reply, Session};
pub use domain::{Task, TaskKind, TaskList, TaskPriority};
