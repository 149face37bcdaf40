//! # Command Layer
//!
//! Turns raw input lines into operations on a [`TaskList`](crate::domain::TaskList).
//!
//! ## Flow
//!
//! 1. [`split_line`] splits the keyword from its arguments
//! 2. [`CommandRegistry`] resolves the keyword (or an alias) to a [`CommandSpec`]
//! 3. [`Session`] runs the command and saves when the list changed
//!
//! ## Commands
//!
//! | Group | Commands |
//! |-------|----------|
//! | Tasks | `list`, `todo`, `deadline`, `event`, `edit`, `done`, `undone`, `delete`, `priority`, `find`, `sort`, `clear-all` |
//! | Session | `help`, `save`, `bye` |
//! | Novelty | `ping`, `motivate`, `shrug` |
//!
//! Every failure is a [`CommandError`]. [`Session::execute`] turns it into
//! an unsuccessful [`Reply`], so no command can end a session.

mod error;
mod handlers;
mod input;
mod registry;
mod session;

pub use error::CommandError;
pub use input::{parse_index, split_line, ParsedLine};
pub use registry::{Action, CommandRegistry, CommandSpec, Group, Handler};
pub use session::{LoadOutcome, Reply, Session};
