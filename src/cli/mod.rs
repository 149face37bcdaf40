//! # Command-Line Interface
//!
//! The `taskline` binary.
//!
//! ## Modes
//!
//! | Mode | Invocation | Behavior |
//! |------|------------|----------|
//! | Shell | `taskline`, `taskline shell` | One command per stdin line until `bye` or end of input |
//! | Run | `taskline run <command...>` | One command; exit code follows its success |
//! | Config | `taskline config` | Prints the effective configuration |
//!
//! ## Output Formats
//!
//! All modes support the `--format` flag:
//! - `text` (default) - Replies as typed in the shell
//! - `json` - One `{"success": .., "message": ..}` object per reply
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! taskline --verbose run list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate mode.

mod app;
mod output;
mod shell;

pub use app::{run, Cli, Commands};
pub use output::Output;
