//! # Storage Layer
//!
//! Persistence for taskline.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | One record per line (see [`crate::domain::codec`]) | `<data dir>/tasks.txt` |
//! | Config | TOML | `<config dir>/config.toml` |
//!
//! ## Write Safety
//!
//! - [`TaskFile`] locks the file (`fs2`) while reading and writing
//! - Saves are atomic (temp file + rename) and last writer wins
//!
//! ## Key Types
//!
//! - [`LineStore`] - Load/save contract used by the session
//! - [`TaskFile`] - File-backed line store
//! - [`MemoryLines`] - In-memory line store
//! - [`Config`] - User configuration

mod config;
mod file;
mod lines;

pub use config::{Config, ConfigError, OutputFormat};
pub use file::TaskFile;
pub use lines::{LineStore, MemoryLines, StorageError};
