//! Raw line persistence
//!
//! The session only ever loads or saves the whole task file as a list of
//! lines. [`LineStore`] is that contract; [`TaskFile`](super::TaskFile) backs
//! it with a file and [`MemoryLines`] keeps lines in memory.

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Loads and saves the task file as whole lines
pub trait LineStore {
    /// Reads every line; a missing file yields no lines
    fn load_lines(&self) -> Result<Vec<String>, StorageError>;

    /// Replaces the stored lines
    fn save_lines(&self, lines: &[String]) -> Result<(), StorageError>;

    /// Human-readable location, used in messages
    fn describe(&self) -> String;
}

/// In-memory line store
///
/// Clones share the same lines, so a clone kept outside a session sees what
/// the session saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryLines {
    lines: Rc<RefCell<Vec<String>>>,
    unavailable: bool,
}

impl MemoryLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Rc::new(RefCell::new(lines.into_iter().map(Into::into).collect())),
            unavailable: false,
        }
    }

    /// A store whose every load and save fails
    pub fn unavailable() -> Self {
        Self {
            lines: Rc::default(),
            unavailable: true,
        }
    }

    /// Returns the lines currently held
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    fn check(&self, action: &'static str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::io(
                action,
                "<memory>",
                io::Error::new(io::ErrorKind::PermissionDenied, "store unavailable"),
            ));
        }
        Ok(())
    }
}

impl LineStore for MemoryLines {
    fn load_lines(&self) -> Result<Vec<String>, StorageError> {
        self.check("read")?;
        Ok(self.lines())
    }

    fn save_lines(&self, lines: &[String]) -> Result<(), StorageError> {
        self.check("write")?;
        *self.lines.borrow_mut() = lines.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_lines() {
        let store = MemoryLines::with_lines(["a"]);
        let view = store.clone();

        store.save_lines(&["b".to_string(), "c".to_string()]).unwrap();
        assert_eq!(view.lines(), ["b", "c"]);
        assert_eq!(view.load_lines().unwrap(), ["b", "c"]);
    }

    #[test]
    fn unavailable_store_fails() {
        let store = MemoryLines::unavailable();
        let err = store.load_lines().unwrap_err();
        assert!(err.to_string().starts_with("Failed to read <memory>"));
        assert!(store.save_lines(&[]).is_err());
    }
}
