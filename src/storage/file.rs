//! Plain-text task file
//!
//! Tasks live in a single text file with one record per line. The file is
//! created on first load, and every save rewrites it atomically.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use super::lines::{LineStore, StorageError};

/// Task file on disk
#[derive(Debug, Clone)]
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    /// Creates a task file handle for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the task file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::io("create directory", parent, e))?;
        }
        Ok(())
    }
}

impl LineStore for TaskFile {
    fn load_lines(&self) -> Result<Vec<String>, StorageError> {
        self.ensure_parent()?;

        // Create the file if absent so a first run starts from an empty list
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| StorageError::io("open", &self.path, e))?;

        file.lock_shared()
            .map_err(|e| StorageError::io("lock", &self.path, e))?;

        let reader = BufReader::new(&file);
        let lines = reader
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StorageError::io("read", &self.path, e))?;

        debug!(path = %self.path.display(), lines = lines.len(), "loaded task file");

        // Lock is released when file is dropped
        Ok(lines)
    }

    fn save_lines(&self, lines: &[String]) -> Result<(), StorageError> {
        self.ensure_parent()?;

        // Write to temp file first
        let temp_path = self.path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| StorageError::io("create", &temp_path, e))?;

            file.lock_exclusive()
                .map_err(|e| StorageError::io("lock", &temp_path, e))?;

            let mut writer = BufWriter::new(&file);
            for line in lines {
                writeln!(writer, "{}", line)
                    .map_err(|e| StorageError::io("write", &temp_path, e))?;
            }

            writer
                .flush()
                .map_err(|e| StorageError::io("flush", &temp_path, e))?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path)
            .map_err(|e| StorageError::io("replace", &self.path, e))?;

        debug!(path = %self.path.display(), lines = lines.len(), "saved task file");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let file = TaskFile::new(dir.path().join("tasks.txt"));

        let lines = file.load_lines().unwrap();
        assert!(lines.is_empty());
        assert!(file.path().is_file());
    }

    #[test]
    fn save_and_load_lines() {
        let dir = TempDir::new().unwrap();
        let file = TaskFile::new(dir.path().join("tasks.txt"));

        let lines = vec![
            "T/split/0/split/0/split/read book".to_string(),
            "D/split/1/split/2/split/return book /by 2024-01-01".to_string(),
        ];
        file.save_lines(&lines).unwrap();

        assert_eq!(file.load_lines().unwrap(), lines);

        let raw = fs::read_to_string(file.path()).unwrap();
        assert!(raw.ends_with("2024-01-01\n"));
    }

    #[test]
    fn save_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let file = TaskFile::new(dir.path().join("tasks.txt"));

        file.save_lines(&["one".to_string(), "two".to_string()]).unwrap();
        file.save_lines(&["three".to_string()]).unwrap();

        assert_eq!(file.load_lines().unwrap(), ["three"]);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let file = TaskFile::new(dir.path().join("nested").join("dir").join("tasks.txt"));

        file.save_lines(&["one".to_string()]).unwrap();
        assert!(file.path().exists());
    }

    #[test]
    fn atomic_write() {
        let dir = TempDir::new().unwrap();
        let file = TaskFile::new(dir.path().join("tasks.txt"));

        file.save_lines(&["one".to_string()]).unwrap();

        // Temp file should not exist after write
        assert!(!file.path().with_extension("tmp").exists());
    }

    #[test]
    fn load_fails_on_directory() {
        let dir = TempDir::new().unwrap();
        let file = TaskFile::new(dir.path());

        let err = file.load_lines().unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
