//! Configuration handling for taskline
//!
//! Configuration is stored in `~/.config/taskline/config.toml` (or the
//! platform equivalent) and can be pointed elsewhere with `--config`.
//! Command-line flags and environment variables take precedence over it.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const TASK_FILE_NAME: &str = "tasks.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),
}

/// Output format for replies
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Task file location (defaults to the platform data directory)
    pub data_file: Option<PathBuf>,

    /// Save after every command that changes the task list
    pub autosave: bool,

    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Print the welcome banner in interactive mode
    pub greeting: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            autosave: true,
            default_format: OutputFormat::Text,
            greeting: true,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default location
    ///
    /// A missing file yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Resolves the task file path
    ///
    /// Precedence: explicit override, then `data_file`, then the platform
    /// data directory, then `tasks.txt` in the working directory.
    pub fn task_file(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.data_file.clone())
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join(TASK_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(TASK_FILE_NAME))
    }

    /// Renders the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "taskline", "taskline")
}
