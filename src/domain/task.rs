//! Task domain model
//!
//! Tasks are immutable values. Marking a task done, editing its description
//! or changing its priority produces a new task; the list replaces the old
//! value at its position.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::codec;
use super::date::TaskDate;

/// Errors raised while building a task
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("The description of a {0} task cannot be empty.")]
    EmptyDescription(TaskKind),

    #[error("Wrong formatting. Did you forget to put '{marker}'? Usage: {usage}")]
    MissingMarker {
        marker: &'static str,
        usage: &'static str,
    },

    #[error("Date '{0}' is not in ISO-8601 format (YYYY-MM-DD or YYYY-MM-DDTHH:MM).")]
    BadDateFormat(String),

    #[error("Priority '{0}' is not valid. Use 0-3 or none, low, medium, high.")]
    InvalidPriority(String),
}

/// The three kinds of task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKind {
    Todo,
    Deadline,
    Event,
}

impl TaskKind {
    /// Single-letter code used in the task file
    pub fn code(&self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline => 'D',
            TaskKind::Event => 'E',
        }
    }

    /// Looks up a kind by its file code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "T" => Some(TaskKind::Todo),
            "D" => Some(TaskKind::Deadline),
            "E" => Some(TaskKind::Event),
            _ => None,
        }
    }

    /// Command keyword that creates this kind
    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::Todo => "todo",
            TaskKind::Deadline => "deadline",
            TaskKind::Event => "event",
        }
    }

    /// Marker separating description and date, if the kind carries a date
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            TaskKind::Todo => None,
            TaskKind::Deadline => Some("/by"),
            TaskKind::Event => Some("/at"),
        }
    }

    fn usage(&self) -> &'static str {
        match self {
            TaskKind::Todo => "todo <description>",
            TaskKind::Deadline => "deadline <description> /by <date>",
            TaskKind::Event => "event <description> /at <date>",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Priority of a task, used by `sort priority`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// Numeric code stored in the task file
    pub fn code(&self) -> u8 {
        match self {
            TaskPriority::None => 0,
            TaskPriority::Low => 1,
            TaskPriority::Medium => 2,
            TaskPriority::High => 3,
        }
    }

    /// Looks up a priority by its numeric code
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(TaskPriority::None),
            1 => Some(TaskPriority::Low),
            2 => Some(TaskPriority::Medium),
            3 => Some(TaskPriority::High),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::None => "none",
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskPriority {
    type Err = TaskError;

    /// Accepts a numeric code or a name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return TaskPriority::from_code(code)
                .ok_or_else(|| TaskError::InvalidPriority(trimmed.to_string()));
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "none" => Ok(TaskPriority::None),
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(TaskError::InvalidPriority(trimmed.to_string())),
        }
    }
}

/// Variant-specific data of a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskVariant {
    ToDo,
    Deadline { due: TaskDate },
    Event { at: TaskDate },
}

impl TaskVariant {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskVariant::ToDo => TaskKind::Todo,
            TaskVariant::Deadline { .. } => TaskKind::Deadline,
            TaskVariant::Event { .. } => TaskKind::Event,
        }
    }

    pub fn date(&self) -> Option<&TaskDate> {
        match self {
            TaskVariant::ToDo => None,
            TaskVariant::Deadline { due } => Some(due),
            TaskVariant::Event { at } => Some(at),
        }
    }
}

/// A tracked item of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    done: bool,
    priority: TaskPriority,
    variant: TaskVariant,
}

impl Task {
    /// Creates a task that is not done and has no priority
    ///
    /// The description is trimmed and must not be empty.
    pub fn new(description: &str, variant: TaskVariant) -> Result<Self, TaskError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TaskError::EmptyDescription(variant.kind()));
        }

        Ok(Self {
            description: description.to_string(),
            done: false,
            priority: TaskPriority::None,
            variant,
        })
    }

    /// Creates a todo from user text
    pub fn todo(args: &str) -> Result<Self, TaskError> {
        Task::new(args, TaskVariant::ToDo)
    }

    /// Creates a deadline from user text of the form `<description> /by <date>`
    pub fn deadline(args: &str) -> Result<Self, TaskError> {
        let (description, due) = split_dated(args, TaskKind::Deadline, Marker::First)?;
        Task::new(description, TaskVariant::Deadline { due })
    }

    /// Creates an event from user text of the form `<description> /at <date>`
    pub fn event(args: &str) -> Result<Self, TaskError> {
        let (description, at) = split_dated(args, TaskKind::Event, Marker::First)?;
        Task::new(description, TaskVariant::Event { at })
    }

    /// Creates a task of the given kind from user text
    pub fn from_user_text(kind: TaskKind, args: &str) -> Result<Self, TaskError> {
        match kind {
            TaskKind::Todo => Task::todo(args),
            TaskKind::Deadline => Task::deadline(args),
            TaskKind::Event => Task::event(args),
        }
    }

    /// Rebuilds a task from the description field of a task file record
    ///
    /// The date is taken after the last marker so that descriptions which
    /// were edited to contain the marker still load.
    pub(crate) fn from_record(
        kind: TaskKind,
        body: &str,
        done: bool,
        priority: TaskPriority,
    ) -> Result<Self, TaskError> {
        let task = match kind {
            TaskKind::Todo => Task::new(body, TaskVariant::ToDo)?,
            TaskKind::Deadline => {
                let (description, due) = split_dated(body, kind, Marker::Last)?;
                Task::new(description, TaskVariant::Deadline { due })?
            }
            TaskKind::Event => {
                let (description, at) = split_dated(body, kind, Marker::Last)?;
                Task::new(description, TaskVariant::Event { at })?
            }
        };

        Ok(Self {
            done,
            priority,
            ..task
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    pub fn variant(&self) -> &TaskVariant {
        &self.variant
    }

    pub fn kind(&self) -> TaskKind {
        self.variant.kind()
    }

    /// Due date of a deadline or date of an event
    pub fn date(&self) -> Option<&TaskDate> {
        self.variant.date()
    }

    /// Returns a copy with the done flag set to `done`
    pub fn with_done(&self, done: bool) -> Self {
        Self {
            done,
            ..self.clone()
        }
    }

    /// Returns a copy with the done flag flipped
    pub fn toggle_done(&self) -> Self {
        self.with_done(!self.done)
    }

    /// Returns a copy with a new description
    pub fn with_description(&self, description: &str) -> Result<Self, TaskError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TaskError::EmptyDescription(self.kind()));
        }

        Ok(Self {
            description: description.to_string(),
            ..self.clone()
        })
    }

    /// Returns a copy with a new priority
    pub fn with_priority(&self, priority: TaskPriority) -> Self {
        Self {
            priority,
            ..self.clone()
        }
    }

    /// Description followed by the marker and date for dated kinds
    ///
    /// This is the last field of a task file record.
    pub fn record_body(&self) -> String {
        match (self.kind().marker(), self.date()) {
            (Some(marker), Some(date)) => format!("{} {} {}", self.description, marker, date),
            _ => self.description.clone(),
        }
    }

    /// Canonical task file line, without trailing newline
    pub fn serialize(&self) -> String {
        codec::encode(self)
    }

    /// Human-readable line, without list index
    pub fn display(&self) -> String {
        let mut line = format!(
            "[{}][{}] {}",
            self.kind().code(),
            if self.done { 'X' } else { ' ' },
            self.description
        );

        match &self.variant {
            TaskVariant::ToDo => {}
            TaskVariant::Deadline { due } => line.push_str(&format!(" (by: {})", due)),
            TaskVariant::Event { at } => line.push_str(&format!(" (at: {})", at)),
        }

        if self.priority != TaskPriority::None {
            line.push_str(&format!(" {{{}}}", self.priority));
        }

        line
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Which marker occurrence splits description from date
#[derive(Clone, Copy)]
enum Marker {
    First,
    Last,
}

fn split_dated(args: &str, kind: TaskKind, which: Marker) -> Result<(&str, TaskDate), TaskError> {
    if args.trim().is_empty() {
        return Err(TaskError::EmptyDescription(kind));
    }

    let marker = kind.marker().unwrap_or_default();
    let split = match which {
        Marker::First => args.split_once(marker),
        Marker::Last => args.rsplit_once(marker),
    };

    let (description, date_text) = split.ok_or(TaskError::MissingMarker {
        marker,
        usage: kind.usage(),
    })?;

    if description.trim().is_empty() {
        return Err(TaskError::EmptyDescription(kind));
    }

    Ok((description, TaskDate::parse(date_text)?))
}
