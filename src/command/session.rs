//! A task-tracking session
//!
//! The session owns the task list for one run. It loads the task file when
//! opened, dispatches each input line through the [`CommandRegistry`], and
//! is the single place where command errors become replies.

use tracing::{debug, info, warn};

use super::error::CommandError;
use super::input::split_line;
use super::registry::{Action, CommandRegistry};
use crate::domain::{codec, TaskList};
use crate::storage::{LineStore, StorageError};

/// Reply to one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Text shown to the user, ending with a newline
    pub text: String,
    /// False when the command failed
    pub success: bool,
    /// True when the user asked to end the session
    pub exit: bool,
}

impl Reply {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
            exit: false,
        }
    }

    fn failed(error: &CommandError) -> Self {
        Self {
            text: format!("{}\n", error),
            success: false,
            exit: false,
        }
    }
}

/// Result of loading the task file when a session opens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read; holds the number of tasks loaded
    Loaded(usize),
    /// The file could not be read or parsed; the session starts empty
    Failed(String),
}

impl LoadOutcome {
    pub fn message(&self) -> String {
        match self {
            LoadOutcome::Loaded(0) => "No saved tasks yet.\n".to_string(),
            LoadOutcome::Loaded(count) => format!("Loaded {} task(s) from file.\n", count),
            LoadOutcome::Failed(reason) => format!(
                "Could not load tasks: {}\nStarting with an empty list. Saving will overwrite the task file.\n",
                reason
            ),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, LoadOutcome::Failed(_))
    }
}

/// One run of the task tracker over a line store
pub struct Session<S: LineStore> {
    tasks: TaskList,
    registry: CommandRegistry,
    store: S,
    autosave: bool,
    unsaved: bool,
}

impl<S: LineStore> Session<S> {
    /// Opens a session, loading tasks from `store`
    ///
    /// A failed load never prevents the session from starting.
    pub fn open(store: S) -> (Self, LoadOutcome) {
        let (tasks, outcome) = match load(&store) {
            Ok(tasks) => {
                info!(location = %store.describe(), tasks = tasks.len(), "loaded tasks");
                let count = tasks.len();
                (tasks, LoadOutcome::Loaded(count))
            }
            Err(e) => {
                warn!(location = %store.describe(), error = %e, "task file not loaded");
                (TaskList::new(), LoadOutcome::Failed(e.to_string()))
            }
        };

        let session = Self {
            tasks,
            registry: CommandRegistry::builtin(),
            store,
            autosave: true,
            unsaved: false,
        };

        (session, outcome)
    }

    /// Sets whether mutating commands save immediately
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Executes one input line; failures become unsuccessful replies
    pub fn execute(&mut self, line: &str) -> Reply {
        match self.try_execute(line) {
            Ok(reply) => reply,
            Err(e) => {
                debug!(error = %e, "command failed");
                Reply::failed(&e)
            }
        }
    }

    /// Executes one input line and returns only the reply text
    pub fn execute_line(&mut self, line: &str) -> String {
        self.execute(line).text
    }

    /// Executes one input line, surfacing failures as errors
    pub fn try_execute(&mut self, line: &str) -> Result<Reply, CommandError> {
        let parsed = split_line(line)?;
        let spec = *self
            .registry
            .lookup(&parsed.keyword)
            .ok_or_else(|| CommandError::UnrecognizedCommand(parsed.keyword.clone()))?;

        if !spec.takes_args && !parsed.rest.is_empty() {
            return Err(CommandError::ExcessArguments(spec.name));
        }

        debug!(command = spec.name, args = %parsed.rest, "dispatching");

        match spec.action {
            Action::Task(handler) => {
                let mut text = handler(&mut self.tasks, &parsed.rest)?;
                if spec.mutates {
                    self.unsaved = true;
                    if self.autosave {
                        if let Err(e) = self.save() {
                            text.push_str(&format!("Warning: {}\n", e));
                        }
                    }
                }
                Ok(Reply::ok(text))
            }
            Action::Help => Ok(Reply::ok(self.registry.help(&parsed.rest)?)),
            Action::Save => {
                let count = self.save()?;
                Ok(Reply::ok(format!(
                    "Saved {} task(s) to {}.\n",
                    count,
                    self.store.describe()
                )))
            }
            Action::Exit => Ok(Reply {
                text: "Bye. Hope to see you again soon!\n".to_string(),
                success: true,
                exit: true,
            }),
        }
    }

    /// Writes every task to the line store
    ///
    /// On failure the in-memory list is kept as it is.
    pub fn save(&mut self) -> Result<usize, StorageError> {
        let lines = codec::encode_all(&self.tasks);
        match self.store.save_lines(&lines) {
            Ok(()) => {
                info!(location = %self.store.describe(), tasks = lines.len(), "saved tasks");
                self.unsaved = false;
                Ok(lines.len())
            }
            Err(e) => {
                warn!(location = %self.store.describe(), error = %e, "failed to save tasks");
                Err(e)
            }
        }
    }

    /// Ends the session, saving pending changes
    ///
    /// Returns a warning when the final save fails.
    pub fn finish(mut self) -> Option<String> {
        if !self.unsaved {
            return None;
        }
        self.save()
            .err()
            .map(|e| format!("Your latest changes were not saved. {}\n", e))
    }
}

fn load<S: LineStore>(store: &S) -> Result<TaskList, CommandError> {
    let lines = store.load_lines()?;
    let tasks = codec::decode_all(&lines)?;
    Ok(TaskList::from(tasks))
}
