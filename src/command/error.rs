//! Command failures
//!
//! Every failure a command can hit is a [`CommandError`]. The session turns
//! them into replies, so none of them ends a session.

use thiserror::Error;

use crate::domain::{LineError, ListError, TaskError};
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Nothing was typed in!")]
    EmptyInput,

    #[error("Command '{0}' not recognised. Type 'help' to see what I can do.")]
    UnrecognizedCommand(String),

    #[error("'{0}' does not take any arguments.")]
    ExcessArguments(&'static str),

    #[error("'{0}' is not a valid task number.")]
    NotANumber(String),

    #[error("Missing arguments. Usage: {0}")]
    MissingArgument(&'static str),

    #[error("Give me a keyword to search for. Usage: find <keyword>")]
    MissingKeyword,

    #[error("I have no help for '{0}'. Type 'help' to list the commands.")]
    UnknownHelpTopic(String),

    #[error(transparent)]
    Task(#[from] TaskError),

    #[error(transparent)]
    List(#[from] ListError),

    #[error(transparent)]
    Load(#[from] LineError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
