//! Task file line format
//!
//! One task per line:
//!
//! ```text
//! <kind>/split/<done>/split/<priority>/split/<description>[ /by|/at <date>]
//! ```
//!
//! `kind` is `T`, `D` or `E`, `done` is `0` or `1` and `priority` is the
//! numeric priority code. Inside the last field a backslash is written as
//! `\\` and a literal delimiter as `\/split/`. Lines without backslashes are
//! read exactly as written.

use thiserror::Error;

use super::task::{Task, TaskError, TaskKind, TaskPriority};

/// Field separator in the task file
pub const DELIMITER: &str = "/split/";

const FIELD_COUNT: usize = 4;

/// Errors raised while decoding a single task line
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Expected 4 fields separated by '/split/', found {0}.")]
    MissingField(usize),

    #[error("The task type '{0}' scanned from file is invalid.")]
    InvalidTaskType(String),

    #[error("The done flag '{0}' scanned from file is not 0 or 1.")]
    InvalidDoneFlag(String),

    #[error(transparent)]
    Task(#[from] TaskError),
}

/// A decode failure together with its 1-based line number
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Line {line}: {source}")]
pub struct LineError {
    pub line: usize,
    #[source]
    pub source: CodecError,
}

/// Encodes a task as a single file line
pub fn encode(task: &Task) -> String {
    format!(
        "{kind}{d}{done}{d}{priority}{d}{body}",
        kind = task.kind().code(),
        done = u8::from(task.is_done()),
        priority = task.priority().code(),
        body = escape(&task.record_body()),
        d = DELIMITER,
    )
}

/// Decodes a single file line
pub fn decode(line: &str) -> Result<Task, CodecError> {
    let fields = split_fields(line);
    let [kind, done, priority, body]: [String; FIELD_COUNT] = fields
        .try_into()
        .map_err(|fields: Vec<String>| CodecError::MissingField(fields.len()))?;

    let kind =
        TaskKind::from_code(kind.trim()).ok_or_else(|| CodecError::InvalidTaskType(kind.clone()))?;

    let done = match done.trim() {
        "0" => false,
        "1" => true,
        _ => return Err(CodecError::InvalidDoneFlag(done.clone())),
    };

    let priority = priority
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(TaskPriority::from_code)
        .ok_or_else(|| TaskError::InvalidPriority(priority.clone()))?;

    Ok(Task::from_record(kind, &body, done, priority)?)
}

/// Encodes every task in order
pub fn encode_all<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<String> {
    tasks.into_iter().map(encode).collect()
}

/// Decodes every non-blank line, failing on the first malformed one
pub fn decode_all<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Task>, LineError> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.as_ref().trim().is_empty())
        .map(|(index, line)| {
            decode(line.as_ref()).map_err(|source| LineError {
                line: index + 1,
                source,
            })
        })
        .collect()
}

fn escape(field: &str) -> String {
    field.replace('\\', "\\\\").replace(DELIMITER, "\\/split/")
}

/// Splits a line on unescaped delimiters, unescaping as it goes
///
/// Splitting stops after the last expected field, so any further delimiter
/// text belongs to the description.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut current = String::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if c == '\\' {
            let mut chars = rest[1..].chars();
            current.push(chars.next().unwrap_or('\\'));
            rest = chars.as_str();
        } else if fields.len() < FIELD_COUNT - 1 && rest.starts_with(DELIMITER) {
            fields.push(std::mem::take(&mut current));
            rest = &rest[DELIMITER.len()..];
        } else {
            current.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    fields.push(current);
    fields
}
