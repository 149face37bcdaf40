//! Interactive and one-shot sessions over the task file

use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use tracing::{debug, warn};

use super::output::Output;
use crate::command::Session;
use crate::storage::{Config, LineStore};

const GREETING: &str = "Hello! I'm taskline, your task tracker.\n\
                        Type 'help' to see what I can do, or 'bye' to leave.\n";

/// Runs commands read from stdin until `bye` or end of input
pub fn interactive<S: LineStore>(config: &Config, store: S, output: &Output) -> Result<ExitCode> {
    let stdin = io::stdin();
    let prompt = stdin.is_terminal();

    if config.greeting {
        output.notice(GREETING);
    }

    let (session, outcome) = Session::open(store);
    let mut session = session.with_autosave(config.autosave);
    if outcome.is_failure() {
        output.warning(&outcome.message());
    } else {
        output.notice(&outcome.message());
    }

    let mut input = stdin.lock();
    let mut buf = Vec::new();
    let mut read_failed = false;
    loop {
        if prompt {
            output.prompt();
        }
        buf.clear();
        match input.read_until(b'\n', &mut buf) {
            Ok(0) => {
                debug!("end of input");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "failed to read input");
                output.warning(&format!("Failed to read input: {}\n", e));
                read_failed = true;
                break;
            }
        }

        // Undecodable bytes become replacement characters
        let line = String::from_utf8_lossy(&buf);
        let reply = session.execute(&line);
        output.reply(&reply);
        if reply.exit {
            debug!("session ended by command");
            break;
        }
    }

    if let Some(warning) = session.finish() {
        output.warning(&warning);
        return Ok(ExitCode::FAILURE);
    }
    if read_failed {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Runs a single command line
///
/// The exit code follows the command's success.
pub fn one_shot<S: LineStore>(config: &Config, store: S, line: &str, output: &Output) -> ExitCode {
    let (session, outcome) = Session::open(store);
    let mut session = session.with_autosave(config.autosave);
    if outcome.is_failure() {
        output.warning(&outcome.message());
    }

    let reply = session.execute(line);
    output.reply(&reply);

    let saved = match session.finish() {
        Some(warning) => {
            output.warning(&warning);
            false
        }
        None => true,
    };

    if reply.success && saved {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
