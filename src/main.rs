//! taskline - track to-dos, deadlines and events from the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    match taskline::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
