//! Output formatting for CLI commands

use std::io::{self, Write};

use serde::Serialize;

use crate::command::Reply;
use crate::storage::OutputFormat;

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints the reply to one command
    pub fn reply(&self, reply: &Reply) {
        match self.format {
            OutputFormat::Text => print!("{}", reply.text),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": reply.success,
                        "message": reply.text.trim_end()
                    })
                );
            }
        }
    }

    /// Prints an informational note (text only, ignored in JSON mode)
    pub fn notice(&self, message: &str) {
        if self.format == OutputFormat::Text {
            print!("{}", message);
        }
    }

    /// Prints a warning to stderr
    pub fn warning(&self, message: &str) {
        match self.format {
            OutputFormat::Text => eprint!("{}", message),
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "success": false,
                        "error": message.trim_end()
                    })
                );
            }
        }
    }

    /// Prints the input prompt (text only)
    pub fn prompt(&self) {
        if self.format == OutputFormat::Text {
            print!("> ");
            // A prompt that fails to flush only shows up late
            let _ = io::stdout().flush();
        }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        let json = match self.format {
            OutputFormat::Text => serde_json::to_string_pretty(data),
            OutputFormat::Json => serde_json::to_string(data),
        };
        if let Ok(json) = json {
            println!("{}", json);
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }
}
