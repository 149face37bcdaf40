//! Main CLI application structure

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use super::output::Output;
use super::shell;
use crate::storage::{Config, OutputFormat, TaskFile};

#[derive(Parser)]
#[command(name = "taskline")]
#[command(author, version, about = "Track to-dos, deadlines and events from the terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Task file to use
    #[arg(long, global = true, env = "TASKLINE_FILE")]
    pub file: Option<PathBuf>,

    /// Configuration file to use
    #[arg(long, global = true, env = "TASKLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read commands from stdin until `bye` (the default)
    Shell,

    /// Run a single command, e.g. `taskline run todo read book`
    Run {
        /// The command and its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Show the effective configuration
    Config,
}

/// Main entry point for the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let output = Output::new(cli.format.unwrap_or(config.default_format), cli.verbose);
    let task_file = config.task_file(cli.file.as_deref());

    output.verbose(&format!("Task file: {}", task_file.display()));

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::interactive(&config, TaskFile::new(task_file), &output),
        Commands::Run { words } => {
            let line = words.join(" ");
            output.verbose(&format!("Running: {}", line));
            Ok(shell::one_shot(&config, TaskFile::new(task_file), &line, &output))
        }
        Commands::Config => {
            show_config(config, &task_file, &output)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn show_config(mut config: Config, task_file: &Path, output: &Output) -> Result<()> {
    config.data_file = Some(task_file.to_path_buf());

    if output.is_json() {
        output.data(&config);
    } else {
        print!("{}", config.to_toml().context("Failed to render configuration")?);
    }
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the default level
fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
