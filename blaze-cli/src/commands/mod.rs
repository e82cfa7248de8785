//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod health;
mod language;
mod run;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a source file and print its output
    Run {
        /// Source file to run
        file: PathBuf,

        /// Language name (e.g. "Python", "C++"); inferred from the extension if omitted
        #[arg(short, long)]
        language: Option<String>,

        /// Text passed to the program on stdin
        #[arg(long, conflicts_with = "stdin_file")]
        stdin: Option<String>,

        /// File whose content is passed to the program on stdin
        #[arg(long)]
        stdin_file: Option<PathBuf>,
    },
    /// List supported languages
    Languages,
    /// Check that the Blaze API is reachable
    Health,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Run {
            file,
            language,
            stdin,
            stdin_file,
        } => run::handle_run_command(&file, language, stdin, stdin_file, config).await,
        Commands::Languages => language::list_languages(config).await,
        Commands::Health => health::check_health(config).await,
    }
}
