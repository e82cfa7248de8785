//! Blaze CLI
//!
//! Command-line interface for running code through the Blaze API.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "blaze")]
#[command(about = "Run code on the Blaze execution service", long_about = None)]
struct Cli {
    /// Blaze API URL
    #[arg(long, env = "BLAZE_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
    };

    handle_command(cli.command, &config).await
}
