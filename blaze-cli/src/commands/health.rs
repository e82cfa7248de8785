//! Health check

use anyhow::{Context, Result};
use colored::*;

use crate::config::Config;
use blaze_client::BlazeClient;

/// Check that the API server answers its health endpoint
pub async fn check_health(config: &Config) -> Result<()> {
    let client = BlazeClient::new(&config.api_url);
    client
        .health()
        .await
        .with_context(|| format!("Blaze API at {} is not healthy", client.base_url()))?;

    println!("{} {}", "✓".green().bold(), client.base_url());
    Ok(())
}
