//! Language listing

use anyhow::Result;
use colored::*;

use crate::config::Config;
use blaze_client::BlazeClient;

/// List the languages the server accepts
pub async fn list_languages(config: &Config) -> Result<()> {
    let client = BlazeClient::new(&config.api_url);
    let languages = client.languages().await?;

    println!(
        "{}",
        format!("{} supported language(s):", languages.len()).bold()
    );
    println!();
    for lang in languages {
        println!(
            "  {} {:<12} {}",
            "▸".cyan(),
            lang.name.bold(),
            format!(".{}", lang.extensions.join(", .")).dimmed()
        );
    }

    Ok(())
}
