//! Run command handler
//!
//! Reads a source file, sends it to the Blaze API and prints the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blaze_core::domain::language::Language;
use blaze_core::dto::run::{RunRequest, RunResponse};
use colored::*;

use crate::config::Config;
use blaze_client::BlazeClient;

/// Run a source file
///
/// Fails when the program did not finish with an Accepted verdict, so the
/// exit code can be used in scripts.
pub async fn handle_run_command(
    file: &Path,
    language: Option<String>,
    stdin: Option<String>,
    stdin_file: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let language = resolve_language(file, language.as_deref())?;

    let code = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let stdin = match stdin_file {
        Some(path) => Some(
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => stdin,
    };

    println!(
        "{} {} ({})",
        "Running".cyan().bold(),
        file.display(),
        language.name()
    );

    let client = BlazeClient::new(&config.api_url);
    let response = client
        .run(&RunRequest {
            code: Some(code),
            language: Some(language.name().to_string()),
            stdin,
        })
        .await?;

    print_response(&response);

    if !response.success {
        anyhow::bail!(
            "Run finished with status: {}",
            response.status.as_deref().unwrap_or("unknown")
        );
    }

    Ok(())
}

/// Picks the language from `--language` or the file extension
fn resolve_language(file: &Path, explicit: Option<&str>) -> Result<Language> {
    if let Some(name) = explicit {
        return Language::from_name(name).with_context(|| {
            format!(
                "Unsupported language '{}'. Supported: {}",
                name,
                supported_names()
            )
        });
    }

    let ext = file
        .extension()
        .and_then(|e| e.to_str())
        .with_context(|| {
            format!(
                "Cannot infer the language of {}; pass --language",
                file.display()
            )
        })?;

    Language::from_extension(ext).with_context(|| {
        format!(
            "No supported language uses the .{} extension; pass --language",
            ext
        )
    })
}

fn supported_names() -> String {
    Language::ALL
        .iter()
        .map(|l| l.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print a run result
fn print_response(response: &RunResponse) {
    let status = response.status.as_deref().unwrap_or("Unknown");
    let status_colored = if response.success {
        status.green()
    } else {
        status.red()
    };

    println!();
    println!("  Status:  {}", status_colored.bold());
    if let Some(time) = response.time_taken {
        println!("  Time:    {}", format!("{:.3}s", time).dimmed());
    }
    if let Some(memory) = response.memory {
        println!("  Memory:  {}", format!("{} KB", memory).dimmed());
    }

    print_section("stdout", response.stdout.as_deref());
    print_section("stderr", response.stderr.as_deref());
    print_section("compile output", response.compile_output.as_deref());
}

fn print_section(title: &str, content: Option<&str>) {
    let Some(content) = content.filter(|c| !c.is_empty()) else {
        return;
    };

    println!();
    println!("  {} {}", "▸".cyan(), title.bold());
    for line in content.lines() {
        println!("    {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_extension() {
        let lang = resolve_language(Path::new("solution.py"), None).unwrap();
        assert_eq!(lang, Language::Python);

        let lang = resolve_language(Path::new("main.CPP"), None).unwrap();
        assert_eq!(lang, Language::Cpp);
    }

    #[test]
    fn test_explicit_language_wins() {
        let lang = resolve_language(Path::new("script.txt"), Some("Ruby")).unwrap();
        assert_eq!(lang, Language::Ruby);
    }

    #[test]
    fn test_unresolvable_language() {
        assert!(resolve_language(Path::new("Makefile"), None).is_err());
        assert!(resolve_language(Path::new("notes.txt"), None).is_err());

        let err = resolve_language(Path::new("a.py"), Some("python")).unwrap_err();
        assert!(err.to_string().contains("Supported: C, C++, Python"));
    }
}
