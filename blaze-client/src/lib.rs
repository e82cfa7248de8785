//! Blaze HTTP Clients
//!
//! Type-safe HTTP clients used across the Blaze crates:
//!
//! - [`Judge0Client`] talks to the remote code-execution service.
//! - [`BlazeClient`] talks to the Blaze API server and is used by the CLI.
//!
//! # Example
//!
//! ```no_run
//! use blaze_client::BlazeClient;
//! use blaze_core::dto::run::RunRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = BlazeClient::new("http://localhost:8080");
//!
//!     let response = client.run(&RunRequest {
//!         code: Some("print('hello')".to_string()),
//!         language: Some("Python".to_string()),
//!         stdin: None,
//!     }).await?;
//!
//!     println!("stdout: {:?}", response.stdout);
//!     Ok(())
//! }
//! ```

pub mod error;
mod judge0;

pub use error::{ClientError, Result};
pub use judge0::Judge0Client;

use blaze_core::dto::envelope::Envelope;
use blaze_core::dto::run::{LanguageInfo, RunRequest, RunResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Blaze API
#[derive(Debug, Clone)]
pub struct BlazeClient {
    /// Base URL of the API server (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl BlazeClient {
    /// Create a new API client
    ///
    /// # Example
    /// ```
    /// use blaze_client::BlazeClient;
    ///
    /// let client = BlazeClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new API client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the API server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a piece of code and wait for its result
    pub async fn run(&self, req: &RunRequest) -> Result<RunResponse> {
        let url = format!("{}/api/runners", self.base_url);
        let response = self.client.post(&url).json(req).send().await?;

        handle_envelope(response).await
    }

    /// List the languages the server accepts
    pub async fn languages(&self) -> Result<Vec<LanguageInfo>> {
        let url = format!("{}/api/languages", self.base_url);
        let response = self.client.get(&url).send().await?;

        handle_envelope(response).await
    }

    /// Check that the server is up
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ClientError::api_error(status.as_u16(), "Health check failed"));
        }

        Ok(())
    }
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Handle a plain JSON response
///
/// Checks the status code and returns an error if the request failed, or
/// deserializes the body if successful.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    response.json().await.map_err(body_error)
}

/// Only a body that arrived and failed to decode is a parse error
fn body_error(e: reqwest::Error) -> ClientError {
    if e.is_decode() {
        ClientError::ParseError(format!("Failed to parse JSON response: {}", e))
    } else {
        ClientError::RequestFailed(e)
    }
}

/// Handle a response wrapped in the Blaze envelope
///
/// Error statuses still carry an envelope; its message is preferred over the
/// raw body.
async fn handle_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<Envelope<T>>(&body) {
        Ok(envelope) => envelope
            .into_result()
            .map_err(|(status, message)| ClientError::api_error(status, message)),
        Err(_) if !status.is_success() => Err(ClientError::api_error(status.as_u16(), body)),
        Err(e) => Err(ClientError::ParseError(format!(
            "Failed to parse JSON response: {}",
            e
        ))),
    }
}
