//! Judge0 execution service endpoints

use blaze_core::domain::job::JobHandle;
use blaze_core::dto::judge0::{SubmissionAck, SubmissionDetails, SubmissionRequest};
use reqwest::{Client, RequestBuilder};

use crate::error::Result;
use crate::handle_response;

const API_KEY_HEADER: &str = "x-rapidapi-key";
const API_HOST_HEADER: &str = "x-rapidapi-host";

/// HTTP client for a Judge0 instance
///
/// Works against both a self-hosted Judge0 and the RapidAPI deployment; the
/// RapidAPI headers are only sent when configured.
#[derive(Debug, Clone)]
pub struct Judge0Client {
    /// Base URL without the `/submissions` suffix
    base_url: String,
    api_key: Option<String>,
    api_host: Option<String>,
    client: Client,
}

impl Judge0Client {
    /// Create a client with a default HTTP client
    ///
    /// # Example
    /// ```
    /// use blaze_client::Judge0Client;
    ///
    /// let client = Judge0Client::new("https://judge0-ce.p.rapidapi.com")
    ///     .with_api_key("secret")
    ///     .with_api_host("judge0-ce.p.rapidapi.com");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client around a configured reqwest Client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            api_host: None,
            client,
        }
    }

    /// Send `x-rapidapi-key` with every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Send `x-rapidapi-host` with every request
    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = Some(api_host.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn submissions_url(&self) -> String {
        format!("{}/submissions", self.base_url)
    }

    fn submission_url(&self, handle: &JobHandle) -> String {
        format!(
            "{}/submissions/{}?base64_encoded=false",
            self.base_url,
            handle.as_str()
        )
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        };
        match &self.api_host {
            Some(host) => builder.header(API_HOST_HEADER, host),
            None => builder,
        }
    }

    /// Create a submission
    ///
    /// # Returns
    /// The acknowledgement; its token may be missing if the service rejected
    /// the job without an error status.
    pub async fn create_submission(&self, req: &SubmissionRequest) -> Result<SubmissionAck> {
        let url = self.submissions_url();
        tracing::debug!("Creating submission (language_id={})", req.language_id);

        let response = self
            .authorize(self.client.post(&url))
            .json(req)
            .send()
            .await?;

        handle_response(response).await
    }

    /// Fetch the current state of a submission
    pub async fn get_submission(&self, handle: &JobHandle) -> Result<SubmissionDetails> {
        let url = self.submission_url(handle);
        let response = self.authorize(self.client.get(&url)).send().await?;

        handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = Judge0Client::new("https://judge0.example.com/");
        assert_eq!(client.base_url(), "https://judge0.example.com");
        assert_eq!(
            client.submissions_url(),
            "https://judge0.example.com/submissions"
        );

        let handle = JobHandle::new("d85cd024").unwrap();
        assert_eq!(
            client.submission_url(&handle),
            "https://judge0.example.com/submissions/d85cd024?base64_encoded=false"
        );
    }

    #[test]
    fn test_headers_only_when_configured() {
        let client = Judge0Client::new("http://localhost:2358");
        let req = client
            .authorize(client.client.get("http://localhost:2358/submissions"))
            .build()
            .unwrap();
        assert!(req.headers().get(API_KEY_HEADER).is_none());
        assert!(req.headers().get(API_HOST_HEADER).is_none());

        let client = client.with_api_key("k").with_api_host("h");
        let req = client
            .authorize(client.client.get("http://localhost:2358/submissions"))
            .build()
            .unwrap();
        assert_eq!(req.headers().get(API_KEY_HEADER).unwrap(), "k");
        assert_eq!(req.headers().get(API_HOST_HEADER).unwrap(), "h");
    }
}
