//! Runner configuration
//!
//! Defines where the execution service lives, how to authenticate against
//! it, and the poll policy used while waiting for a job to finish.

use std::time::Duration;

use anyhow::Context;
use blaze_client::Judge0Client;

/// Public RapidAPI deployment of Judge0 CE
pub const DEFAULT_BASE_URL: &str = "https://judge0-ce.p.rapidapi.com";
const DEFAULT_API_HOST: &str = "judge0-ce.p.rapidapi.com";

/// Runner configuration
///
/// All intervals are configurable so the same poller can run against a
/// local Judge0 (fast) or the rate-limited public API (slow).
#[derive(Debug, Clone)]
pub struct Config {
    /// Execution service base URL, without `/submissions`
    pub base_url: String,

    /// Sent as `x-rapidapi-key`
    pub api_key: Option<String>,

    /// Sent as `x-rapidapi-host`
    pub api_host: Option<String>,

    /// Maximum number of status queries per job
    pub max_attempts: u32,

    /// Delay between the first and second status query
    pub poll_interval: Duration,

    /// Multiplier applied to the delay after each attempt (1.0 keeps it fixed)
    pub backoff_factor: f64,

    /// Upper bound for the delay once backoff applies
    pub max_poll_interval: Duration,

    /// Optional wall-clock limit for the whole poll phase
    pub deadline: Option<Duration>,

    /// Timeout of each individual HTTP request
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            api_host: None,
            max_attempts: 5,
            poll_interval: Duration::from_millis(2000),
            backoff_factor: 1.0,
            max_poll_interval: Duration::from_secs(30),
            deadline: None,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - JUDGE0_API_URL (default: the RapidAPI deployment)
    /// - JUDGE0_API_KEY
    /// - JUDGE0_API_HOST (default: the RapidAPI host when using the default URL)
    /// - POLL_MAX_ATTEMPTS (default: 5)
    /// - POLL_INTERVAL_MS (default: 2000)
    /// - POLL_BACKOFF_FACTOR (default: 1.0)
    /// - POLL_MAX_INTERVAL_MS (default: 30000)
    /// - POLL_DEADLINE_MS (default: none)
    /// - REQUEST_TIMEOUT_MS (default: 30000)
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = match std::env::var("JUDGE0_API_URL") {
            Ok(url) => Self::new(url),
            Err(_) => Self::default(),
        };

        if let Ok(key) = std::env::var("JUDGE0_API_KEY") {
            config.api_key = Some(key);
        }
        if let Ok(host) = std::env::var("JUDGE0_API_HOST") {
            config.api_host = Some(host);
        }

        if let Some(attempts) = parse_env::<u32>("POLL_MAX_ATTEMPTS")? {
            config.max_attempts = attempts;
        }
        if let Some(ms) = parse_env::<u64>("POLL_INTERVAL_MS")? {
            config.poll_interval = Duration::from_millis(ms);
        }
        if let Some(factor) = parse_env::<f64>("POLL_BACKOFF_FACTOR")? {
            config.backoff_factor = factor;
        }
        if let Some(ms) = parse_env::<u64>("POLL_MAX_INTERVAL_MS")? {
            config.max_poll_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_env::<u64>("POLL_DEADLINE_MS")? {
            config.deadline = Some(Duration::from_millis(ms));
        }
        if let Some(ms) = parse_env::<u64>("REQUEST_TIMEOUT_MS")? {
            config.request_timeout = Duration::from_millis(ms);
        }

        Ok(config)
    }

    /// Sets the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the overall poll deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Delay to wait after the given (1-based) attempt
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        let scaled = self.poll_interval.as_secs_f64() * self.backoff_factor.powi(exponent);
        let capped = scaled.min(self.max_poll_interval.as_secs_f64());
        Duration::from_secs_f64(capped.max(0.0))
    }

    /// Builds the HTTP client for the configured execution service
    pub fn judge0_client(&self) -> anyhow::Result<Judge0Client> {
        let http = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let mut client = Judge0Client::with_client(self.base_url.clone(), http);
        if let Some(key) = &self.api_key {
            client = client.with_api_key(key.clone());
        }
        if let Some(host) = &self.api_host {
            client = client.with_api_host(host.clone());
        }
        Ok(client)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("base_url cannot be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://");
        }

        if self.max_attempts == 0 {
            anyhow::bail!("max_attempts must be greater than 0");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if !self.backoff_factor.is_finite() || self.backoff_factor < 1.0 {
            anyhow::bail!("backoff_factor must be a finite number >= 1.0");
        }

        if self.max_poll_interval < self.poll_interval {
            anyhow::bail!("max_poll_interval must not be shorter than poll_interval");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if matches!(self.deadline, Some(d) if d.is_zero()) {
            anyhow::bail!("deadline must be greater than 0 when set");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut config = Self::new(DEFAULT_BASE_URL);
        config.api_host = Some(DEFAULT_API_HOST.to_string());
        config
    }
}

fn parse_env<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{} has an invalid value: {:?}", name, raw)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.poll_interval, Duration::from_millis(2000));
        assert_eq!(config.api_host.as_deref(), Some("judge0-ce.p.rapidapi.com"));
        assert!(config.deadline.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.base_url = "not-a-url".to_string();
        assert!(config.validate().is_err());
        config.base_url = "http://localhost:2358".to_string();

        config.max_attempts = 0;
        assert!(config.validate().is_err());
        config.max_attempts = 3;

        config.backoff_factor = 0.5;
        assert!(config.validate().is_err());
        config.backoff_factor = 1.0;

        config.max_poll_interval = Duration::from_millis(10);
        assert!(config.validate().is_err());
        config.max_poll_interval = Duration::from_secs(30);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fixed_delay() {
        let config = Config::default();
        assert_eq!(config.delay_after(1), Duration::from_millis(2000));
        assert_eq!(config.delay_after(4), Duration::from_millis(2000));
    }

    #[test]
    fn test_backoff_is_capped() {
        let mut config = Config::new("http://localhost:2358");
        config.poll_interval = Duration::from_secs(1);
        config.backoff_factor = 2.0;
        config.max_poll_interval = Duration::from_secs(5);

        assert_eq!(config.delay_after(1), Duration::from_secs(1));
        assert_eq!(config.delay_after(2), Duration::from_secs(2));
        assert_eq!(config.delay_after(3), Duration::from_secs(4));
        assert_eq!(config.delay_after(4), Duration::from_secs(5));
    }

    #[test]
    fn test_judge0_client_from_config() {
        let client = Config::new("http://localhost:2358/").judge0_client().unwrap();
        assert_eq!(client.base_url(), "http://localhost:2358");
    }
}
