//! Server configuration

use anyhow::Context;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

use crate::api::identity::USER_HEADER;

/// Front end allowed to call the API from a browser
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://tryblaze.netlify.app";

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_addr: String,

    /// Origin granted CORS access to `/api/*`
    pub allowed_origin: String,
}

impl ServerConfig {
    /// Reads BLAZE_BIND_ADDR and BLAZE_ALLOWED_ORIGIN, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var("BLAZE_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(origin) = std::env::var("BLAZE_ALLOWED_ORIGIN") {
            config.allowed_origin = origin;
        }
        config
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if !self.allowed_origin.starts_with("http://") && !self.allowed_origin.starts_with("https://")
        {
            anyhow::bail!("allowed_origin must start with http:// or https://");
        }

        Ok(())
    }

    /// CORS policy for the API routes
    ///
    /// Credentials are allowed, so the origin is always explicit.
    pub fn cors_layer(&self) -> anyhow::Result<CorsLayer> {
        let origin = HeaderValue::from_str(&self.allowed_origin)
            .with_context(|| format!("Invalid allowed origin: {}", self.allowed_origin))?;

        Ok(CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::DELETE,
                Method::PATCH,
                Method::POST,
                Method::PUT,
            ])
            .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(USER_HEADER)]))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert!(config.validate().is_ok());
        assert!(config.cors_layer().is_ok());
    }

    #[test]
    fn test_invalid_origin() {
        let config = ServerConfig {
            allowed_origin: "tryblaze.netlify.app".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
