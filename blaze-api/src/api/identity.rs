//! Caller identity extraction
//!
//! The session middleware forwards the signed-in user as JSON in the
//! `x-user` header. The header is optional for code runs; when present it
//! must parse.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use blaze_core::domain::identity::CallerIdentity;

use crate::api::error::ApiError;

/// Header carrying the caller identity
pub const USER_HEADER: &str = "x-user";

/// Optional caller identity
#[derive(Debug, Clone)]
pub struct Caller(pub Option<CallerIdentity>);

impl Caller {
    pub fn id(&self) -> Option<i64> {
        self.0.as_ref().map(|c| c.id)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_HEADER) else {
            return Ok(Caller(None));
        };

        let raw = value
            .to_str()
            .map_err(|_| ApiError::BadRequest("Invalid x-user header".to_string()))?;

        CallerIdentity::parse(raw)
            .map(|caller| Caller(Some(caller)))
            .map_err(|e| {
                tracing::debug!("Failed to parse x-user header: {}", e);
                ApiError::BadRequest("Invalid x-user header".to_string())
            })
    }
}
