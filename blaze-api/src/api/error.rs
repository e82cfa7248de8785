//! API Error Handling
//!
//! Every failure is rendered as the `{ success: false, status, message }`
//! envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use blaze_core::dto::envelope::Envelope;
use blaze_runner::RunError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Run(RunError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Run(err) => {
                match &err {
                    RunError::InvalidInput(_) => tracing::debug!("Rejected run: {}", err),
                    RunError::PollingTimedOut {
                        attempts,
                        last_error,
                    } => tracing::error!(
                        "Run timed out after {} attempt(s), last error: {:?}",
                        attempts,
                        last_error
                    ),
                    _ => tracing::error!("Run failed: {}", err),
                }
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, err.public_message())
            }
        };

        let body = Envelope::<()>::error(status.as_u16(), message);
        (status, Json(body)).into_response()
    }
}

impl From<RunError> for ApiError {
    fn from(err: RunError) -> Self {
        ApiError::Run(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
