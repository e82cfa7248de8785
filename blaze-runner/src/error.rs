//! Failure modes of a run

use blaze_core::domain::job::InvalidRequest;
use thiserror::Error;

/// Why a run produced no result
#[derive(Debug, Error)]
pub enum RunError {
    /// Rejected before any network call
    #[error("{0}")]
    InvalidInput(#[from] InvalidRequest),

    /// The service answered the submission without a usable token
    #[error("Failed to create submission: {0}")]
    SubmissionFailed(String),

    /// No terminal status within the attempt budget or deadline
    #[error("Polling timed out after {attempts} attempt(s)")]
    PollingTimedOut {
        attempts: u32,
        /// Last swallowed poll error, if any
        last_error: Option<String>,
    },

    /// Network failure while submitting
    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Run cancelled")]
    Cancelled,
}

impl RunError {
    /// HTTP status used when reporting this error to callers
    pub fn status_code(&self) -> u16 {
        match self {
            RunError::InvalidInput(_) => 400,
            RunError::SubmissionFailed(_)
            | RunError::PollingTimedOut { .. }
            | RunError::TransportError(_) => 500,
            RunError::Cancelled => 503,
        }
    }

    /// Message safe to show to callers
    ///
    /// Transport and upstream details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            RunError::InvalidInput(e) => e.to_string(),
            RunError::SubmissionFailed(_) => "Failed to create submission".to_string(),
            RunError::PollingTimedOut { .. } => {
                "Polling timed out. Could not get result from the execution service".to_string()
            }
            RunError::TransportError(_) => "Could not reach the execution service".to_string(),
            RunError::Cancelled => "Server is shutting down".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RunError::InvalidInput(InvalidRequest::MissingCode).status_code(),
            400
        );
        assert_eq!(RunError::SubmissionFailed("x".into()).status_code(), 500);
        assert_eq!(
            RunError::PollingTimedOut {
                attempts: 5,
                last_error: None
            }
            .status_code(),
            500
        );
        assert_eq!(RunError::TransportError("x".into()).status_code(), 500);
        assert_eq!(RunError::Cancelled.status_code(), 503);
    }

    #[test]
    fn test_public_message_redacts_details() {
        let err = RunError::TransportError("connect 10.0.0.3:443 refused".into());
        assert!(!err.public_message().contains("10.0.0.3"));

        let err = RunError::InvalidInput(InvalidRequest::UnsupportedLanguage("Cobol".into()));
        assert_eq!(err.public_message(), "Unsupported language: Cobol");
    }
}
