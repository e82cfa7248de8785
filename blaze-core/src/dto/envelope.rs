//! Response envelope shared by every Blaze API route

use serde::{Deserialize, Serialize};

/// `{ success, status, payload }` on success, `{ success, status, message }`
/// on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            status: 200,
            payload: Some(payload),
            message: None,
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            status,
            payload: None,
            message: Some(message.into()),
        }
    }

    /// Splits the envelope into its payload or its error message
    pub fn into_result(self) -> Result<T, (u16, String)> {
        match (self.success, self.payload) {
            (true, Some(payload)) => Ok(payload),
            (_, _) => Err((
                self.status,
                self.message
                    .unwrap_or_else(|| "Missing response payload".to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::run::RunResponse;

    #[test]
    fn test_error_shape() {
        let json = serde_json::to_value(Envelope::<()>::error(400, "bad")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "status": 400, "message": "bad" })
        );
    }

    #[test]
    fn test_error_envelope_without_payload_decodes() {
        let envelope: Envelope<RunResponse> = serde_json::from_str(
            r#"{"success": false, "status": 400, "message": "Unsupported language"}"#,
        )
        .unwrap();
        assert!(envelope.payload.is_none());
        assert_eq!(
            envelope.into_result().unwrap_err(),
            (400, "Unsupported language".to_string())
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Envelope::ok(5).into_result(), Ok(5));
        assert_eq!(
            Envelope::<i32>::error(500, "boom").into_result(),
            Err((500, "boom".to_string()))
        );
    }
}
