//! Caller identity supplied by the session layer

use serde::{Deserialize, Serialize};

/// Authenticated user as forwarded by the session middleware
///
/// Unknown fields are ignored; `id` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl CallerIdentity {
    /// Parses the JSON carried in the identity header
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identity() {
        let caller =
            CallerIdentity::parse(r#"{"id": 7, "email": "a@b.c", "role": "admin"}"#).unwrap();
        assert_eq!(caller.id, 7);
        assert_eq!(caller.email.as_deref(), Some("a@b.c"));
        assert_eq!(caller.name, None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(CallerIdentity::parse("null").is_err());
        assert!(CallerIdentity::parse("{\"email\": \"x\"}").is_err());
        assert!(CallerIdentity::parse("not json").is_err());
    }
}
