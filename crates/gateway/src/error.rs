/// Errors from the backend gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (DNS, connect, TLS, timeout); no
    /// response was received.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend refused the credential (401/403). A missing, invalid,
    /// and expired token are indistinguishable from the client's side.
    #[error("authentication failed (HTTP {status})")]
    Auth { status: u16 },

    /// The backend rejected the input (other 4xx), e.g. a weak password
    /// or an already-registered email. `message` is extracted from the
    /// backend's error payload when one is present.
    #[error("request rejected (HTTP {status}): {message}")]
    Validation { status: u16, message: String },

    /// Any other non-2xx response.
    #[error("backend error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// The response body could not be decoded into the expected shape,
    /// or a write that should echo the persisted row returned none.
    #[error("failed to decode backend response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Classify a non-2xx status plus its body text.
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => GatewayError::Auth { status },
            400..=499 => GatewayError::Validation {
                status,
                message: extract_message(&body).unwrap_or(body),
            },
            _ => GatewayError::Api { status, body },
        }
    }
}

/// Pull a human-readable message out of a backend error payload. The auth
/// and table endpoints disagree on the field name, so try each in turn.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for field in ["msg", "message", "error_description"] {
        if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
            return Some(text.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses() {
        assert!(matches!(
            GatewayError::from_status(401, String::new()),
            GatewayError::Auth { status: 401 }
        ));
        assert!(matches!(
            GatewayError::from_status(403, String::new()),
            GatewayError::Auth { status: 403 }
        ));
    }

    #[test]
    fn test_validation_message_extraction() {
        let err = GatewayError::from_status(
            422,
            r#"{"msg": "Password should be at least 6 characters"}"#.to_string(),
        );
        match err {
            GatewayError::Validation { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Password should be at least 6 characters");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_falls_back_to_raw_body() {
        let err = GatewayError::from_status(400, "not json".to_string());
        match err {
            GatewayError::Validation { message, .. } => assert_eq!(message, "not json"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_server_errors_are_api() {
        assert!(matches!(
            GatewayError::from_status(500, "boom".to_string()),
            GatewayError::Api { status: 500, .. }
        ));
    }
}
