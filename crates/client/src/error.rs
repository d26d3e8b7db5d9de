//! Errors surfaced by the service layer.

/// Errors from [`ApiClient`](crate::client::ApiClient) calls and form checks.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, TLS, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// The per-request timeout elapsed.
    #[error("Request timed out")]
    Timeout,

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        /// The server's `error` (or `message`) field, or the raw body.
        message: String,
    },

    /// A 2xx body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A form failed its client-side checks; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl ClientError {
    /// HTTP status of an [`Http`](ClientError::Http) error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClientError::Validation(errors.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Pull a human-readable message out of an error body.
///
/// The server answers `{ "error": "...", "code": "..." }`; older
/// deployments used `{ "message": "..." }`. Anything else is returned as-is.
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "<empty body>".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_prefers_error_field() {
        let body = r#"{"error":"A reason is required when rejecting a request","code":"VALIDATION_ERROR"}"#;
        assert_eq!(
            error_message(body),
            "A reason is required when rejecting a request"
        );
    }

    #[test]
    fn message_falls_back_to_message_field() {
        assert_eq!(error_message(r#"{"message":"Not allowed"}"#), "Not allowed");
    }

    #[test]
    fn message_falls_back_to_raw_body() {
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_message(""), "<empty body>");
    }

    #[test]
    fn status_only_for_http_errors() {
        let err = ClientError::Http {
            status: 409,
            message: "conflict".into(),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(ClientError::Timeout.status(), None);
    }
}
