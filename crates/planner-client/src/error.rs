//! Error types for API operations.

use reqwest::StatusCode;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// API client error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Server answered with a non-2xx status.
    ///
    /// `message` is the server-provided text when one could be extracted,
    /// otherwise the status reason phrase.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Best-effort human readable message.
        message: String,
    },

    /// Transport failure (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Token store could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] crate::session::StoreError),

    /// The server answered 2xx but the body did not match the endpoint contract.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Builds a status error from the raw response parts.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        Self::Status {
            status: status.as_u16(),
            message: error_message(status, body),
        }
    }

    /// HTTP status carried by this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the stored session is no longer accepted (401 or 403).
    #[must_use]
    pub const fn is_session_invalid(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Whether the request never produced an HTTP response.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Message suitable for showing to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Extracts a readable message from an error body.
///
/// Order of preference: a non-blank string `message` field of a JSON object,
/// the trimmed raw body, the status reason phrase.
#[must_use]
pub fn error_message(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status_text(status);
    }

    if (trimmed.starts_with('{') || trimmed.starts_with('['))
        && let Ok(serde_json::Value::Object(map)) =
            serde_json::from_str::<serde_json::Value>(trimmed)
        && let Some(serde_json::Value::String(message)) = map.get("message")
        && !message.trim().is_empty()
    {
        return message.trim().to_string();
    }

    trimmed.to_string()
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_string(), ToString::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_message_field_is_preferred() {
        let err = Error::from_response(StatusCode::BAD_REQUEST, r#"{"message":"Invalid date"}"#);
        assert_eq!(err.message(), "Invalid date");
        assert_eq!(err.to_string(), "Invalid date");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_message_field_is_trimmed() {
        let msg = error_message(StatusCode::NOT_FOUND, r#"  {"message":"  Not here "}  "#);
        assert_eq!(msg, "Not here");
    }

    #[test]
    fn test_blank_message_field_falls_back_to_body() {
        let body = r#"{"message":"   ","path":"/x"}"#;
        assert_eq!(error_message(StatusCode::BAD_REQUEST, body), body);
    }

    #[test]
    fn test_non_string_message_falls_back_to_body() {
        let body = r#"{"message":42}"#;
        assert_eq!(error_message(StatusCode::BAD_REQUEST, body), body);
    }

    #[test]
    fn test_plain_body_is_used() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "  boom \n"),
            "boom"
        );
    }

    #[test]
    fn test_broken_json_is_used_verbatim() {
        assert_eq!(error_message(StatusCode::BAD_REQUEST, "{oops"), "{oops");
    }

    #[test]
    fn test_empty_body_uses_status_text() {
        assert_eq!(error_message(StatusCode::UNAUTHORIZED, ""), "Unauthorized");
        assert_eq!(error_message(StatusCode::FORBIDDEN, "   "), "Forbidden");
    }

    #[test]
    fn test_session_invalid_statuses() {
        assert!(Error::from_response(StatusCode::UNAUTHORIZED, "").is_session_invalid());
        assert!(Error::from_response(StatusCode::FORBIDDEN, "").is_session_invalid());
        assert!(!Error::from_response(StatusCode::BAD_REQUEST, "").is_session_invalid());
        assert!(!Error::InvalidResponse("x".into()).is_session_invalid());
    }
}
