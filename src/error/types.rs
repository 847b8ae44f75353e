//! Error taxonomy for the session client, cookie layer and page server.

use std::sync::Arc;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error in {field}: {message}")]
    Config {
        /// The configuration field that has an error
        field: String,
        /// Error message describing the issue
        message: String,
    },

    /// A 401 the client does not recover from, passed back to the caller as-is
    #[error("Unauthorized: {}", message.as_deref().unwrap_or("no message"))]
    Unauthorized {
        /// `message` field of the response body, when present
        message: Option<String>,
        /// Raw response body
        body: String,
    },

    /// A 401 unrelated to token expiry observed while running server-side,
    /// where there is no interactive session to sign out of.
    #[error("Authentication token error")]
    AuthToken,

    /// Any other non-success response
    #[error("Request failed with status {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The session refresh failed; every request waiting on it shares the
    /// same underlying error.
    #[error("Session refresh failed: {0}")]
    Refresh(Arc<Error>),

    /// Validation errors
    #[error("Validation failed for {field}: {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Error message describing the validation failure
        message: String,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal issue
        message: String,
        /// Additional context about where the error occurred
        context: Option<String>,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(field: S, message: S) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an unauthorized error from a raw 401 body
    pub fn unauthorized(message: Option<String>, body: impl Into<String>) -> Self {
        Self::Unauthorized {
            message,
            body: body.into(),
        }
    }

    /// Create a status error for a non-success response
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            context: None,
        }
    }

    /// Create an internal error with context
    pub fn internal_with_context<S: Into<String>>(message: S, context: S) -> Self {
        Self::Internal {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// HTTP status code carried by the error, if it came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Unauthorized { .. } | Error::AuthToken => Some(401),
            Error::Status { status, .. } => Some(*status),
            Error::Refresh(inner) => inner.status_code(),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the error means the session is no longer usable
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Error::Unauthorized { .. } | Error::AuthToken | Error::Refresh(_) => true,
            Error::Status { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::Status { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Http(..) => "http",
            Error::Json(..) => "json",
            Error::Toml(..) => "toml",
            Error::Url(..) => "url",
            Error::Io(..) => "io",
            Error::Config { .. } => "config",
            Error::Unauthorized { .. } => "unauthorized",
            Error::AuthToken => "auth_token",
            Error::Status { .. } => "status",
            Error::Refresh(..) => "refresh",
            Error::Validation { .. } => "validation",
            Error::Internal { .. } => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::config("field", "test config error");
        assert!(matches!(err, Error::Config { .. }));
        assert_eq!(
            err.to_string(),
            "Configuration error in field: test config error"
        );
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_unauthorized_display() {
        let err = Error::unauthorized(Some("jwt malformed".to_string()), "{}");
        assert_eq!(err.to_string(), "Unauthorized: jwt malformed");
        assert_eq!(err.status_code(), Some(401));

        let err = Error::unauthorized(None, "");
        assert_eq!(err.to_string(), "Unauthorized: no message");
    }

    #[test]
    fn test_auth_token_error() {
        let err = Error::AuthToken;
        assert_eq!(err.to_string(), "Authentication token error");
        assert!(err.is_auth_failure());
        assert_eq!(err.category(), "auth_token");
    }

    #[test]
    fn test_refresh_error_shares_inner() {
        let inner = Arc::new(Error::status(500, "boom"));
        let a = Error::Refresh(inner.clone());
        let b = Error::Refresh(inner.clone());

        match (&a, &b) {
            (Error::Refresh(x), Error::Refresh(y)) => assert!(Arc::ptr_eq(x, y)),
            _ => unreachable!(),
        }
        assert_eq!(a.status_code(), Some(500));
        assert!(a.to_string().contains("Session refresh failed"));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(Error::status(503, "").is_retryable());
        assert!(!Error::status(400, "").is_retryable());
        assert!(!Error::AuthToken.is_retryable());
    }

    #[test]
    fn test_status_401_is_auth_failure() {
        assert!(Error::status(401, "").is_auth_failure());
        assert!(!Error::status(404, "").is_auth_failure());
    }
}
