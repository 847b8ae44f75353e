//! Response type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ping response for health checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    /// Server uptime in seconds
    pub server_uptime: u64,

    /// Server version
    pub version: String,
}

impl PingResponse {
    /// Create a new ping response
    pub fn new(server_uptime: u64, version: impl Into<String>) -> Self {
        Self {
            server_uptime,
            version: version.into(),
        }
    }
}

/// Result of `POST /cpf/validate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpfValidationResponse {
    /// Digits-only form of the submitted value
    pub cpf: String,

    /// Whether the check digits match
    pub valid: bool,

    /// `000.000.000-00` rendering, present when the input has 11 digits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

/// Error response for API errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Optional error context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Error timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Service version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            context: None,
            timestamp: Some(Utc::now()),
            version: Some(crate::utils::version::get_version().to_string()),
        }
    }

    /// Create error response with context
    pub fn with_context(error: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            ..Self::new(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_response_serialization() {
        let json = serde_json::to_value(PingResponse::new(42, "0.3.1")).unwrap();
        assert_eq!(json["server_uptime"], 42);
        assert_eq!(json["version"], "0.3.1");
    }

    #[test]
    fn test_cpf_response_omits_missing_format() {
        let response = CpfValidationResponse {
            cpf: "123".into(),
            valid: false,
            formatted: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("formatted"));
    }

    #[test]
    fn test_error_response_with_context() {
        let response = ErrorResponse::with_context("bad input", "cpf");
        assert_eq!(response.error, "bad input");
        assert_eq!(response.context.as_deref(), Some("cpf"));
        assert!(response.timestamp.is_some());
        assert!(response.version.is_some());
    }
}
