//! Request type definitions
//!
//! Bodies sent to the backend refresh endpoint and accepted by the bundled
//! server.

use serde::{Deserialize, Serialize};

/// Body of the session refresh call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token read from the cookie store; omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl RefreshRequest {
    /// Create a refresh request
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

/// Success body of the session refresh call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Newly issued session token
    pub token: String,
}

/// Body of `POST /cpf/validate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpfValidationRequest {
    /// CPF as typed by the user, punctuation allowed
    pub cpf: String,
}
