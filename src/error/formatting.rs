//! Error formatting utilities
//!
//! Renders [`Error`] values for console output and structured log fields.

use crate::Error;
use std::error::Error as StdError;

/// Longest response body excerpt included in a formatted message
const BODY_PREVIEW_LIMIT: usize = 200;

/// Format error for display, appending nested causes
pub fn format_error(error: &Error) -> String {
    let formatted = match error {
        Error::Unauthorized { message, body } => match message {
            Some(message) => format!("Unauthorized (401): {}", message),
            None if body.is_empty() => "Unauthorized (401)".to_string(),
            None => format!("Unauthorized (401): {}", body_preview(body)),
        },

        Error::Status { status, body } => {
            if body.is_empty() {
                format!("Request failed with status {}", status)
            } else {
                format!(
                    "Request failed with status {}: {}",
                    status,
                    body_preview(body)
                )
            }
        }

        Error::Refresh(inner) => format!("Session refresh failed: {}", format_error(inner)),

        Error::Internal { message, context } => match context {
            Some(context) => format!("Internal error in {}: {}", context, message),
            None => format!("Internal error: {}", message),
        },

        _ => error.to_string(),
    };

    let mut result = formatted;
    let mut source = error.source();

    while let Some(cause) = source {
        if !result.contains(&cause.to_string()) {
            result = format!("{} (caused by {})", result, cause);
        }
        source = cause.source();
    }

    result
}

/// Format error for logging with structured data
pub fn format_error_for_logging(error: &Error) -> serde_json::Value {
    let mut log_data = serde_json::json!({
        "message": format_error(error),
        "category": error.category(),
        "retryable": error.is_retryable(),
    });

    if let Some(status) = error.status_code() {
        log_data["status"] = serde_json::Value::Number(status.into());
    }

    if let Error::Refresh(inner) = error {
        log_data["refresh_cause"] = serde_json::Value::String(inner.category().to_string());
    }

    log_data
}

fn body_preview(body: &str) -> String {
    if body.len() <= BODY_PREVIEW_LIMIT {
        return body.to_string();
    }

    let mut end = BODY_PREVIEW_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, total {} bytes)", &body[..end], body.len())
}
