//! Classification of 401 responses

use crate::config::SessionSettings;
use serde_json::Value;

/// What kind of 401 the backend sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedKind {
    /// Body carries an `error` field; passed back untouched
    Flagged,
    /// `message` names an expired or invalid token; worth a refresh
    Expired,
    /// Anything else; the session is not recoverable
    Other,
}

/// A classified 401 body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnauthorizedBody {
    /// Kind of failure
    pub kind: UnauthorizedKind,
    /// `message` field, when the body is a JSON object carrying a string one
    pub message: Option<String>,
}

/// Classify a 401 response body
///
/// The `error` field only needs to be present; its value is irrelevant.
/// Bodies that are not JSON objects classify as [`UnauthorizedKind::Other`].
pub fn classify(body: &[u8], session: &SessionSettings) -> UnauthorizedBody {
    let object = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => object,
        _ => {
            return UnauthorizedBody {
                kind: UnauthorizedKind::Other,
                message: None,
            };
        }
    };

    let message = object
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);

    let kind = if object.contains_key("error") {
        UnauthorizedKind::Flagged
    } else if message
        .as_deref()
        .is_some_and(|m| session.is_expiry_message(m))
    {
        UnauthorizedKind::Expired
    } else {
        UnauthorizedKind::Other
    };

    UnauthorizedBody { kind, message }
}
