//! Client Error Types
//!
//! Centralized error taxonomy for the board client, with HTTP status
//! classification and user-facing messages.

use serde_json::Value;

/// Message shown when nothing more specific is available.
pub const GENERIC_MESSAGE: &str = "An unknown error occurred.";

/// Client error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// Client-side validation failed before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A business rule rejected an otherwise valid response.
    #[error("Rule violation: {0}")]
    Rule(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Transport failure, no response received.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unknown response shape")]
    UnknownResponseShape,

    #[error("Invalid entity: {0}")]
    InvalidEntity(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Classify a non-success HTTP response.
    ///
    /// The server `message` field is kept when present so that 400/409 and
    /// unclassified statuses can surface it to the user.
    pub fn from_status(status: u16, body: &Value) -> Self {
        let server_message = server_message(body);
        let message = |fallback: &str| server_message.clone().unwrap_or_else(|| fallback.to_string());

        match status {
            400 => ClientError::BadRequest(message("The request was invalid.")),
            401 => ClientError::Unauthorized(message("Authentication required.")),
            403 => ClientError::Forbidden(message("Access denied.")),
            404 => ClientError::NotFound(message("Resource not found.")),
            409 => ClientError::Conflict(message("The data already exists.")),
            500..=599 => ClientError::Server {
                status,
                message: message("Internal server error"),
            },
            _ => ClientError::Http {
                status,
                message: message(GENERIC_MESSAGE),
            },
        }
    }

    /// HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::BadRequest(_) => Some(400),
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Forbidden(_) => Some(403),
            ClientError::NotFound(_) => Some(404),
            ClientError::Conflict(_) => Some(409),
            ClientError::Server { status, .. } | ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error should end the authenticated session.
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }

    /// Text suitable for the shared `error` field of a store.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::NotFound(_) => "The requested item could not be found.".into(),
            ClientError::Server { .. } => "A server error occurred. Please try again later.".into(),
            ClientError::Network(_) => "Unable to reach the server. Please check your connection.".into(),
            ClientError::Unauthorized(_) => "Authentication required. Please log in again.".into(),
            ClientError::Forbidden(_) => "You do not have permission to perform this action.".into(),
            ClientError::UnknownResponseShape => "Unknown response format.".into(),
            ClientError::InvalidEntity(_) => "The server returned an invalid item.".into(),
            ClientError::Validation(msg)
            | ClientError::Rule(msg)
            | ClientError::BadRequest(msg)
            | ClientError::Conflict(msg)
            | ClientError::Http { message: msg, .. }
            | ClientError::Decode(msg)
            | ClientError::Storage(msg) => {
                if msg.is_empty() {
                    GENERIC_MESSAGE.into()
                } else {
                    msg.clone()
                }
            }
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

/// Extract the `message` field of an error body.
fn server_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}
