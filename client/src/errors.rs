//! Application-wide error types.
//!
//! Every failure is surfaced exactly once at the command boundary; nothing
//! is retried or escalated. `Mutation` carries the backend-supplied message
//! when the response body had one, and a per-operation fallback otherwise.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{context} (HTTP {status})")]
    Fetch { status: u16, context: String },

    #[error("{message} (HTTP {status})")]
    Mutation { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not signed in — run `donations login` first")]
    NoSession,

    #[error("This action requires an institution sign-in")]
    NotInstitution,
}

pub type Result<T> = std::result::Result<T, ClientError>;
