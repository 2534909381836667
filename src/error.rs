//! Unified error type for the Mardify client.
//!
//! The taxonomy is deliberately small: a caller can always distinguish "I never
//! sent anything" ([`Error::Validation`]), "the deadline passed"
//! ([`Error::Timeout`]), "the host was unreachable" ([`Error::Network`]), and
//! "the host answered with a failure" ([`Error::Remote`]).

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A local precondition failed; no network request was attempted.
    #[error("validation error: {0}")]
    Validation(String),

    /// The request exceeded the configured deadline. The in-flight connection
    /// is aborted; there is no late resolution.
    #[error("request timed out")]
    Timeout,

    /// The transport could not reach the host or the transfer broke off.
    #[error("network error: {0}")]
    Network(String),

    /// The host responded with a non-success status.
    #[error("HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// The 404 class that endpoint probing treats as "try the next candidate".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Remote { status: 404, .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Network(err.to_string())
        }
    }
}

/// Error payload shape the backend is known to produce.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Decode a human-readable message from a non-success response body.
///
/// Checks the `error` field, then `message`, first non-empty wins; falls back
/// to `"Error <status>: <reason>"`.
pub(crate) fn remote_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        let explicit = parsed
            .error
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .or_else(|| {
                parsed
                    .message
                    .as_deref()
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
            });
        if let Some(message) = explicit {
            return message.to_string();
        }
    }

    format!(
        "Error {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("request failed")
    )
}
