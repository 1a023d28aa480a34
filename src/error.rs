//! Error handling for the Base44 Rust client

use std::fmt;
use thiserror::Error;

/// Unified error type for the Base44 Rust client
#[derive(Error, Debug)]
pub enum Error {
    /// Login rejected by the backend. Deliberately carries no detail
    /// beyond the fact of failure.
    #[error("login failed")]
    Authentication,

    /// Registration rejected by the backend (invalid or duplicate account)
    #[error("registration failed: {0}")]
    Registration(String),

    /// Non-success HTTP status on an API call
    #[error("request to {endpoint} failed with status {status}")]
    Api { status: u16, endpoint: String },

    /// Response body that is not valid JSON, or does not match the
    /// expected shape
    #[error("malformed response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// Network or transport errors
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request body serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Create a new registration error
    pub fn registration<T: fmt::Display>(msg: T) -> Self {
        Error::Registration(msg.to_string())
    }

    /// Create a new API error for a non-success status
    pub fn api(status: u16, endpoint: &str) -> Self {
        Error::Api {
            status,
            endpoint: endpoint.to_string(),
        }
    }

    /// The HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
