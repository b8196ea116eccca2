//! Backend-specific error types
//!
//! Errors that can occur while talking to the hosted backend.

use thiserror::Error;

/// Errors that can occur during a backend request
#[derive(Error, Debug)]
pub enum BackendError {
    /// The HTTP request could not be sent or the connection failed
    #[error("Request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message reported by the backend
        message: String,
    },

    /// The anon key cannot be sent as a header value
    #[error("Invalid anon key: {0}")]
    InvalidKey(String),

    /// Response body was not the expected JSON shape
    #[error("Failed to decode backend response: {0}")]
    Decode(String),

    /// Rows could not be serialized for a write
    #[error("Failed to encode rows: {0}")]
    Encode(#[from] serde_json::Error),
}
