//! Backend client error types

use thiserror::Error;

/// Errors talking to the telemetry backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Backend is not reachable
    #[error("Backend unavailable")]
    Unavailable,

    /// Backend answered with a non-success status and an unreadable body
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl BackendError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else if err.is_connect() {
            BackendError::Unavailable
        } else {
            BackendError::Request(err)
        }
    }
}
