//! Feed error types

use thiserror::Error;

/// Errors on the live feed connection
#[derive(Error, Debug)]
pub enum FeedError {
    /// Could not establish the connection
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The open connection reported an error
    #[error("Transport error: {0}")]
    Transport(String),

    /// A frame could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for FeedError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        FeedError::Transport(err.to_string())
    }
}
