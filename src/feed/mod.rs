//! Live Feed
//!
//! Reconnecting WebSocket subscription to the backend push channel.
//!
//! Connection lifecycle:
//!
//! ```text
//! Connecting --open--> Open --close/error--> Closed --delay--> Connecting
//!                                              |
//!                                              +--attempt cap--> GaveUp
//! ```
//!
//! The client never sends frames of its own.

mod backoff;
mod client;
mod error;
mod messages;

pub use backoff::ReconnectPolicy;
pub use client::{FeedClient, FeedConnector, FrameStream, WsConnector};
pub use error::FeedError;
pub use messages::FeedMessage;

use serde::Serialize;

/// State of the feed connection as shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Connecting,
    Open,
    Closed,
    /// Reconnect attempts exhausted
    GaveUp,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Closed => "closed",
            ConnectionState::GaveUp => "gave_up",
        }
    }
}
