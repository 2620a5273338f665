//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health - Feed state, uptime and version

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::console::state::ConsoleState;
use crate::feed::ConnectionState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub feed: ConnectionState,
    pub robots: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// `healthy` while the feed is open, `unhealthy` once reconnecting has
/// been abandoned, `degraded` otherwise.
pub async fn full_health(State(state): State<Arc<ConsoleState>>) -> Json<HealthResponse> {
    let (feed, robots) = {
        let dashboard = state.dashboard.read().await;
        (dashboard.feed.state, dashboard.directory.len())
    };

    let status = match feed {
        ConnectionState::Open => "healthy",
        ConnectionState::GaveUp => "unhealthy",
        ConnectionState::Connecting | ConnectionState::Closed => "degraded",
    };

    Json(HealthResponse {
        status: status.to_string(),
        feed,
        robots,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        assert_eq!(liveness().await, StatusCode::OK);
    }
}
