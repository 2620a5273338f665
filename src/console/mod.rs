//! Operator Console
//!
//! HTTP surface of the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /?w=&h=` - Operator page sized for the caller
//! - `GET /api/state` - JSON snapshot
//!
//! ## Actions
//! - `POST /api/robots/refresh` - Reload the robot directory
//! - `POST /api/robots/:id/select` - Select a robot
//! - `POST /api/commands` - Command the selected robot
//! - `POST /api/views/:view` - Switch panel
//! - `POST /api/viewport` - Report viewport size
//! - `POST /api/alert/dismiss` - Dismiss the alert
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status

pub mod error;
pub mod render;
pub mod routes;
pub mod state;

pub use error::{ConsoleError, ConsoleResult};
pub use state::{ConsoleSettings, ConsoleState};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::watch;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ConsoleConfig;

/// Build the console router with all routes and middleware
pub fn build_router(state: ConsoleState) -> Router {
    let api_routes = Router::new()
        .route("/state", get(routes::page::snapshot))
        .route("/robots/refresh", post(routes::actions::refresh_robots))
        .route("/robots/:id/select", post(routes::actions::select_robot))
        .route("/commands", post(routes::actions::send_command))
        .route("/views/:view", post(routes::actions::navigate))
        .route("/viewport", post(routes::actions::resize))
        .route("/alert/dismiss", post(routes::actions::dismiss_alert));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Serve the console until a shutdown signal or dashboard shutdown
pub async fn serve(state: ConsoleState, config: &ConsoleConfig) -> Result<(), ConsoleError> {
    let stop = state.dashboard.shutdown_receiver();
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("robodash console listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(stop))
        .await
        .map_err(|e| ConsoleError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("robodash console shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C, SIGTERM or dashboard shutdown
async fn shutdown_signal(mut stop: watch::Receiver<bool>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let dashboard_stopped = async {
        while !*stop.borrow() {
            if stop.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
        _ = dashboard_stopped => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
