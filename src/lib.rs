//! # robodash
//!
//! Operator console for a fleet of telemetry-reporting robots.
//!
//! ## Features
//!
//! - **Live feed**: reconnecting WebSocket subscription with capped backoff
//! - **Charts**: five bounded-window charts laid out against the viewport
//! - **Robot control**: directory, selection and command dispatch
//! - **Console**: server-rendered operator page and a JSON API
//!
//! ## Modules
//!
//! - [`dashboard`]: application context and all display state
//! - [`feed`]: live feed client
//! - [`backend`]: REST client for the telemetry backend
//! - [`refresh`]: periodic axis and metric timers
//! - [`console`]: operator HTTP server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use robodash::backend::HttpBackend;
//! use robodash::config::Config;
//! use robodash::dashboard::Dashboard;
//! use robodash::feed::FeedClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let backend = Arc::new(HttpBackend::new(&config.backend)?);
//!     let dashboard = Arc::new(Dashboard::init(backend));
//!
//!     let feed = FeedClient::new(config.backend.feed_url(), config.feed.reconnect.clone())
//!         .spawn(Arc::clone(&dashboard));
//!
//!     dashboard.load_robots().await?;
//!     dashboard.select_robot("r1").await?;
//!     dashboard.send_command("stop").await?;
//!
//!     dashboard.shutdown();
//!     feed.await?;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod console;
pub mod dashboard;
pub mod feed;
pub mod refresh;
pub mod types;

pub use backend::{Backend, BackendError, HttpBackend};
pub use config::{Config, ConfigError};
pub use console::{build_router, serve, ConsoleError, ConsoleSettings, ConsoleState};
pub use dashboard::{
    CommandOutcome, Dashboard, DashboardError, DashboardResult, DashboardState, View, Viewport,
};
pub use feed::{ConnectionState, FeedClient, FeedConnector, FeedError, ReconnectPolicy};
pub use types::{Robot, SensorReading};
