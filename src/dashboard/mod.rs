//! Dashboard
//!
//! The application context. [`Dashboard::init`] builds every chart before
//! anything else can touch the state, and [`Dashboard::shutdown`] tells the
//! feed client and refresh timers to stop.
//!
//! All state sits behind one lock. Each handler takes the write lock for a
//! single synchronous mutation and never holds it across a network call.

mod charts;
mod commands;
mod directory;
mod error;
mod metrics;
mod status;
mod table;
mod views;
mod window;

pub use charts::{
    Chart, ChartKind, ChartRegistry, ChartType, Layout, PieSlice, Series, Viewport,
    ANOMALY_ALERT_THRESHOLD, REALTIME_POINTS, RESOURCE_POINTS,
};
pub use commands::{CommandOutcome, NO_ROBOT_SELECTED_ALERT};
pub use directory::{RobotDirectory, Selection};
pub use error::{DashboardError, DashboardResult};
pub use metrics::MetricDisplays;
pub use status::StatusLine;
pub use table::{Badge, SensorTable, TableRow, TABLE_CAPACITY};
pub use views::{View, ViewRouter};
pub use window::SlidingWindow;

use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{watch, RwLock, RwLockReadGuard};

use crate::backend::Backend;
use crate::feed::{ConnectionState, FeedError, FeedMessage};
use crate::types::SensorReading;

/// Feed connection summary
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedStatus {
    pub state: ConnectionState,
    /// Consecutive reconnect attempt in progress (0 on first connect)
    pub reconnect_attempt: u32,
    /// Connections that reached the open state
    pub connections: u64,
    /// Frames that failed to decode
    pub frames_dropped: u64,
    /// Most recent connection or transport error, cleared on open
    pub last_error: Option<String>,
}

/// Everything the console renders
#[derive(Debug, Serialize)]
pub struct DashboardState {
    pub charts: ChartRegistry,
    pub table: SensorTable,
    pub metrics: MetricDisplays,
    pub directory: RobotDirectory,
    pub status: StatusLine,
    pub router: ViewRouter,
    /// Blocking alert awaiting dismissal
    pub alert: Option<String>,
    pub viewport: Viewport,
    pub feed: FeedStatus,
    #[serde(skip)]
    rng: StdRng,
}

impl DashboardState {
    pub fn new(mut rng: StdRng) -> Self {
        let viewport = Viewport::default();
        let charts = ChartRegistry::init(&mut rng, Local::now(), viewport);

        Self {
            charts,
            table: SensorTable::default(),
            metrics: MetricDisplays::default(),
            directory: RobotDirectory::default(),
            status: StatusLine::default(),
            router: ViewRouter::default(),
            alert: None,
            viewport,
            feed: FeedStatus::default(),
            rng,
        }
    }

    /// Dispatch one decoded feed message
    pub fn apply_feed_message(&mut self, message: FeedMessage) {
        match message {
            FeedMessage::SensorData(reading) => self.record_reading(&reading),
            FeedMessage::RobotStatus(text) => self.status.set(text),
        }
    }

    /// New table row, one throughput sample, one more data point
    pub fn record_reading(&mut self, reading: &SensorReading) {
        self.table.push(reading);
        let sample = self.rng.gen_range(500.0..1500.0);
        self.charts.push_realtime_sample(sample);
        self.metrics.record_data_point();
    }

    pub fn select_robot(&mut self, id: &str) -> DashboardResult<Selection> {
        self.directory.select(id).cloned()
    }

    pub fn raise_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn navigate(&mut self, view: View) -> &'static str {
        self.router.navigate(view)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.charts.resize(viewport);
    }

    pub fn tick_time_axes(&mut self, label: &str) {
        self.charts.advance_time_axes(label);
    }

    pub fn refresh_metrics(&mut self) {
        self.metrics.refresh_synthetic(&mut self.rng);
    }
}

/// Shared application context
pub struct Dashboard {
    state: RwLock<DashboardState>,
    backend: Arc<dyn Backend>,
    shutdown: watch::Sender<bool>,
}

impl Dashboard {
    /// Build the dashboard with all charts initialized
    pub fn init(backend: Arc<dyn Backend>) -> Self {
        Self::with_rng(backend, StdRng::from_entropy())
    }

    /// Build with a caller-provided random source
    pub fn with_rng(backend: Arc<dyn Backend>, rng: StdRng) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            state: RwLock::new(DashboardState::new(rng)),
            backend,
            shutdown,
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, DashboardState> {
        self.state.read().await
    }

    // ---- lifecycle ----

    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// Signal every background task to stop
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
        tracing::info!("Dashboard shutdown requested");
    }

    pub fn is_shut_down(&self) -> bool {
        *self.shutdown.borrow()
    }

    // ---- feed ----

    pub async fn feed_connecting(&self, attempt: u32) {
        let mut state = self.state.write().await;
        state.feed.state = ConnectionState::Connecting;
        state.feed.reconnect_attempt = attempt;
    }

    pub async fn feed_opened(&self) {
        let mut state = self.state.write().await;
        state.feed.state = ConnectionState::Open;
        state.feed.reconnect_attempt = 0;
        state.feed.connections += 1;
        state.feed.last_error = None;
        state.status.set("Feed connected");
    }

    pub async fn feed_error(&self, error: &FeedError) {
        tracing::debug!(error = %error, "Feed error reported to status line");
        let mut state = self.state.write().await;
        state.feed.last_error = Some(error.to_string());
        state.status.set("Feed error");
    }

    pub async fn feed_closed(&self) {
        let mut state = self.state.write().await;
        state.feed.state = ConnectionState::Closed;
        state.status.set("Feed disconnected");
    }

    pub async fn feed_gave_up(&self, attempts: u32) {
        let mut state = self.state.write().await;
        state.feed.state = ConnectionState::GaveUp;
        state
            .status
            .set(format!("Feed unavailable after {} reconnect attempts", attempts));
    }

    /// Decode and apply one text frame
    pub async fn handle_frame(&self, text: &str) {
        match FeedMessage::decode(text) {
            Ok(Some(message)) => self.state.write().await.apply_feed_message(message),
            Ok(None) => tracing::debug!("Ignoring feed message of unknown type"),
            Err(e) => {
                tracing::warn!(error = %e, "Dropping undecodable feed frame");
                self.state.write().await.feed.frames_dropped += 1;
            }
        }
    }

    // ---- robot directory ----

    /// Fetch the robot list and replace the directory on success
    pub async fn load_robots(&self) -> DashboardResult<usize> {
        let response = match self.backend.list_robots().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load robots");
                return Err(e.into());
            }
        };

        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| "robot list unavailable".to_string());
            tracing::error!(message = %message, "Robot list request rejected");
            return Err(DashboardError::Rejected(message));
        }

        let count = response.data.len();
        let mut state = self.state.write().await;
        state.directory.replace(response.data);
        state.metrics.set_active_robots(count);
        tracing::info!(robots = count, "Robot directory loaded");
        Ok(count)
    }

    pub async fn select_robot(&self, id: &str) -> DashboardResult<Selection> {
        let selection = self.state.write().await.select_robot(id)?;
        tracing::info!(robot_id = %selection.id, "Robot selected");
        Ok(selection)
    }

    // ---- views & layout ----

    pub async fn navigate(&self, view: View) -> &'static str {
        self.state.write().await.navigate(view)
    }

    pub async fn resize(&self, viewport: Viewport) {
        self.state.write().await.resize(viewport);
    }

    pub async fn dismiss_alert(&self) {
        self.state.write().await.alert = None;
    }

    // ---- timers ----

    pub async fn tick_time_axes(&self) {
        let label = Local::now().format("%H:%M:%S").to_string();
        self.state.write().await.tick_time_axes(&label);
    }

    pub async fn refresh_metrics(&self) {
        self.state.write().await.refresh_metrics();
    }
}
