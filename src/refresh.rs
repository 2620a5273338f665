//! Periodic Refresh Loop
//!
//! Two independent timers:
//! - axis tick (default 1s): slide the realtime and resource time axes
//! - metrics tick (default 5s): regenerate the synthetic metric displays
//!
//! Both stop when the dashboard shuts down.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::config::RefreshConfig;
use crate::dashboard::Dashboard;

/// Handles for the two refresh tasks
pub struct RefreshHandles {
    pub axis: JoinHandle<()>,
    pub metrics: JoinHandle<()>,
}

impl RefreshHandles {
    /// Wait for both tasks to exit
    pub async fn join(self) {
        let (axis, metrics) = tokio::join!(self.axis, self.metrics);
        for (timer, result) in [("axis", axis), ("metrics", metrics)] {
            if let Err(e) = result {
                tracing::warn!(timer, error = %e, "Refresh timer ended abnormally");
            }
        }
    }
}

/// Start both timers
pub fn spawn(dashboard: Arc<Dashboard>, config: &RefreshConfig) -> RefreshHandles {
    let axis = {
        let dashboard = Arc::clone(&dashboard);
        tokio::spawn(ticker(
            "axis",
            config.axis_interval(),
            Arc::clone(&dashboard),
            move || {
                let dashboard = Arc::clone(&dashboard);
                async move { dashboard.tick_time_axes().await }
            },
        ))
    };

    let metrics = {
        let dashboard = Arc::clone(&dashboard);
        tokio::spawn(ticker(
            "metrics",
            config.metrics_interval(),
            Arc::clone(&dashboard),
            move || {
                let dashboard = Arc::clone(&dashboard);
                async move { dashboard.refresh_metrics().await }
            },
        ))
    };

    tracing::info!(
        axis_ms = config.axis_interval_ms,
        metrics_ms = config.metrics_interval_ms,
        "Refresh timers started"
    );

    RefreshHandles { axis, metrics }
}

/// Run `tick` every `period`, first firing one period after start
async fn ticker<F, Fut>(name: &'static str, period: Duration, dashboard: Arc<Dashboard>, mut tick: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let period = period.max(Duration::from_millis(1));
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut shutdown = dashboard.shutdown_receiver();

    loop {
        if *shutdown.borrow() {
            break;
        }
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = interval.tick() => tick().await,
        }
    }

    tracing::debug!(timer = name, "Refresh timer stopped");
}
