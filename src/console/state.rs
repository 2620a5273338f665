//! Console State
//!
//! Shared by every console handler behind an Arc.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::dashboard::Dashboard;

/// Read-only settings shown on the settings panel
#[derive(Debug, Clone)]
pub struct ConsoleSettings {
    pub api_base: String,
    pub feed_url: String,
    /// Seconds between automatic page reloads (0 disables)
    pub page_refresh_secs: u32,
}

impl ConsoleSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_base: config.backend.api_base.clone(),
            feed_url: config.backend.feed_url(),
            page_refresh_secs: config.console.page_refresh_secs,
        }
    }
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Clone)]
pub struct ConsoleState {
    pub dashboard: Arc<Dashboard>,
    pub settings: Arc<ConsoleSettings>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl ConsoleState {
    pub fn new(dashboard: Arc<Dashboard>, settings: ConsoleSettings) -> Self {
        Self {
            dashboard,
            settings: Arc::new(settings),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
