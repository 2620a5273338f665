//! Reconnect Policy
//!
//! Exponential backoff with an optional attempt cap. `multiplier = 1.0` and
//! no cap gives a fixed delay repeated forever.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReconnectPolicy {
    /// Delay before the first reconnect attempt
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,

    /// Growth factor applied per consecutive failed attempt
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Upper bound on any single delay
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    /// Consecutive attempts before giving up (`None` or 0 = never)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}

fn default_initial_delay() -> u64 {
    5000
}

fn default_multiplier() -> f64 {
    2.0
}

fn default_max_delay() -> u64 {
    60_000
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay(),
            multiplier: default_multiplier(),
            max_delay_ms: default_max_delay(),
            max_attempts: None,
        }
    }
}

impl ReconnectPolicy {
    /// Same delay every time, no attempt cap
    pub fn fixed(delay: Duration) -> Self {
        let ms = delay.as_millis() as u64;
        Self {
            initial_delay_ms: ms,
            multiplier: 1.0,
            max_delay_ms: ms,
            max_attempts: None,
        }
    }

    /// Delay before the 1-based `attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(63) as i32;
        let factor = self.multiplier.max(1.0).powi(exponent);
        let ms = (self.initial_delay_ms as f64 * factor).min(self.max_delay_ms as f64);
        Duration::from_millis(ms as u64)
    }

    /// Whether the 1-based `attempt` may still be made
    pub fn allows(&self, attempt: u32) -> bool {
        match self.max_attempts {
            Some(max) if max > 0 => attempt <= max,
            _ => true,
        }
    }
}
