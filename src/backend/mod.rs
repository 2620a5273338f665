//! Telemetry Backend
//!
//! REST endpoints the console consumes:
//! - `GET /robot/list` - Robot directory snapshot
//! - `POST /robot/control/{id}/command` - Operator command for one robot
//!
//! Paths are relative to `backend.api_base`.

mod client;
pub mod dto;
mod error;

pub use client::HttpBackend;
pub use dto::{CommandRequest, CommandResponse, RobotListResponse};
pub use error::BackendError;

use async_trait::async_trait;

/// Operations the dashboard needs from the backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the full robot list
    async fn list_robots(&self) -> Result<RobotListResponse, BackendError>;

    /// Post one command for `robot_id`
    async fn send_command(
        &self,
        robot_id: &str,
        command: &str,
    ) -> Result<CommandResponse, BackendError>;
}
