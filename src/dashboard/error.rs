//! Dashboard error types

use thiserror::Error;

use crate::backend::BackendError;

/// Errors surfaced by dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A command was issued before any robot was selected
    #[error("No robot selected")]
    NoRobotSelected,

    /// The command text is blank
    #[error("Command must not be empty")]
    EmptyCommand,

    /// The requested robot is not in the current directory snapshot
    #[error("Unknown robot: {0}")]
    UnknownRobot(String),

    /// The backend answered with `success: false`
    #[error("Backend rejected request: {0}")]
    Rejected(String),

    /// Transport or decode failure talking to the backend
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
