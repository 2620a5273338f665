//! Command Dispatcher
//!
//! Posts operator commands for the selected robot. No retry and no
//! deduplication: two calls send two commands.

use serde::Serialize;

use super::{Dashboard, DashboardError, DashboardResult};

/// Alert raised when a command is issued with nothing selected
pub const NO_ROBOT_SELECTED_ALERT: &str = "Please select a robot first";

/// Result of a dispatched command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// Backend accepted the command
    Sent { robot_id: String, command: String },
    /// Backend answered `success: false`
    Rejected { robot_id: String, message: String },
}

impl Dashboard {
    /// Send `command` to the selected robot
    pub async fn send_command(&self, command: &str) -> DashboardResult<CommandOutcome> {
        let robot_id = {
            let mut state = self.state.write().await;
            match state.directory.selected_id() {
                Some(id) => id.to_string(),
                None => {
                    state.raise_alert(NO_ROBOT_SELECTED_ALERT);
                    tracing::warn!(command = %command, "Command issued with no robot selected");
                    return Err(DashboardError::NoRobotSelected);
                }
            }
        };

        if command.trim().is_empty() {
            tracing::warn!(robot_id = %robot_id, "Blank command ignored");
            return Err(DashboardError::EmptyCommand);
        }

        tracing::info!(robot_id = %robot_id, command = %command, "Sending command");

        let result = self.backend.send_command(&robot_id, command).await;
        let mut state = self.state.write().await;

        match result {
            Ok(response) if response.success => {
                state.status.set(format!("Command sent: {}", command));
                Ok(CommandOutcome::Sent {
                    robot_id,
                    command: command.to_string(),
                })
            }
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| "unknown error".to_string());
                tracing::warn!(robot_id = %robot_id, message = %message, "Command rejected");
                state.status.set(format!("Command failed: {}", message));
                Ok(CommandOutcome::Rejected { robot_id, message })
            }
            Err(e) => {
                tracing::error!(robot_id = %robot_id, error = %e, "Failed to send command");
                state.status.set("Command failed");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, CommandResponse};
    use crate::dashboard::tests::{dashboard_with, fleet, MockBackend};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_no_selection_alerts_without_request() {
        let backend = Arc::new(MockBackend::with_robots(fleet()));
        let dashboard = dashboard_with(Arc::clone(&backend));

        let err = dashboard.send_command("stop").await.unwrap_err();
        assert!(matches!(err, DashboardError::NoRobotSelected));
        assert_eq!(backend.command_count(), 0);
        assert_eq!(
            dashboard.read().await.alert.as_deref(),
            Some(NO_ROBOT_SELECTED_ALERT)
        );
    }

    #[tokio::test]
    async fn test_blank_command_checked_after_selection() {
        let backend = Arc::new(MockBackend::with_robots(fleet()));
        let dashboard = dashboard_with(Arc::clone(&backend));

        let err = dashboard.send_command("  ").await.unwrap_err();
        assert!(matches!(err, DashboardError::NoRobotSelected));
        assert!(dashboard.read().await.alert.is_some());

        dashboard.load_robots().await.unwrap();
        dashboard.select_robot("r1").await.unwrap();
        let err = dashboard.send_command("").await.unwrap_err();
        assert!(matches!(err, DashboardError::EmptyCommand));
        assert_eq!(backend.command_count(), 0);
    }

    #[tokio::test]
    async fn test_command_text_forwarded_verbatim() {
        let backend = Arc::new(MockBackend::with_robots(fleet()));
        let dashboard = dashboard_with(Arc::clone(&backend));
        dashboard.load_robots().await.unwrap();
        dashboard.select_robot("r1").await.unwrap();

        dashboard.send_command(" speed 0.5 ").await.unwrap();
        assert_eq!(backend.command_calls.lock().unwrap()[0].1, " speed 0.5 ");
    }

    #[tokio::test]
    async fn test_successful_command_echoes() {
        let backend = Arc::new(MockBackend::with_robots(fleet()));
        let dashboard = dashboard_with(Arc::clone(&backend));
        dashboard.load_robots().await.unwrap();
        dashboard.select_robot("r2").await.unwrap();

        let outcome = dashboard.send_command("forward").await.unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::Sent {
                robot_id: "r2".to_string(),
                command: "forward".to_string()
            }
        );
        assert_eq!(dashboard.read().await.status.text, "Command sent: forward");
        assert_eq!(
            backend.command_calls.lock().unwrap()[0],
            ("r2".to_string(), "forward".to_string())
        );
    }

    #[tokio::test]
    async fn test_rejected_command_shows_server_message() {
        let backend = Arc::new(MockBackend::with_robots(fleet()));
        let dashboard = dashboard_with(Arc::clone(&backend));
        dashboard.load_robots().await.unwrap();
        dashboard.select_robot("r1").await.unwrap();
        backend.answer_commands(Ok(CommandResponse {
            success: false,
            message: Some("busy".to_string()),
        }));

        let outcome = dashboard.send_command("stop").await.unwrap();
        assert!(matches!(outcome, CommandOutcome::Rejected { ref message, .. } if message == "busy"));
        let status = dashboard.read().await.status.text.clone();
        assert!(status.starts_with("Command failed"));
        assert!(status.contains("busy"));
    }

    #[tokio::test]
    async fn test_transport_failure_generic_message() {
        let backend = Arc::new(MockBackend::with_robots(fleet()));
        let dashboard = dashboard_with(Arc::clone(&backend));
        dashboard.load_robots().await.unwrap();
        dashboard.select_robot("r3").await.unwrap();
        backend.answer_commands(Err(BackendError::Timeout));

        let err = dashboard.send_command("stop").await.unwrap_err();
        assert!(matches!(err, DashboardError::Backend(BackendError::Timeout)));
        assert_eq!(dashboard.read().await.status.text, "Command failed");
    }

    #[tokio::test]
    async fn test_duplicate_sends_are_not_deduplicated() {
        let backend = Arc::new(MockBackend::with_robots(fleet()));
        let dashboard = dashboard_with(Arc::clone(&backend));
        dashboard.load_robots().await.unwrap();
        dashboard.select_robot("r1").await.unwrap();

        dashboard.send_command("stop").await.unwrap();
        dashboard.send_command("stop").await.unwrap();
        assert_eq!(backend.command_count(), 2);
    }
}
