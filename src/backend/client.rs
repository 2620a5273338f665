//! Backend REST API Client

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::dto::{CommandRequest, CommandResponse, RobotListResponse};
use super::{Backend, BackendError};
use crate::config::BackendConfig;

/// reqwest-backed implementation of [`Backend`]
pub struct HttpBackend {
    client: Client,
    api_base: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    fn command_url(&self, robot_id: &str) -> String {
        self.url(&format!(
            "robot/control/{}/command",
            urlencoding::encode(robot_id)
        ))
    }

    /// Decode the body whatever the status; the envelope carries the outcome
    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        let text = response.text().await.map_err(BackendError::from_reqwest)?;

        match serde_json::from_str::<T>(&text) {
            Ok(body) => Ok(body),
            Err(_) if !status.is_success() => Err(BackendError::ApiError {
                status: status.as_u16(),
                message: text,
            }),
            Err(e) => Err(BackendError::Decode(e.to_string())),
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_robots(&self) -> Result<RobotListResponse, BackendError> {
        let url = self.url("robot/list");
        tracing::debug!(url = %url, "Fetching robot list");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(BackendError::from_reqwest)?;

        Self::read_envelope(response).await
    }

    async fn send_command(
        &self,
        robot_id: &str,
        command: &str,
    ) -> Result<CommandResponse, BackendError> {
        let url = self.command_url(robot_id);
        tracing::debug!(url = %url, command = %command, "Posting robot command");

        let response = self
            .client
            .post(&url)
            .json(&CommandRequest {
                command: command.to_string(),
            })
            .send()
            .await
            .map_err(BackendError::from_reqwest)?;

        Self::read_envelope(response).await
    }
}
