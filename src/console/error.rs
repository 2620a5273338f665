//! Console Error Types
//!
//! Maps dashboard and handler failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::backend::BackendError;
use crate::dashboard::DashboardError;

#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Request body or parameter failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown view or resource
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    /// State snapshot could not be encoded
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ConsoleError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ConsoleError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ConsoleError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ConsoleError::Dashboard(e) => match e {
                DashboardError::NoRobotSelected => (StatusCode::CONFLICT, "NO_ROBOT_SELECTED"),
                DashboardError::EmptyCommand => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                DashboardError::UnknownRobot(_) => (StatusCode::NOT_FOUND, "ROBOT_NOT_FOUND"),
                DashboardError::Rejected(_) => (StatusCode::BAD_GATEWAY, "BACKEND_REJECTED"),
                DashboardError::Backend(BackendError::Timeout)
                | DashboardError::Backend(BackendError::Unavailable) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "BACKEND_UNAVAILABLE")
                }
                DashboardError::Backend(_) => (StatusCode::BAD_GATEWAY, "BACKEND_ERROR"),
            },
            ConsoleError::Encode(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ENCODE_ERROR"),
            ConsoleError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            ConsoleError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Console request failed"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Console request refused"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ConsoleError::from(DashboardError::NoRobotSelected),
                StatusCode::CONFLICT,
            ),
            (
                ConsoleError::from(DashboardError::UnknownRobot("r9".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ConsoleError::from(DashboardError::Backend(BackendError::Timeout)),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ConsoleError::from(DashboardError::Rejected("busy".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ConsoleError::Validation("empty".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
