//! Backend wire types

use serde::{Deserialize, Serialize};

use crate::types::Robot;

/// `GET /robot/list` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RobotListResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Robot>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /robot/control/{id}/command` request body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandRequest {
    pub command: String,
}

/// `POST /robot/control/{id}/command` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robot_list_parse() {
        let json = r#"{"success":true,"data":[{"id":"r1","name":"Atlas","online":true}]}"#;
        let resp: RobotListResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.len(), 1);
        assert!(resp.data[0].online);
    }

    #[test]
    fn test_failed_list_without_data() {
        let resp: RobotListResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.data.is_empty());
    }

    #[test]
    fn test_command_response_message_optional() {
        let ok: CommandResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(ok.message.is_none());
        let busy: CommandResponse =
            serde_json::from_str(r#"{"success":false,"message":"busy"}"#).unwrap();
        assert_eq!(busy.message.as_deref(), Some("busy"));
    }
}
