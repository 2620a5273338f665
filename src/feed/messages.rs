//! Feed Message Types
//!
//! Inbound frames are JSON objects `{ "type": ..., "payload": ... }`.
//! Only `sensorData` and `robotStatus` are understood; any other type
//! decodes to `None` and is dropped by the caller.

use serde::Deserialize;
use serde_json::Value;

use super::FeedError;
use crate::types::SensorReading;

/// Raw envelope before dispatch on `type`
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

/// A decoded feed message
#[derive(Debug, Clone, PartialEq)]
pub enum FeedMessage {
    /// A new sensor reading
    SensorData(SensorReading),
    /// Free-form status text for the status line
    RobotStatus(String),
}

impl FeedMessage {
    /// Decode one text frame. `Ok(None)` means an unknown `type`.
    pub fn decode(text: &str) -> Result<Option<Self>, FeedError> {
        let envelope: Envelope =
            serde_json::from_str(text).map_err(|e| FeedError::Decode(e.to_string()))?;

        match envelope.kind.as_str() {
            "sensorData" => {
                let reading: SensorReading = serde_json::from_value(envelope.payload)
                    .map_err(|e| FeedError::Decode(format!("sensorData payload: {}", e)))?;
                Ok(Some(FeedMessage::SensorData(reading)))
            }
            "robotStatus" => {
                let text = match envelope.payload {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Ok(Some(FeedMessage::RobotStatus(text)))
            }
            _ => Ok(None),
        }
    }
}
