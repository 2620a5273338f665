//! Domain Types
//!
//! Entities shared between the backend client, the live feed and the
//! dashboard state.

use serde::{Deserialize, Serialize};

/// A single sensor reading pushed over the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    /// Timestamp in milliseconds since epoch
    pub timestamp: i64,
    /// Robot that produced the reading
    pub robot_id: String,
    /// Sensor kind (e.g. "temp")
    pub sensor_type: String,
    /// Measured value
    pub value: f64,
    /// Unit label
    #[serde(default)]
    pub unit: String,
}

impl SensorReading {
    pub fn new(
        timestamp: i64,
        robot_id: impl Into<String>,
        sensor_type: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            robot_id: robot_id.into(),
            sensor_type: sensor_type.into(),
            value,
            unit: unit.into(),
        }
    }
}

/// A robot entry from the directory endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub online: bool,
}

impl Robot {
    pub fn new(id: impl Into<String>, name: impl Into<String>, online: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            online,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_reading_camel_case() {
        let json = r#"{"timestamp":1700000000000,"robotId":"r1","sensorType":"temp","value":23.456,"unit":"C"}"#;
        let reading: SensorReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.robot_id, "r1");
        assert_eq!(reading.sensor_type, "temp");
        assert_eq!(reading.unit, "C");
    }

    #[test]
    fn test_robot_online_defaults_false() {
        let robot: Robot = serde_json::from_str(r#"{"id":"r2","name":"Atlas"}"#).unwrap();
        assert!(!robot.online);
    }
}
