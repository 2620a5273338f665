//! Recent Readings Table

use chrono::{DateTime, Local};
use serde::Serialize;

use super::window::SlidingWindow;
use crate::types::SensorReading;

/// Rows kept in the readings table
pub const TABLE_CAPACITY: usize = 10;

/// Status badge shown in the last column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub class: &'static str,
}

impl Badge {
    pub const NORMAL: Badge = Badge {
        label: "Normal",
        class: "badge bg-success",
    };
}

/// A rendered table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub time: String,
    pub robot_id: String,
    pub sensor_type: String,
    pub reading: String,
    pub badge: Badge,
}

impl TableRow {
    pub fn from_reading(reading: &SensorReading) -> Self {
        Self {
            time: format_timestamp(reading.timestamp),
            robot_id: reading.robot_id.clone(),
            sensor_type: reading.sensor_type.clone(),
            reading: format!("{:.2} {}", reading.value, reading.unit),
            badge: Badge::NORMAL,
        }
    }
}

/// Local wall-clock time of a millisecond timestamp
pub fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "Invalid time".to_string())
}

/// Sliding table of the most recent readings, oldest row first
#[derive(Debug, Clone, Serialize)]
pub struct SensorTable {
    rows: SlidingWindow<TableRow>,
}

impl Default for SensorTable {
    fn default() -> Self {
        Self {
            rows: SlidingWindow::new(TABLE_CAPACITY),
        }
    }
}

impl SensorTable {
    pub fn push(&mut self, reading: &SensorReading) {
        self.rows.push(TableRow::from_reading(reading));
    }

    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &TableRow> + ExactSizeIterator {
        self.rows.iter()
    }

    pub fn newest(&self) -> Option<&TableRow> {
        self.rows.newest()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
