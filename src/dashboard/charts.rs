//! Chart Registry
//!
//! Holds the five dashboard charts. Every chart is built once by
//! [`ChartRegistry::init`] with placeholder data and then mutated in place.
//! Apart from the realtime axis, nothing here reflects real measurements.

use chrono::{DateTime, Duration, Local, Timelike};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::window::SlidingWindow;

/// Number of points kept on the realtime throughput chart
pub const REALTIME_POINTS: usize = 20;

/// Number of points kept on the resource usage chart
pub const RESOURCE_POINTS: usize = 10;

/// Hours shown on the history and anomaly charts
pub const HISTORY_HOURS: usize = 24;

/// Anomaly bars above this count are drawn in the alert colour
pub const ANOMALY_ALERT_THRESHOLD: f64 = 3.0;

/// Label format used on second-resolution time axes
pub const TIME_LABEL_FORMAT: &str = "%H:%M:%S";

const SIDEBAR_WIDTH: u32 = 240;
const GUTTER: u32 = 24;
const MIN_CHART_WIDTH: u32 = 240;

/// Chart identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Realtime,
    SensorType,
    History,
    Anomaly,
    Resource,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Realtime,
        ChartKind::SensorType,
        ChartKind::History,
        ChartKind::Anomaly,
        ChartKind::Resource,
    ];

    /// Registry key
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Realtime => "realtime",
            ChartKind::SensorType => "sensorType",
            ChartKind::History => "history",
            ChartKind::Anomaly => "anomaly",
            ChartKind::Resource => "resource",
        }
    }

    /// Element id of the mount target in the rendered page
    pub fn element_id(&self) -> &'static str {
        match self {
            ChartKind::Realtime => "realtimeChart",
            ChartKind::SensorType => "sensorTypeChart",
            ChartKind::History => "historyChart",
            ChartKind::Anomaly => "anomalyChart",
            ChartKind::Resource => "resourceChart",
        }
    }

    /// Wide charts span the full content column
    fn is_wide(&self) -> bool {
        matches!(self, ChartKind::Realtime | ChartKind::History)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown chart: {}", s))
    }
}

/// Rendering style of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Line,
    Pie,
    Bar,
}

/// Named value series
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    pub data: SlidingWindow<f64>,
}

impl Series {
    fn new(name: &str, capacity: usize, data: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            data: SlidingWindow::from_items(capacity, data),
        }
    }
}

/// Slice of a pie chart
#[derive(Debug, Clone, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
}

/// Browser viewport reported by the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

/// Size a chart is drawn at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
}

impl Layout {
    pub fn for_viewport(kind: ChartKind, viewport: Viewport) -> Self {
        let content = viewport.width.saturating_sub(SIDEBAR_WIDTH + 2 * GUTTER);
        let width = if kind.is_wide() {
            content
        } else {
            content.saturating_sub(GUTTER) / 2
        };
        let height = if kind.is_wide() { 300 } else { 250 };
        Self {
            width: width.max(MIN_CHART_WIDTH),
            height,
        }
    }
}

/// A single chart instance
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub chart_type: ChartType,
    pub x_axis: SlidingWindow<String>,
    pub series: Vec<Series>,
    pub slices: Vec<PieSlice>,
    /// Fixed upper bound of the value axis, if any
    pub y_max: Option<f64>,
    /// Suffix appended to value axis labels
    pub y_unit: &'static str,
    pub layout: Layout,
}

impl Chart {
    fn new(kind: ChartKind, title: &str, chart_type: ChartType, viewport: Viewport) -> Self {
        Self {
            kind,
            title: title.to_string(),
            chart_type,
            x_axis: SlidingWindow::new(0),
            series: Vec::new(),
            slices: Vec::new(),
            y_max: None,
            y_unit: "",
            layout: Layout::for_viewport(kind, viewport),
        }
    }

    fn with_axis(mut self, labels: Vec<String>) -> Self {
        self.x_axis = SlidingWindow::from_items(labels.len(), labels);
        self
    }

    fn with_series(mut self, name: &str, data: Vec<f64>) -> Self {
        let capacity = data.len();
        self.series.push(Series::new(name, capacity, data));
        self
    }

    /// Shift the oldest label off the axis and push a new one
    pub fn advance_axis(&mut self, label: String) {
        self.x_axis.push(label);
    }

    fn relayout(&mut self, viewport: Viewport) {
        self.layout = Layout::for_viewport(self.kind, viewport);
    }
}

/// The five dashboard charts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRegistry {
    realtime: Chart,
    sensor_type: Chart,
    history: Chart,
    anomaly: Chart,
    resource: Chart,
}

impl ChartRegistry {
    /// Build all charts with placeholder series
    pub fn init<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Local>, viewport: Viewport) -> Self {
        let realtime = Chart::new(
            ChartKind::Realtime,
            "Data throughput (records/s)",
            ChartType::Line,
            viewport,
        )
        .with_axis(time_labels(REALTIME_POINTS, now))
        .with_series("Throughput", vec![0.0; REALTIME_POINTS]);

        let mut sensor_type = Chart::new(
            ChartKind::SensorType,
            "Sensor type distribution",
            ChartType::Pie,
            viewport,
        );
        sensor_type.slices = [
            ("Temperature", 335.0),
            ("Humidity", 310.0),
            ("Pressure", 234.0),
            ("Position", 135.0),
            ("Vision", 148.0),
        ]
        .into_iter()
        .map(|(name, value)| PieSlice {
            name: name.to_string(),
            value,
        })
        .collect();

        let history = Chart::new(ChartKind::History, "24h data trend", ChartType::Line, viewport)
            .with_axis(hour_labels(HISTORY_HOURS, now))
            .with_series("Temperature", random_series(rng, HISTORY_HOURS, 20, 30))
            .with_series("Humidity", random_series(rng, HISTORY_HOURS, 40, 60))
            .with_series("Pressure", random_series(rng, HISTORY_HOURS, 1000, 1015));

        let anomaly = Chart::new(ChartKind::Anomaly, "Anomaly detection", ChartType::Bar, viewport)
            .with_axis(hour_labels(HISTORY_HOURS, now))
            .with_series("Anomalies", random_series(rng, HISTORY_HOURS, 0, 5));

        let mut resource = Chart::new(
            ChartKind::Resource,
            "System resource usage",
            ChartType::Line,
            viewport,
        )
        .with_axis(time_labels(RESOURCE_POINTS, now))
        .with_series("CPU", random_series(rng, RESOURCE_POINTS, 30, 70))
        .with_series("Memory", random_series(rng, RESOURCE_POINTS, 40, 80))
        .with_series("Disk", random_series(rng, RESOURCE_POINTS, 50, 90));
        resource.y_max = Some(100.0);
        resource.y_unit = "%";

        tracing::debug!(charts = ChartKind::ALL.len(), "Chart registry initialized");

        Self {
            realtime,
            sensor_type,
            history,
            anomaly,
            resource,
        }
    }

    pub fn get(&self, kind: ChartKind) -> &Chart {
        match kind {
            ChartKind::Realtime => &self.realtime,
            ChartKind::SensorType => &self.sensor_type,
            ChartKind::History => &self.history,
            ChartKind::Anomaly => &self.anomaly,
            ChartKind::Resource => &self.resource,
        }
    }

    pub fn get_mut(&mut self, kind: ChartKind) -> &mut Chart {
        match kind {
            ChartKind::Realtime => &mut self.realtime,
            ChartKind::SensorType => &mut self.sensor_type,
            ChartKind::History => &mut self.history,
            ChartKind::Anomaly => &mut self.anomaly,
            ChartKind::Resource => &mut self.resource,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chart> {
        ChartKind::ALL.into_iter().map(move |kind| self.get(kind))
    }

    /// Append one sample to the realtime series
    pub fn push_realtime_sample(&mut self, value: f64) {
        if let Some(series) = self.realtime.series.first_mut() {
            series.data.push(value);
        }
    }

    /// Slide the realtime and resource time axes forward by one label
    pub fn advance_time_axes(&mut self, label: &str) {
        self.realtime.advance_axis(label.to_string());
        self.resource.advance_axis(label.to_string());
    }

    /// Re-layout every chart for a new viewport
    pub fn resize(&mut self, viewport: Viewport) {
        for kind in ChartKind::ALL {
            self.get_mut(kind).relayout(viewport);
        }
    }
}

/// `count` second-spaced labels ending at `now`
pub fn time_labels(count: usize, now: DateTime<Local>) -> Vec<String> {
    (0..count)
        .rev()
        .map(|i| {
            (now - Duration::seconds(i as i64))
                .format(TIME_LABEL_FORMAT)
                .to_string()
        })
        .collect()
}

/// `count` hour labels (`H:00`) ending at the current hour
pub fn hour_labels(count: usize, now: DateTime<Local>) -> Vec<String> {
    (0..count)
        .rev()
        .map(|i| format!("{}:00", (now - Duration::hours(i as i64)).hour()))
        .collect()
}

/// Integers drawn uniformly from `min..=max`
pub fn random_series<R: Rng + ?Sized>(rng: &mut R, count: usize, min: i64, max: i64) -> Vec<f64> {
    (0..count).map(|_| rng.gen_range(min..=max) as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn registry() -> ChartRegistry {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        ChartRegistry::init(&mut rng, now, Viewport::default())
    }

    #[test]
    fn test_init_builds_all_five() {
        let charts = registry();
        let kinds: Vec<_> = charts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, ChartKind::ALL.to_vec());

        let realtime = charts.get(ChartKind::Realtime);
        assert_eq!(realtime.x_axis.len(), REALTIME_POINTS);
        assert!(realtime.series[0].data.iter().all(|v| *v == 0.0));
        assert_eq!(charts.get(ChartKind::SensorType).slices.len(), 5);
        assert_eq!(charts.get(ChartKind::History).series.len(), 3);
        assert_eq!(charts.get(ChartKind::Resource).y_max, Some(100.0));
    }

    #[test]
    fn test_seed_data_within_bounds() {
        let charts = registry();
        let history = charts.get(ChartKind::History);
        assert!(history.series[2].data.iter().all(|v| (1000.0..=1015.0).contains(v)));
        let anomaly = charts.get(ChartKind::Anomaly);
        assert!(anomaly.series[0].data.iter().all(|v| (0.0..=5.0).contains(v)));
    }

    #[test]
    fn test_realtime_series_capped() {
        let mut charts = registry();
        for i in 0..100 {
            charts.push_realtime_sample(i as f64);
        }
        let data = &charts.get(ChartKind::Realtime).series[0].data;
        assert_eq!(data.len(), REALTIME_POINTS);
        assert_eq!(data.newest(), Some(&99.0));
        assert_eq!(data.oldest(), Some(&80.0));
    }

    #[test]
    fn test_advance_time_axes_slides_both() {
        let mut charts = registry();
        charts.advance_time_axes("12:00:01");
        let realtime = charts.get(ChartKind::Realtime);
        let resource = charts.get(ChartKind::Resource);
        assert_eq!(realtime.x_axis.len(), REALTIME_POINTS);
        assert_eq!(resource.x_axis.len(), RESOURCE_POINTS);
        assert_eq!(realtime.x_axis.newest().map(String::as_str), Some("12:00:01"));
        assert_eq!(resource.x_axis.newest().map(String::as_str), Some("12:00:01"));
        assert_eq!(realtime.x_axis.oldest().map(String::as_str), Some("11:59:42"));
    }

    #[test]
    fn test_labels() {
        let now = Local.with_ymd_and_hms(2024, 3, 1, 2, 30, 5).unwrap();
        assert_eq!(time_labels(3, now), vec!["02:30:03", "02:30:04", "02:30:05"]);
        let hours = hour_labels(4, now);
        assert_eq!(hours, vec!["23:00", "0:00", "1:00", "2:00"]);
    }

    #[test]
    fn test_resize_relayouts_every_chart() {
        let mut charts = registry();
        charts.resize(Viewport {
            width: 1920,
            height: 1080,
        });
        let wide = charts.get(ChartKind::Realtime).layout;
        let narrow = charts.get(ChartKind::Anomaly).layout;
        assert_eq!(wide.width, 1920 - 240 - 48);
        assert_eq!(narrow.width, (1920 - 240 - 48 - 24) / 2);

        charts.resize(Viewport {
            width: 320,
            height: 640,
        });
        assert!(charts.iter().all(|c| c.layout.width == MIN_CHART_WIDTH));
    }

    #[test]
    fn test_chart_kind_from_str() {
        assert_eq!("sensorType".parse::<ChartKind>().unwrap(), ChartKind::SensorType);
        assert!("pie".parse::<ChartKind>().is_err());
    }
}
