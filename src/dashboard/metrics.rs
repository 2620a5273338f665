//! Metric Displays
//!
//! The four headline numbers. The data point counter and the active robot
//! count follow real events; response time and health are synthetic.

use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricDisplays {
    pub total_data_points: u64,
    pub active_robots: usize,
    pub avg_response_ms: Option<u32>,
    pub system_health: Option<f64>,
}

impl MetricDisplays {
    pub fn record_data_point(&mut self) {
        self.total_data_points += 1;
    }

    pub fn set_active_robots(&mut self, count: usize) {
        self.active_robots = count;
    }

    /// Overwrite the synthetic displays with fresh random values
    pub fn refresh_synthetic<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.avg_response_ms = Some(rng.gen_range(30..80));
        let health: f64 = 95.0 + rng.gen::<f64>() * 5.0;
        self.system_health = Some((health * 10.0).round() / 10.0);
    }

    pub fn total_data_points_text(&self) -> String {
        group_thousands(self.total_data_points)
    }

    pub fn active_robots_text(&self) -> String {
        self.active_robots.to_string()
    }

    pub fn avg_response_text(&self) -> String {
        self.avg_response_ms
            .map(|ms| format!("{}ms", ms))
            .unwrap_or_else(|| "--".to_string())
    }

    pub fn system_health_text(&self) -> String {
        self.system_health
            .map(|h| format!("{:.1}%", h))
            .unwrap_or_else(|| "--".to_string())
    }
}

/// `1234567` -> `1,234,567`
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_synthetic_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut metrics = MetricDisplays::default();
        assert_eq!(metrics.avg_response_text(), "--");
        for _ in 0..200 {
            metrics.refresh_synthetic(&mut rng);
            let ms = metrics.avg_response_ms.unwrap();
            assert!((30..80).contains(&ms));
            let health = metrics.system_health.unwrap();
            assert!((95.0..=100.0).contains(&health));
        }
        assert!(metrics.avg_response_text().ends_with("ms"));
        assert!(metrics.system_health_text().ends_with('%'));
    }

    #[test]
    fn test_counters() {
        let mut metrics = MetricDisplays::default();
        for _ in 0..1500 {
            metrics.record_data_point();
        }
        metrics.set_active_robots(4);
        assert_eq!(metrics.total_data_points_text(), "1,500");
        assert_eq!(metrics.active_robots_text(), "4");
    }
}
