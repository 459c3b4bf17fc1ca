use crate::models::{V1Domain, V1RawInstance};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

/// A Lightsail instance metric collected for every instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpec {
    pub name: &'static str,
    pub unit: &'static str,
    pub period: i32,
}

pub static METRICS: [MetricSpec; 9] = [
    MetricSpec { name: "CPUUtilization", unit: "Percent", period: 300 },
    MetricSpec { name: "NetworkIn", unit: "Bytes", period: 300 },
    MetricSpec { name: "NetworkOut", unit: "Bytes", period: 300 },
    MetricSpec { name: "StatusCheckFailed", unit: "Count", period: 60 },
    MetricSpec { name: "StatusCheckFailed_Instance", unit: "Count", period: 60 },
    MetricSpec { name: "StatusCheckFailed_System", unit: "Count", period: 60 },
    MetricSpec { name: "BurstCapacityTime", unit: "Seconds", period: 300 },
    MetricSpec { name: "BurstCapacityPercentage", unit: "Percent", period: 300 },
    MetricSpec { name: "MetadataNoToken", unit: "Count", period: 300 },
];

/// Time range queried for metric datapoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MetricWindow {
    /// The window of `secs` seconds ending at `end`.
    pub fn ending_at(end: DateTime<Utc>, secs: i64) -> Self {
        Self {
            start: end - Duration::seconds(secs),
            end,
        }
    }

    pub fn last(secs: i64) -> Self {
        Self::ending_at(Utc::now(), secs)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LightsailError {
    #[error("{operation} failed: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },

    #[error("unexpected response from {operation}: {message}")]
    InvalidResponse {
        operation: &'static str,
        message: String,
    },
}

/// The subset of the Lightsail API the inventory needs.
#[async_trait]
pub trait InstanceSource: Send + Sync {
    /// All instances in the configured region, across every page.
    async fn list_instances(&self) -> Result<Vec<V1RawInstance>, LightsailError>;

    /// All DNS zones with their entries, across every page.
    async fn list_domains(&self) -> Result<Vec<V1Domain>, LightsailError>;

    /// Average of `metric` over `window`, or `None` when no datapoints exist.
    async fn metric_average(
        &self,
        instance_name: &str,
        metric: &MetricSpec,
        window: &MetricWindow,
    ) -> Result<Option<f64>, LightsailError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_metric_window() {
        let end = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let window = MetricWindow::ending_at(end, 300);
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 5, 1, 11, 55, 0).unwrap());
        assert_eq!(window.end, end);
    }

    #[test]
    fn test_metric_catalog() {
        let names: Vec<&str> = METRICS.iter().map(|m| m.name).collect();
        assert!(names.contains(&"CPUUtilization"));
        assert!(names.contains(&"MetadataNoToken"));

        let status_checks: Vec<&MetricSpec> = METRICS
            .iter()
            .filter(|m| m.name.starts_with("StatusCheckFailed"))
            .collect();
        assert_eq!(status_checks.len(), 3);
        assert!(status_checks.iter().all(|m| m.period == 60 && m.unit == "Count"));
    }
}
