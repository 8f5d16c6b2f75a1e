//! Domain types for SmartScale.
//!
//! These types cross the HTTP boundary as JSON; field renames keep the
//! wire format stable for the dashboard consuming the API.

use serde::{Deserialize, Serialize};

/// Scale up when the weighted CPU exceeds this (strict).
pub const SCALE_UP_THRESHOLD: f64 = 80.0;

/// Scale down when the weighted CPU falls below this (strict).
pub const SCALE_DOWN_THRESHOLD: f64 = 30.0;

/// Weight given to the forecast when blending with the current reading.
/// The forecast dominates.
pub const PREDICTION_WEIGHT: f64 = 0.7;

/// Number of lag features the forecast model was trained with.
pub const LOOKBACK: usize = 5;

/// Horizon string reported alongside forecasts.
pub const PREDICTION_HORIZON: &str = "5 minutes";

// ── Metric sample ──────────────────────────────────────────────────

/// Point-in-time host metrics. Captured per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSample {
    /// RFC 3339 capture time.
    pub timestamp: String,
    /// CPU usage percentage (0–100).
    #[serde(rename = "cpu_usage")]
    pub cpu_percent: f64,
    /// Memory usage percentage (0–100).
    #[serde(rename = "memory_usage")]
    pub memory_percent: f64,
    /// Available memory in bytes.
    #[serde(rename = "memory_available")]
    pub memory_available_bytes: u64,
}

// ── Scaling decision ───────────────────────────────────────────────

/// Outcome of the decision engine. Derived per request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingDecision {
    ScaleUp,
    ScaleDown,
    NoAction,
}

impl ScalingDecision {
    /// Wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalingDecision::ScaleUp => "scale_up",
            ScalingDecision::ScaleDown => "scale_down",
            ScalingDecision::NoAction => "no_action",
        }
    }
}

impl std::fmt::Display for ScalingDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_ordered() {
        assert!(SCALE_DOWN_THRESHOLD < SCALE_UP_THRESHOLD);
        assert!((0.0..=1.0).contains(&PREDICTION_WEIGHT));
    }

    #[test]
    fn decision_serializes_snake_case() {
        let json = serde_json::to_string(&ScalingDecision::ScaleUp).unwrap();
        assert_eq!(json, "\"scale_up\"");
        assert_eq!(ScalingDecision::NoAction.to_string(), "no_action");
    }

    #[test]
    fn sample_uses_wire_field_names() {
        let sample = MetricSample {
            timestamp: "2025-01-01T00:00:00+00:00".to_string(),
            cpu_percent: 42.5,
            memory_percent: 61.0,
            memory_available_bytes: 1024,
        };
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["cpu_usage"], 42.5);
        assert_eq!(json["memory_usage"], 61.0);
        assert_eq!(json["memory_available"], 1024);
    }
}
