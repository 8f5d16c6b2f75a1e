//! Exported gauges and counters, rendered in Prometheus text format.
//!
//! Lock-free: gauges store f64 bits in atomics, counters are plain
//! atomic increments. All scaling-action series are pre-registered so
//! scrapes see them at zero before any action happens.

use std::sync::atomic::{AtomicU64, Ordering};

use smartscale_core::ScalingDecision;

/// Instance label applied to every exported series.
const INSTANCE: &str = "smartscale";

/// An f64 gauge backed by an atomic bit pattern.
#[derive(Debug)]
struct Gauge(AtomicU64);

impl Gauge {
    fn new() -> Self {
        Self(AtomicU64::new(0f64.to_bits()))
    }

    fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }
}

/// Process-wide metric registry.
#[derive(Debug)]
pub struct MetricsRegistry {
    cpu_usage: Gauge,
    memory_usage: Gauge,
    predicted_cpu: Gauge,
    scale_up_total: AtomicU64,
    scale_down_total: AtomicU64,
    no_action_total: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            cpu_usage: Gauge::new(),
            memory_usage: Gauge::new(),
            predicted_cpu: Gauge::new(),
            scale_up_total: AtomicU64::new(0),
            scale_down_total: AtomicU64::new(0),
            no_action_total: AtomicU64::new(0),
        }
    }

    pub fn set_cpu_usage(&self, percent: f64) {
        self.cpu_usage.set(percent);
    }

    pub fn set_memory_usage(&self, percent: f64) {
        self.memory_usage.set(percent);
    }

    pub fn set_predicted_cpu(&self, percent: f64) {
        self.predicted_cpu.set(percent);
    }

    /// Count a scaling decision against its action series.
    pub fn record_action(&self, decision: ScalingDecision) {
        let counter = match decision {
            ScalingDecision::ScaleUp => &self.scale_up_total,
            ScalingDecision::ScaleDown => &self.scale_down_total,
            ScalingDecision::NoAction => &self.no_action_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Render the Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("# HELP cpu_usage_percent Current CPU usage percentage.\n");
        out.push_str("# TYPE cpu_usage_percent gauge\n");
        out.push_str(&format!(
            "cpu_usage_percent{{instance=\"{INSTANCE}\"}} {:.2}\n",
            self.cpu_usage.get()
        ));

        out.push_str("# HELP memory_usage_percent Current memory usage percentage.\n");
        out.push_str("# TYPE memory_usage_percent gauge\n");
        out.push_str(&format!(
            "memory_usage_percent{{instance=\"{INSTANCE}\"}} {:.2}\n",
            self.memory_usage.get()
        ));

        out.push_str("# HELP predicted_cpu_usage Predicted CPU usage for the next 5 minutes.\n");
        out.push_str("# TYPE predicted_cpu_usage gauge\n");
        out.push_str(&format!(
            "predicted_cpu_usage{{instance=\"{INSTANCE}\"}} {:.2}\n",
            self.predicted_cpu.get()
        ));

        out.push_str("# HELP scaling_actions_total Total number of scaling actions taken.\n");
        out.push_str("# TYPE scaling_actions_total counter\n");
        for (action, counter) in [
            ("scale_up", &self.scale_up_total),
            ("scale_down", &self.scale_down_total),
            ("no_action", &self.no_action_total),
        ] {
            out.push_str(&format!(
                "scaling_actions_total{{action=\"{action}\",instance=\"{INSTANCE}\"}} {}\n",
                counter.load(Ordering::Relaxed)
            ));
        }

        out
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_pre_registers_all_action_series() {
        let registry = MetricsRegistry::new();
        let output = registry.render();

        assert!(output.contains("# TYPE scaling_actions_total counter"));
        assert!(output.contains("scaling_actions_total{action=\"scale_up\",instance=\"smartscale\"} 0"));
        assert!(output.contains("scaling_actions_total{action=\"scale_down\",instance=\"smartscale\"} 0"));
        assert!(output.contains("scaling_actions_total{action=\"no_action\",instance=\"smartscale\"} 0"));
    }

    #[test]
    fn gauges_render_latest_values() {
        let registry = MetricsRegistry::new();
        registry.set_cpu_usage(42.5);
        registry.set_memory_usage(61.25);
        registry.set_predicted_cpu(55.0);

        let output = registry.render();
        assert!(output.contains("cpu_usage_percent{instance=\"smartscale\"} 42.50"));
        assert!(output.contains("memory_usage_percent{instance=\"smartscale\"} 61.25"));
        assert!(output.contains("predicted_cpu_usage{instance=\"smartscale\"} 55.00"));
    }

    #[test]
    fn action_counter_increments() {
        let registry = MetricsRegistry::new();
        registry.record_action(ScalingDecision::ScaleUp);
        registry.record_action(ScalingDecision::ScaleUp);
        registry.record_action(ScalingDecision::NoAction);

        let output = registry.render();
        assert!(output.contains("scaling_actions_total{action=\"scale_up\",instance=\"smartscale\"} 2"));
        assert!(output.contains("scaling_actions_total{action=\"no_action\",instance=\"smartscale\"} 1"));
        assert!(output.contains("scaling_actions_total{action=\"scale_down\",instance=\"smartscale\"} 0"));
    }

    #[test]
    fn render_lines_carry_labels() {
        let output = MetricsRegistry::new().render();
        for line in output.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            assert!(
                line.contains("instance=\"smartscale\""),
                "line should carry the instance label: {line}"
            );
        }
    }
}
