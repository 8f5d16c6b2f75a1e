//! Host CPU/memory sampling via sysinfo.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use sysinfo::System;
use tokio::sync::Mutex;
use tracing::debug;

use smartscale_core::MetricSample;

/// Samples host CPU and memory usage.
///
/// CPU usage is a delta between two refreshes, so each sample waits out
/// a sampling window (clamped to sysinfo's minimum update interval).
/// The inner `System` is shared behind a mutex; concurrent samples
/// serialize against each other.
#[derive(Clone)]
pub struct SystemSampler {
    system: Arc<Mutex<System>>,
    window: Duration,
}

impl SystemSampler {
    /// Create a sampler with the given CPU sampling window.
    pub fn new(window: Duration) -> Self {
        let mut system = System::new();
        // Baseline refresh so the first sample has a reference point.
        system.refresh_cpu_usage();
        Self {
            system: Arc::new(Mutex::new(system)),
            window,
        }
    }

    /// Capture a point-in-time host sample.
    pub async fn sample(&self) -> MetricSample {
        let mut system = self.system.lock().await;

        system.refresh_cpu_usage();
        tokio::time::sleep(self.window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)).await;
        system.refresh_cpu_usage();
        system.refresh_memory();

        let cpu_percent = system.global_cpu_usage() as f64;
        let total = system.total_memory();
        let memory_percent = if total == 0 {
            0.0
        } else {
            system.used_memory() as f64 / total as f64 * 100.0
        };

        let sample = MetricSample {
            timestamp: Local::now().to_rfc3339(),
            cpu_percent,
            memory_percent,
            memory_available_bytes: system.available_memory(),
        };
        debug!(
            cpu = sample.cpu_percent,
            memory = sample.memory_percent,
            "host sample"
        );
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sample_yields_percentages_in_range() {
        let sampler = SystemSampler::new(Duration::ZERO);
        let sample = sampler.sample().await;

        assert!((0.0..=100.0).contains(&sample.cpu_percent));
        assert!((0.0..=100.0).contains(&sample.memory_percent));
        assert!(!sample.timestamp.is_empty());
    }

    #[tokio::test]
    async fn sampler_clones_share_one_system() {
        let sampler = SystemSampler::new(Duration::ZERO);
        let clone = sampler.clone();

        // Both clones sample without deadlocking.
        let a = sampler.sample().await;
        let b = clone.sample().await;
        assert!(a.memory_available_bytes > 0 || b.memory_available_bytes > 0);
    }
}
