//! smartscale-metrics — host sampling and Prometheus exposition.
//!
//! [`SystemSampler`] reads CPU and memory from the host over a short
//! sampling window; [`MetricsRegistry`] keeps the exported gauges and
//! the scaling-action counter and renders the Prometheus text format.

pub mod registry;
pub mod sampler;

pub use registry::MetricsRegistry;
pub use sampler::SystemSampler;
