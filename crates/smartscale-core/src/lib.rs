//! smartscale-core — shared domain types for the SmartScale autoscaler.
//!
//! Defines the metric sample captured from the host, the three-way
//! scaling decision, and the process-wide thresholds the decision
//! engine compares against.

pub mod types;

pub use types::*;
