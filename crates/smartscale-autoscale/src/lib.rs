//! smartscale-autoscale — forecast-weighted threshold scaling.
//!
//! Blends the current CPU reading with the short-horizon forecast and
//! classifies the result against two fixed thresholds.
//!
//! # Decision Algorithm
//!
//! ```text
//! weighted = current                      (no forecast)
//! weighted = 0.3·current + 0.7·forecast   (forecast available)
//!
//! weighted > 80.0  →  scale_up
//! weighted < 30.0  →  scale_down
//! otherwise        →  no_action           (ties resolve to no_action)
//! ```
//!
//! The executor behind the decision is a trait seam; the shipped
//! implementation only simulates the cloud-API round trip.

pub mod decision;
pub mod executor;

pub use decision::decide;
pub use executor::{ActionExecutor, SimulatedExecutor};
