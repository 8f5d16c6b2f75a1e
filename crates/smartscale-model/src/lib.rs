//! smartscale-model — short-horizon CPU forecasting.
//!
//! A single-feature linear regression over lag/time features, trained
//! on synthetic sinusoidal data and persisted as two JSON artifacts
//! (model + scaler). At inference time the current CPU reading stands
//! in for every lag feature; the scaled linear prediction is clamped
//! into [0, 100].
//!
//! # Pipeline
//!
//! ```text
//! current_cpu ──▶ [lag₁..lag_L, hour, minute, weekday]
//!             ──▶ (x − mean) / scale
//!             ──▶ dot(coefficients, x_scaled) + intercept
//!             ──▶ clamp(0, 100)
//! ```
//!
//! Prediction failures degrade to the identity forecast
//! (`Forecast::Degraded(current_cpu)`) rather than erroring out.

pub mod artifacts;
pub mod error;
pub mod features;
pub mod forecaster;
pub mod training;

pub use artifacts::{ArtifactStore, FeatureScaler, LinearModel};
pub use error::ModelError;
pub use features::feature_vector;
pub use forecaster::{CpuForecaster, Forecast};
pub use training::{TrainingConfig, TrainingOutcome, load_or_train, train};
