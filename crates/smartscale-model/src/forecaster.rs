//! Applying the persisted model to a current CPU reading.

use chrono::Local;
use tracing::{debug, warn};

use smartscale_core::LOOKBACK;

use crate::artifacts::{FeatureScaler, LinearModel};
use crate::error::{ModelError, ModelResult};
use crate::features::feature_vector;

/// Outcome of a forecast attempt.
///
/// Callers can tell a real model output from the degrade-to-identity
/// fallback without inspecting logs; both carry a usable value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Forecast {
    /// Scaled linear prediction, clamped into [0, 100].
    Computed(f64),
    /// Prediction failed; the current CPU reading passes through.
    Degraded(f64),
}

impl Forecast {
    pub fn value(&self) -> f64 {
        match self {
            Forecast::Computed(v) | Forecast::Degraded(v) => *v,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Forecast::Degraded(_))
    }
}

/// Immutable model + scaler pair, loaded once and shared read-only.
#[derive(Debug, Clone)]
pub struct CpuForecaster {
    model: LinearModel,
    scaler: FeatureScaler,
    lookback: usize,
}

impl CpuForecaster {
    pub fn new(model: LinearModel, scaler: FeatureScaler) -> Self {
        Self {
            model,
            scaler,
            lookback: LOOKBACK,
        }
    }

    /// Forecast the short-horizon CPU usage from the current reading.
    ///
    /// Any internal failure degrades to `Forecast::Degraded(current_cpu)`
    /// and is logged; this function never errors.
    pub fn predict(&self, current_cpu: f64) -> Forecast {
        match self.predict_inner(current_cpu) {
            Ok(value) => {
                debug!(current_cpu, predicted = value, "cpu forecast");
                Forecast::Computed(value)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    current_cpu,
                    "prediction failed, falling back to current reading"
                );
                Forecast::Degraded(current_cpu)
            }
        }
    }

    fn predict_inner(&self, current_cpu: f64) -> ModelResult<f64> {
        let features = feature_vector(current_cpu, self.lookback, Local::now());

        if features.len() != self.model.coefficients.len() {
            return Err(ModelError::Shape {
                expected: self.model.coefficients.len(),
                got: features.len(),
            });
        }
        if features.len() != self.scaler.mean.len() || features.len() != self.scaler.scale.len() {
            return Err(ModelError::Shape {
                expected: self.scaler.mean.len(),
                got: features.len(),
            });
        }

        let scaled = self.scaler.transform(&features);
        let raw: f64 = self
            .model
            .coefficients
            .iter()
            .zip(&scaled)
            .map(|(c, x)| c * x)
            .sum::<f64>()
            + self.model.intercept;

        Ok(raw.clamp(0.0, 100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_scaler(len: usize) -> FeatureScaler {
        FeatureScaler {
            mean: vec![0.0; len],
            scale: vec![1.0; len],
        }
    }

    fn constant_model(len: usize, intercept: f64) -> LinearModel {
        LinearModel {
            coefficients: vec![0.0; len],
            intercept,
        }
    }

    #[test]
    fn constant_model_predicts_intercept() {
        let f = CpuForecaster::new(constant_model(8, 42.0), identity_scaler(8));
        assert_eq!(f.predict(10.0), Forecast::Computed(42.0));
    }

    #[test]
    fn output_clamped_to_valid_range() {
        let high = CpuForecaster::new(constant_model(8, 1e6), identity_scaler(8));
        assert_eq!(high.predict(50.0).value(), 100.0);

        let low = CpuForecaster::new(constant_model(8, -1e6), identity_scaler(8));
        assert_eq!(low.predict(50.0).value(), 0.0);
    }

    #[test]
    fn shape_mismatch_degrades_to_current() {
        let f = CpuForecaster::new(constant_model(4, 0.0), identity_scaler(4));
        let forecast = f.predict(63.0);
        assert!(forecast.is_degraded());
        assert_eq!(forecast.value(), 63.0);
    }

    #[test]
    fn scaler_mismatch_degrades_to_current() {
        let f = CpuForecaster::new(constant_model(8, 0.0), identity_scaler(3));
        assert_eq!(f.predict(12.5), Forecast::Degraded(12.5));
    }
}
