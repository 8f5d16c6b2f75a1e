//! Persisted model artifacts.
//!
//! Training produces two separate JSON files in the model directory:
//! `cpu_predictor.json` (coefficients + intercept) and `scaler.json`
//! (per-column mean + scale). Both are loaded once at startup and
//! shared read-only for the life of the process.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ModelError, ModelResult};

const MODEL_FILE: &str = "cpu_predictor.json";
const SCALER_FILE: &str = "scaler.json";

/// Fitted ordinary-least-squares model over scaled features.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Standard-score normalization fitted during training.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl FeatureScaler {
    /// Apply `(x - mean) / scale` elementwise.
    ///
    /// Caller is responsible for shape agreement; the forecaster checks
    /// lengths before calling.
    pub fn transform(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect()
    }
}

/// Reads and writes the model/scaler artifact pair under one directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(SCALER_FILE)
    }

    /// Whether both artifacts are present on disk.
    pub fn exists(&self) -> bool {
        self.model_path().exists() && self.scaler_path().exists()
    }

    /// Persist both artifacts. Any I/O failure propagates; training
    /// must not continue with half-written artifacts.
    pub fn save(&self, model: &LinearModel, scaler: &FeatureScaler) -> ModelResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        write_json(&self.model_path(), model)?;
        write_json(&self.scaler_path(), scaler)?;
        info!(dir = %self.dir.display(), "model artifacts saved");
        Ok(())
    }

    /// Load both artifacts.
    pub fn load(&self) -> ModelResult<(LinearModel, FeatureScaler)> {
        let model: LinearModel = read_json(&self.model_path())?;
        let scaler: FeatureScaler = read_json(&self.scaler_path())?;
        Ok((model, scaler))
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> ModelResult<()> {
    let body = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, body)?;
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> ModelResult<T> {
    let body = std::fs::read(path)?;
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_model() -> LinearModel {
        LinearModel {
            coefficients: vec![0.5, -0.25, 0.1, 0.0, 0.0, 1.0, 2.0, 3.0],
            intercept: 4.5,
        }
    }

    fn test_scaler() -> FeatureScaler {
        FeatureScaler {
            mean: vec![50.0; 8],
            scale: vec![10.0; 8],
        }
    }

    #[test]
    fn transform_standardizes() {
        let scaler = FeatureScaler {
            mean: vec![10.0, 20.0],
            scale: vec![2.0, 5.0],
        };
        assert_eq!(scaler.transform(&[14.0, 10.0]), vec![2.0, -2.0]);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        assert!(!store.exists());

        store.save(&test_model(), &test_scaler()).unwrap();
        assert!(store.exists());

        let (model, scaler) = store.load().unwrap();
        assert_eq!(model, test_model());
        assert_eq!(scaler, test_scaler());
    }

    #[test]
    fn load_missing_artifacts_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        assert!(matches!(store.load(), Err(ModelError::Io(_))));
    }

    #[test]
    fn load_corrupt_artifact_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        std::fs::write(store.model_path(), b"not json").unwrap();
        std::fs::write(store.scaler_path(), b"{}").unwrap();
        assert!(matches!(store.load(), Err(ModelError::Decode(_))));
    }
}
