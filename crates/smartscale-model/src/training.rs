//! Offline training pipeline.
//!
//! Generates synthetic CPU usage with a daily sinusoidal pattern plus
//! Gaussian noise, builds lag/time supervised rows, fits a standard
//! scaler and an ordinary-least-squares linear model, and persists
//! both artifacts. Deterministic for a fixed seed and base time.

use std::f64::consts::PI;
use std::path::Path;

use chrono::{DateTime, Datelike, Duration, Local, Timelike};
use nalgebra::{DMatrix, DVector};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use tracing::info;

use smartscale_core::LOOKBACK;

use crate::artifacts::{ArtifactStore, FeatureScaler, LinearModel};
use crate::error::{ModelError, ModelResult};
use crate::forecaster::CpuForecaster;

/// Knobs for the training pipeline.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Number of synthetic samples to generate.
    pub samples: usize,
    /// Lag feature count. Must match the inference-time lookback.
    pub lookback: usize,
    /// RNG seed for the Gaussian noise.
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            lookback: LOOKBACK,
            seed: 42,
        }
    }
}

/// Fitted artifacts plus the training-quality signal.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub model: LinearModel,
    pub scaler: FeatureScaler,
    /// R² of the fit on the training set. Logged, not enforced.
    pub r_squared: f64,
}

/// Fit model and scaler on freshly generated synthetic data.
pub fn fit(config: &TrainingConfig) -> ModelResult<TrainingOutcome> {
    let base = Local::now() - Duration::days(config.samples as i64);
    fit_at(config, base)
}

/// Fit with an explicit base timestamp for the synthetic series.
fn fit_at(config: &TrainingConfig, base: DateTime<Local>) -> ModelResult<TrainingOutcome> {
    let samples = generate_samples(config, base)?;
    let (rows, targets) = build_rows(&samples, config.lookback);

    if rows.is_empty() {
        return Err(ModelError::Fit(format!(
            "{} samples leave no rows after dropping {} for lag history",
            config.samples, config.lookback
        )));
    }

    let scaler = fit_scaler(&rows);
    let scaled: Vec<Vec<f64>> = rows.iter().map(|r| scaler.transform(r)).collect();
    let (model, r_squared) = fit_ols(&scaled, &targets)?;

    Ok(TrainingOutcome {
        model,
        scaler,
        r_squared,
    })
}

/// Train and persist both artifacts under `dir`.
///
/// Persistence failures propagate; training never silently continues
/// without artifacts on disk.
pub fn train(dir: impl AsRef<Path>, config: &TrainingConfig) -> ModelResult<TrainingOutcome> {
    info!(
        samples = config.samples,
        lookback = config.lookback,
        seed = config.seed,
        "training cpu forecast model"
    );

    let outcome = fit(config)?;
    let store = ArtifactStore::new(dir.as_ref());
    store.save(&outcome.model, &outcome.scaler)?;

    info!(r_squared = outcome.r_squared, "model trained");
    Ok(outcome)
}

/// Load persisted artifacts, training first if either is missing.
pub fn load_or_train(dir: impl AsRef<Path>, config: &TrainingConfig) -> ModelResult<CpuForecaster> {
    let store = ArtifactStore::new(dir.as_ref());

    if !store.exists() {
        info!(dir = %dir.as_ref().display(), "model artifacts not found, training");
        train(dir.as_ref(), config)?;
    }

    let (model, scaler) = store.load()?;
    Ok(CpuForecaster::new(model, scaler))
}

// ── Synthetic data ─────────────────────────────────────────────────

/// One minute per sample, daily sinusoid around 50% with ±30 amplitude
/// and N(0, 5) noise, clamped into [0, 100].
fn generate_samples(
    config: &TrainingConfig,
    base: DateTime<Local>,
) -> ModelResult<Vec<(DateTime<Local>, f64)>> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, 5.0).map_err(|e| ModelError::Fit(e.to_string()))?;

    let samples = (0..config.samples)
        .map(|i| {
            let ts = base + Duration::minutes(i as i64);
            let hour_frac = ts.hour() as f64 + ts.minute() as f64 / 60.0;
            let daily = 50.0 + 30.0 * (2.0 * PI * hour_frac / 24.0).sin();
            let cpu = (daily + noise.sample(&mut rng)).clamp(0.0, 100.0);
            (ts, cpu)
        })
        .collect();

    Ok(samples)
}

/// Supervised rows: `lookback` previous readings plus hour/minute/weekday,
/// predicting the reading at the row's own timestamp. The first
/// `lookback` samples have no full history and are dropped.
fn build_rows(
    samples: &[(DateTime<Local>, f64)],
    lookback: usize,
) -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut rows = Vec::new();
    let mut targets = Vec::new();

    for i in lookback..samples.len() {
        let (ts, cpu) = samples[i];
        let mut row = Vec::with_capacity(lookback + 3);
        for lag in 1..=lookback {
            row.push(samples[i - lag].1);
        }
        row.push(ts.hour() as f64);
        row.push(ts.minute() as f64);
        row.push(ts.weekday().num_days_from_monday() as f64);

        rows.push(row);
        targets.push(cpu);
    }

    (rows, targets)
}

// ── Fitting ────────────────────────────────────────────────────────

/// Per-column mean and population standard deviation. Zero-variance
/// columns get scale 1.0 so the transform stays finite.
fn fit_scaler(rows: &[Vec<f64>]) -> FeatureScaler {
    let n = rows.len() as f64;
    let cols = rows[0].len();

    let mut mean = vec![0.0; cols];
    for row in rows {
        for (j, v) in row.iter().enumerate() {
            mean[j] += v;
        }
    }
    for m in &mut mean {
        *m /= n;
    }

    let mut scale = vec![0.0; cols];
    for row in rows {
        for (j, v) in row.iter().enumerate() {
            scale[j] += (v - mean[j]).powi(2);
        }
    }
    for s in &mut scale {
        *s = (*s / n).sqrt();
        if !(*s > f64::EPSILON) {
            *s = 1.0;
        }
    }

    FeatureScaler { mean, scale }
}

/// Least-squares fit with intercept via SVD on the augmented design
/// matrix. Returns the model and its R² on the training set.
fn fit_ols(scaled: &[Vec<f64>], targets: &[f64]) -> ModelResult<(LinearModel, f64)> {
    let n = scaled.len();
    let p = scaled[0].len();

    // Features in columns 0..p, intercept column of ones at the end.
    let mut design = DMatrix::from_element(n, p + 1, 1.0);
    for (i, row) in scaled.iter().enumerate() {
        for (j, v) in row.iter().enumerate() {
            design[(i, j)] = *v;
        }
    }
    let y = DVector::from_column_slice(targets);

    let beta = design
        .clone()
        .svd(true, true)
        .solve(&y, 1e-12)
        .map_err(|e| ModelError::Fit(e.to_string()))?;

    let predicted = &design * &beta;
    let mean_y = y.mean();
    let ss_res: f64 = y
        .iter()
        .zip(predicted.iter())
        .map(|(actual, fit)| (actual - fit).powi(2))
        .sum();
    let ss_tot: f64 = y.iter().map(|v| (v - mean_y).powi(2)).sum();
    let r_squared = if ss_tot > f64::EPSILON {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let coefficients = (0..p).map(|j| beta[(j, 0)]).collect();
    let model = LinearModel {
        coefficients,
        intercept: beta[(p, 0)],
    };

    Ok((model, r_squared))
}
