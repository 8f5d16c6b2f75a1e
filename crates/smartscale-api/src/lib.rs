//! smartscale-api — REST API for the SmartScale autoscaler.
//!
//! Provides axum route handlers for host metrics, CPU forecasts, and
//! the derived scaling status, consumed by the external dashboard.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/` | Service banner |
//! | GET | `/health` | Liveness + model readiness |
//! | GET | `/metrics` | Prometheus exposition |
//! | GET | `/system/current` | Current host CPU/memory sample |
//! | GET | `/predict` | Short-horizon CPU forecast (503 until a model is loaded) |
//! | GET | `/status` | Sample + latest forecast + scaling decision |

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use smartscale_core::ScalingDecision;
use smartscale_metrics::{MetricsRegistry, SystemSampler};
use smartscale_model::CpuForecaster;

/// Most recent forecast and decision observed by this process.
///
/// Last-write-wins under concurrent requests; readers may see values
/// from an interleaved request. That weak consistency is accepted —
/// the values are advisory, recomputed on every `/status` call.
#[derive(Debug, Clone, Default)]
pub struct Observed {
    pub last_prediction: Option<f64>,
    pub last_decision: Option<ScalingDecision>,
}

/// Shared state for API handlers.
#[derive(Clone)]
pub struct AppState {
    /// `None` until model initialization succeeds; `/predict` refuses
    /// to serve (503) while absent.
    pub forecaster: Option<Arc<CpuForecaster>>,
    pub sampler: SystemSampler,
    pub registry: Arc<MetricsRegistry>,
    pub observed: Arc<RwLock<Observed>>,
}

impl AppState {
    pub fn new(forecaster: Option<Arc<CpuForecaster>>, sampler: SystemSampler) -> Self {
        Self {
            forecaster,
            sampler,
            registry: Arc::new(MetricsRegistry::new()),
            observed: Arc::new(RwLock::new(Observed::default())),
        }
    }
}

/// Build the complete API router. CORS is permissive; the dashboard is
/// served from a different origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::prometheus_metrics))
        .route("/system/current", get(handlers::system_current))
        .route("/predict", get(handlers::predict))
        .route("/status", get(handlers::status))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
