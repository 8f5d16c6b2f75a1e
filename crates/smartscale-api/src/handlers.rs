//! REST API handlers.
//!
//! Each handler samples, forecasts, or reads shared state and returns
//! JSON. Failure mapping: missing model → 503 on `/predict`; anything
//! unexpected → 500 with the message. Degraded forecasts are not
//! errors — they pass the current reading through.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Local;
use serde_json::{Value, json};

use smartscale_autoscale::decide;
use smartscale_core::{MetricSample, PREDICTION_HORIZON};

use crate::AppState;

const SERVICE_NAME: &str = "SmartScale Autoscaler API";

/// Response wrapper for error payloads, matching the API's envelope.
#[derive(serde::Serialize)]
struct ApiResponse<T: serde::Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn error_response(msg: &str, status: StatusCode) -> impl IntoResponse {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }),
    )
}

/// Sample the host and push the readings into the exported gauges.
async fn sample_and_record(state: &AppState) -> MetricSample {
    let sample = state.sampler.sample().await;
    state.registry.set_cpu_usage(sample.cpu_percent);
    state.registry.set_memory_usage(sample.memory_percent);
    sample
}

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Local::now().to_rfc3339(),
        "model_loaded": state.forecaster.is_some(),
    }))
}

/// GET /metrics
pub async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        state.registry.render(),
    )
}

/// GET /system/current
pub async fn system_current(State(state): State<AppState>) -> Json<MetricSample> {
    Json(sample_and_record(&state).await)
}

/// GET /predict
///
/// 503 until a forecast model is loaded. A degraded forecast still
/// answers 200 with the passthrough value.
pub async fn predict(State(state): State<AppState>) -> impl IntoResponse {
    let Some(forecaster) = &state.forecaster else {
        return error_response("model not loaded", StatusCode::SERVICE_UNAVAILABLE)
            .into_response();
    };

    let sample = sample_and_record(&state).await;
    let forecast = forecaster.predict(sample.cpu_percent);
    let predicted = forecast.value();

    state.registry.set_predicted_cpu(predicted);
    state.observed.write().await.last_prediction = Some(predicted);

    Json(json!({
        "timestamp": Local::now().to_rfc3339(),
        "current_cpu": sample.cpu_percent,
        "predicted_cpu": predicted,
        "prediction_horizon": PREDICTION_HORIZON,
    }))
    .into_response()
}

/// GET /status
///
/// Recomputes the scaling decision from the current sample and the
/// latest forecast. Before any forecast exists, the decision field
/// reads "No prediction available".
pub async fn status(State(state): State<AppState>) -> Json<Value> {
    let sample = sample_and_record(&state).await;

    let mut observed = state.observed.write().await;
    let scaling_decision = match observed.last_prediction {
        Some(predicted) => {
            let decision = decide(sample.cpu_percent, Some(predicted));
            observed.last_decision = Some(decision);
            state.registry.record_action(decision);
            decision.to_string()
        }
        None => "No prediction available".to_string(),
    };
    let last_prediction = observed.last_prediction;
    drop(observed);

    let model_status = if state.forecaster.is_some() {
        "loaded"
    } else {
        "not loaded"
    };

    Json(json!({
        "timestamp": Local::now().to_rfc3339(),
        "current_metrics": sample,
        "last_prediction": last_prediction,
        "scaling_decision": scaling_decision,
        "model_status": model_status,
    }))
}
