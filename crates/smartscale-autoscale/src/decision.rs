//! The three-way scaling decision.

use tracing::debug;

use smartscale_core::{
    PREDICTION_WEIGHT, SCALE_DOWN_THRESHOLD, SCALE_UP_THRESHOLD, ScalingDecision,
};

/// Classify the blended CPU load into a scaling decision.
///
/// With a forecast the input is the convex combination
/// `current·(1−w) + predicted·w` with w = [`PREDICTION_WEIGHT`];
/// without one the current reading is used as-is. Comparisons are
/// strict, so a value sitting exactly on a threshold stays at
/// `NoAction`. Non-finite input also lands on `NoAction` — inaction is
/// the fail-safe default.
pub fn decide(current_cpu: f64, predicted_cpu: Option<f64>) -> ScalingDecision {
    let weighted = match predicted_cpu {
        Some(predicted) => current_cpu * (1.0 - PREDICTION_WEIGHT) + predicted * PREDICTION_WEIGHT,
        None => current_cpu,
    };

    let decision = if weighted > SCALE_UP_THRESHOLD {
        ScalingDecision::ScaleUp
    } else if weighted < SCALE_DOWN_THRESHOLD {
        ScalingDecision::ScaleDown
    } else {
        ScalingDecision::NoAction
    };

    debug!(
        current_cpu,
        predicted_cpu,
        weighted,
        decision = %decision,
        "scaling decision"
    );
    decision
}
