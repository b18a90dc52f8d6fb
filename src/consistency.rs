//! Weekly consistency scoring
//!
//! Computes a bonus reflecting how stable a user's daily step counts were
//! across the week. Lower variance means a higher bonus. The mapping from
//! standard deviation to score is calibrated configuration, not a physical
//! constraint (see [`ConsistencyParams`]).
//!
//! An earlier revision scored consistency per day against the trailing
//! 3 days; that variant is superseded by this weekly one and is not
//! implemented.

use crate::config::ConsistencyParams;
use crate::factors::{self, extract_factors};
use crate::types::ActivityLog;

/// Weekly consistency bonus from the full ordered week of logs.
///
/// Empty weeks get the neutral score (50 by default), which deliberately
/// falls outside the `[floor, 100]` clamp applied to non-empty weeks.
pub fn weekly_consistency_bonus(logs: &[ActivityLog], params: &ConsistencyParams) -> f64 {
    if logs.is_empty() {
        return params.neutral;
    }

    let steps: Vec<f64> = logs
        .iter()
        .map(|log| factors::factor_value(&extract_factors(log), factors::STEPS))
        .collect();

    let stddev = population_stddev(&steps);
    let score = 100.0 - (stddev / params.stddev_scale) * params.spread;
    score.clamp(params.floor, 100.0).round()
}

/// Arithmetic mean; 0 for an empty slice
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n, not n-1)
pub(crate) fn population_stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActivityFactor;
    use chrono::{TimeZone, Utc};

    fn make_steps_log(day: u32, steps: f64) -> ActivityLog {
        ActivityLog {
            id: format!("log-{day}"),
            score: 0.0,
            state: String::new(),
            factors: vec![ActivityFactor {
                id: String::new(),
                name: "steps".to_string(),
                value: steps,
                goal: 10000.0,
                score: 0.0,
                state: String::new(),
                unit: "count".to_string(),
            }],
            data_sources: vec![],
            score_date_time: Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap(),
            created_at_utc: None,
            version: 1,
        }
    }

    #[test]
    fn test_empty_week_neutral_score() {
        let bonus = weekly_consistency_bonus(&[], &ConsistencyParams::default());
        assert_eq!(bonus, 50.0);
    }

    #[test]
    fn test_identical_days_score_100() {
        let logs: Vec<ActivityLog> = (15..22).map(|d| make_steps_log(d, 8000.0)).collect();
        let bonus = weekly_consistency_bonus(&logs, &ConsistencyParams::default());
        assert_eq!(bonus, 100.0);
    }

    #[test]
    fn test_stddev_at_scale_hits_floor() {
        // Two days at 6000 and 10000: mean 8000, population stddev exactly 2000
        let logs = vec![make_steps_log(15, 6000.0), make_steps_log(16, 10000.0)];
        let bonus = weekly_consistency_bonus(&logs, &ConsistencyParams::default());
        assert_eq!(bonus, 40.0);
    }

    #[test]
    fn test_floor_clamps_extreme_variance() {
        let logs = vec![make_steps_log(15, 0.0), make_steps_log(16, 20000.0)];
        let bonus = weekly_consistency_bonus(&logs, &ConsistencyParams::default());
        assert_eq!(bonus, 40.0);
    }

    #[test]
    fn test_moderate_variance_intermediate_score() {
        // stddev 1000 -> 100 - (1000/2000)*60 = 70
        let logs = vec![make_steps_log(15, 7000.0), make_steps_log(16, 9000.0)];
        let bonus = weekly_consistency_bonus(&logs, &ConsistencyParams::default());
        assert_eq!(bonus, 70.0);
    }

    #[test]
    fn test_missing_steps_factor_counts_as_zero() {
        let mut no_steps = make_steps_log(16, 0.0);
        no_steps.factors.clear();
        let logs = vec![make_steps_log(15, 8000.0), no_steps];
        // mean 4000, stddev 4000 -> clamped to floor
        let bonus = weekly_consistency_bonus(&logs, &ConsistencyParams::default());
        assert_eq!(bonus, 40.0);
    }

    #[test]
    fn test_population_stddev() {
        assert_eq!(population_stddev(&[]), 0.0);
        assert_eq!(population_stddev(&[5.0]), 0.0);
        assert!((population_stddev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]) - 2.0).abs() < 1e-9);
    }
}
