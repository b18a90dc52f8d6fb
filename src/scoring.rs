//! Component scorers and the activity score composer
//!
//! Pure, total functions from a day's factor map (plus the precomputed
//! weekly consistency bonus) to bounded sub-scores, their weighted
//! composition, and human-readable insight strings.
//!
//! This is the single exported scoring path; both the per-day composer and
//! the weekly aggregator call these functions directly.

use crate::config::ScoringConfig;
use crate::factors::{
    factor_goal, factor_value, FactorMap, ACTIVE_CALORIES, ACTIVE_HOURS, EXTENDED_INACTIVITY,
    INTENSE_ACTIVITY_DURATION, STEPS,
};
use crate::types::ActivityFactor;

/// Steps sub-score: percentage of the step goal threshold, capped at 100.
/// 0 when the steps value is 0 or the factor is absent.
pub fn steps_score(steps: f64, config: &ScoringConfig) -> f64 {
    if steps <= 0.0 {
        return 0.0;
    }
    let percentage = steps / config.step_goal_threshold;
    (percentage * 100.0).min(100.0)
}

/// Efficiency sub-score from calories burned per step.
///
/// A day matching the reference burn rate scores 50; twice the reference
/// caps at 100. Zero steps scores 0 rather than dividing by zero.
pub fn efficiency_score(factors: &FactorMap, config: &ScoringConfig) -> f64 {
    let steps = factor_value(factors, STEPS);
    let calories = factor_value(factors, ACTIVE_CALORIES);
    if steps == 0.0 {
        return 0.0;
    }
    let calories_per_step = calories / steps;
    let efficiency_ratio = calories_per_step / config.reference_calories_per_step;
    (efficiency_ratio * 50.0).min(100.0)
}

/// Balance sub-score from how activity was distributed across the day.
///
/// Three capped terms: active hours (up to 40), extended inactivity
/// (up to 30, penalized toward 0 at twice the inactivity goal), and intense
/// activity minutes (up to 30).
pub fn balance_score(factors: &FactorMap) -> f64 {
    let active_hours = factor_value(factors, ACTIVE_HOURS);
    let active_hours_goal = factor_goal(factors, ACTIVE_HOURS, 10.0);
    let inactivity = factor_value(factors, EXTENDED_INACTIVITY);
    let inactivity_goal = factor_goal(factors, EXTENDED_INACTIVITY, 600.0);
    let intense_activity = factor_value(factors, INTENSE_ACTIVITY_DURATION);

    let active_hours_score = ((active_hours / active_hours_goal) * 40.0).min(40.0);
    let inactivity_ratio = (inactivity / inactivity_goal).min(2.0);
    let inactivity_score = (30.0 - inactivity_ratio * 15.0).max(0.0);
    let intense_score = intense_activity.min(30.0);

    active_hours_score + inactivity_score + intense_score
}

/// Unified activity score: steps (40%), efficiency (30%), balance (20%),
/// consistency (10%) under the default weights.
pub fn activity_score(factors: &FactorMap, consistency_bonus: f64, config: &ScoringConfig) -> f64 {
    let steps = factor_value(factors, STEPS);
    let w = &config.weights;
    let score = steps_score(steps, config) * w.steps
        + efficiency_score(factors, config) * w.efficiency
        + balance_score(factors) * w.balance
        + consistency_bonus * w.consistency;
    score.clamp(0.0, 100.0)
}

/// All insights for one day: step insights followed by the remaining factor
/// and consistency insights, in rule-declaration order.
pub fn activity_insights(
    factors: &FactorMap,
    consistency_bonus: f64,
    config: &ScoringConfig,
) -> Vec<String> {
    let mut insights = steps_insights(factors.get(STEPS), config);
    insights.extend(factor_insights(factors, consistency_bonus));
    insights
}

/// Step-count insights, tiered against the step goal threshold.
pub fn steps_insights(steps_factor: Option<&ActivityFactor>, config: &ScoringConfig) -> Vec<String> {
    let Some(factor) = steps_factor else {
        return vec!["No step data available".to_string()];
    };

    let steps = factor.value;
    let threshold = config.step_goal_threshold;
    let percentage = ((steps / threshold) * 100.0).round();

    let insight = if steps >= threshold * 1.5 {
        format!("Outstanding step achievement: {steps} steps ({percentage}% of threshold)")
    } else if steps >= threshold {
        format!("Excellent step count: {steps} steps ({percentage}% of threshold)")
    } else if steps >= threshold * 0.75 {
        format!("Good step progress: {steps} steps, close to threshold")
    } else {
        format!("Steps below threshold: {steps} steps ({percentage}% of {threshold})")
    };

    vec![insight]
}

/// Insights for the non-step factors plus the consistency bonus.
///
/// Each rule produces at most one string; missing factors read as 0.
pub fn factor_insights(factors: &FactorMap, consistency_bonus: f64) -> Vec<String> {
    let mut insights = Vec::new();
    let active_hours = factor_value(factors, ACTIVE_HOURS);
    let inactivity = factor_value(factors, EXTENDED_INACTIVITY);
    let calories = factor_value(factors, ACTIVE_CALORIES);
    let steps = factor_value(factors, STEPS);

    if steps > 0.0 {
        let efficiency = calories / steps * 1000.0;
        if efficiency >= 40.0 {
            insights.push(format!(
                "High calorie burn efficiency: {efficiency:.1} cal per 1000 steps"
            ));
        } else if efficiency >= 30.0 {
            insights.push(format!(
                "Moderate activity intensity: {calories} active calories burned"
            ));
        }
    }

    if active_hours >= 8.0 {
        insights.push(format!(
            "Excellent activity distribution: {active_hours} active hours"
        ));
    } else if active_hours >= 6.0 {
        insights.push(format!(
            "Good activity spread: {active_hours} active hours throughout the day"
        ));
    }

    if inactivity > 900.0 {
        let hours = (inactivity / 60.0).round();
        insights.push(format!("High inactivity: {hours} hours of extended sitting"));
    }

    if consistency_bonus >= 80.0 {
        insights.push("Strong consistency: improving or maintaining performance".to_string());
    } else if consistency_bonus >= 60.0 {
        insights.push("Moderate consistency: slight performance variation".to_string());
    } else {
        insights.push("Consistency opportunity: performance below recent average".to_string());
    }

    insights
}
