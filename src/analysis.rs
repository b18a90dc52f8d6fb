//! Weekly aggregation
//!
//! Folds one user's per-day scores into a single weekly
//! [`PerformanceAnalysis`], and computes the partition-level winner/loser
//! statistics. Ranks are assigned globally by the pipeline, not here.

use crate::classify::classify_user;
use crate::config::ScoringConfig;
use crate::consistency::{mean, weekly_consistency_bonus};
use crate::factors::{self, extract_factors, FactorMap};
use crate::scoring::{activity_insights, activity_score, balance_score, efficiency_score};
use crate::types::{
    ActivityLog, LoserStats, PerformanceAnalysis, UserActivityData, WinnerStats,
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use std::collections::HashSet;

/// Rank value of an analysis before global ranks are assigned
pub const UNRANKED: u32 = 0;

/// The Monday (UTC) on or before the given timestamp.
pub fn week_start_monday(at: DateTime<Utc>) -> NaiveDate {
    let date = at.date_naive();
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Monday 00:00:00 through Sunday 23:59:59 (UTC) of the week containing
/// `now`. Used by callers to bound the upstream fetch window.
pub fn current_week_range(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let monday = week_start_monday(now);
    let start = monday.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(7) - Duration::seconds(1);
    (start, end)
}

/// Mean of each log's daily steps value, rounded to the nearest integer;
/// 0 when there are no logs. This is the derivation the fetch collaborator
/// applies for `weeklyAverageSteps`.
pub fn weekly_average_steps_of(logs: &[ActivityLog]) -> f64 {
    if logs.is_empty() {
        return 0.0;
    }
    let steps: Vec<f64> = logs
        .iter()
        .map(|log| factors::factor_value(&extract_factors(log), factors::STEPS))
        .collect();
    mean(&steps).round()
}

/// Weekly summary for one user, or `None` when the user has no logs.
///
/// The consistency bonus is computed once for the week and reused for every
/// day's activity score. Insights are the de-duplicated union of all days'
/// insights, first-seen order preserved. `rank` is left at the
/// [`UNRANKED`] sentinel.
pub fn analyze_user_logs(
    user_data: &UserActivityData,
    config: &ScoringConfig,
) -> Option<PerformanceAnalysis> {
    let logs = &user_data.logs;
    if logs.is_empty() {
        return None;
    }

    let classification = classify_user(user_data.weekly_average_steps, config);
    let consistency_bonus = weekly_consistency_bonus(logs, &config.consistency);

    let factor_maps: Vec<FactorMap> = logs.iter().map(extract_factors).collect();

    let activity_scores: Vec<f64> = factor_maps
        .iter()
        .map(|f| activity_score(f, consistency_bonus, config))
        .collect();
    let steps_values: Vec<f64> = factor_maps
        .iter()
        .map(|f| factors::factor_value(f, factors::STEPS))
        .collect();
    let steps_goal_percentages: Vec<f64> = steps_values
        .iter()
        .map(|steps| (steps / config.step_goal_threshold) * 100.0)
        .collect();
    let efficiency_scores: Vec<f64> = factor_maps
        .iter()
        .map(|f| efficiency_score(f, config))
        .collect();
    let balance_scores: Vec<f64> = factor_maps.iter().map(balance_score).collect();

    let insights = dedup_first_seen(
        factor_maps
            .iter()
            .flat_map(|f| activity_insights(f, consistency_bonus, config)),
    );

    Some(PerformanceAnalysis {
        user_id: user_data.user_id.clone(),
        date: week_start_monday(logs[0].score_date_time),
        activity_score: round2(mean(&activity_scores)),
        steps_value: round2(mean(&steps_values)),
        steps_goal_percentage: round2(mean(&steps_goal_percentages)),
        efficiency_score: round2(mean(&efficiency_scores)),
        balance_score: round2(mean(&balance_scores)),
        consistency_bonus,
        rank: UNRANKED,
        classification,
        insights,
    })
}

/// Statistics over the winner partition. Zeroed when empty.
///
/// Top insights are the three most frequent insight prefixes (text before
/// the first colon) across all winners, ties broken by first-encountered
/// order.
pub fn winner_stats(winners: &[PerformanceAnalysis]) -> WinnerStats {
    if winners.is_empty() {
        return WinnerStats::default();
    }

    let avg_steps = partition_avg_steps(winners);
    let avg_activity_score = partition_avg_activity_score(winners);

    // Counter preserving first-encounter order for stable tie-breaks
    let mut counts: Vec<(String, usize)> = Vec::new();
    for analysis in winners {
        for insight in &analysis.insights {
            let prefix = insight.split(':').next().unwrap_or(insight);
            match counts.iter_mut().find(|(key, _)| key == prefix) {
                Some((_, count)) => *count += 1,
                None => counts.push((prefix.to_string(), 1)),
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1)); // stable: ties keep insertion order
    let top_insights = counts.into_iter().take(3).map(|(key, _)| key).collect();

    WinnerStats {
        avg_steps,
        avg_activity_score,
        top_insights,
    }
}

/// Statistics over the loser partition. Zeroed when empty.
///
/// Issues are included only when they cover more than 60% of the partition,
/// in fixed order: low steps first, then low activity score.
pub fn loser_stats(losers: &[PerformanceAnalysis]) -> LoserStats {
    if losers.is_empty() {
        return LoserStats::default();
    }

    let avg_steps = partition_avg_steps(losers);
    let avg_activity_score = partition_avg_activity_score(losers);

    let coverage = losers.len() as f64 * 0.6;
    let mut common_issues = Vec::new();

    let low_steps = losers.iter().filter(|l| l.steps_value < 5000.0).count();
    if low_steps as f64 > coverage {
        common_issues.push("Consistently low step counts".to_string());
    }

    let low_score = losers.iter().filter(|l| l.activity_score < 50.0).count();
    if low_score as f64 > coverage {
        common_issues.push("Low overall activity score".to_string());
    }

    LoserStats {
        avg_steps,
        avg_activity_score,
        common_issues,
    }
}

fn partition_avg_steps(analyses: &[PerformanceAnalysis]) -> i64 {
    let values: Vec<f64> = analyses.iter().map(|a| a.steps_value).collect();
    mean(&values).round() as i64
}

fn partition_avg_activity_score(analyses: &[PerformanceAnalysis]) -> f64 {
    let values: Vec<f64> = analyses.iter().map(|a| a.activity_score).collect();
    round2(mean(&values))
}

fn dedup_first_seen(insights: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for insight in insights {
        if seen.insert(insight.clone()) {
            out.push(insight);
        }
    }
    out
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
