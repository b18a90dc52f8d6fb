//! Pipeline orchestration
//!
//! This module provides the public API for stride-rank. It runs the full
//! analysis over a cohort of already-fetched user weeks: classification,
//! per-user weekly aggregation, global ranking, and cohort statistics.

use crate::analysis::{analyze_user_logs, loser_stats, winner_stats};
use crate::classify::classify_users;
use crate::config::ScoringConfig;
use crate::error::AnalysisError;
use crate::report::{AnalysisReport, ReportEncoder};
use crate::types::{
    Classification, CohortAnalysis, PerformanceAnalysis, UserActivityData, WinnerLoserAnalysis,
};

/// Analyze a cohort of user weeks.
///
/// Produces one ranked [`PerformanceAnalysis`] per user with logs, and the
/// [`WinnerLoserAnalysis`] over the whole cohort. Errors with
/// [`AnalysisError::EmptyCohort`] when `users` is empty.
///
/// # Example
/// ```ignore
/// let result = analyze_cohort(&users, &ScoringConfig::default())?;
/// for analysis in &result.analyses {
///     println!("#{} {}: {}", analysis.rank, analysis.user_id, analysis.activity_score);
/// }
/// ```
pub fn analyze_cohort(
    users: &[UserActivityData],
    config: &ScoringConfig,
) -> Result<CohortAnalysis, AnalysisError> {
    let split = classify_users(users, config)?;

    let mut analyses: Vec<PerformanceAnalysis> = users
        .iter()
        .filter_map(|user| analyze_user_logs(user, config))
        .collect();

    // Stable sort: ties keep input order
    analyses.sort_by(|a, b| b.activity_score.total_cmp(&a.activity_score));
    for (index, analysis) in analyses.iter_mut().enumerate() {
        analysis.rank = (index + 1) as u32;
    }

    let winners: Vec<PerformanceAnalysis> = analyses
        .iter()
        .filter(|a| a.classification == Classification::Winner)
        .cloned()
        .collect();
    let losers: Vec<PerformanceAnalysis> = analyses
        .iter()
        .filter(|a| a.classification == Classification::Loser)
        .cloned()
        .collect();

    let winner_loser_analysis = WinnerLoserAnalysis {
        winner_stats: winner_stats(&winners),
        loser_stats: loser_stats(&losers),
        overall_weekly_average_steps: split.overall_weekly_average,
        winners,
        losers,
    };

    Ok(CohortAnalysis {
        analyses,
        winner_loser_analysis,
    })
}

/// Configured engine bundling the scoring config with a report encoder.
///
/// Use this at the service boundary: feed it the fetched cohort, get back a
/// versioned report ready for JSON transport or storage.
pub struct AnalysisEngine {
    config: ScoringConfig,
    encoder: ReportEncoder,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisEngine {
    /// Engine with the default scoring configuration
    pub fn new() -> Self {
        Self::with_config(ScoringConfig::default())
    }

    /// Engine with a custom scoring configuration
    pub fn with_config(config: ScoringConfig) -> Self {
        Self {
            config,
            encoder: ReportEncoder::new(),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Run the analysis and wrap it in a versioned report
    pub fn analyze(&self, users: &[UserActivityData]) -> Result<AnalysisReport, AnalysisError> {
        let result = analyze_cohort(users, &self.config)?;
        Ok(self.encoder.encode(result, users.len()))
    }

    /// JSON boundary: parse a JSON array of user weeks, analyze, and return
    /// the report as a JSON string
    pub fn analyze_json(&self, users_json: &str) -> Result<String, AnalysisError> {
        let users: Vec<UserActivityData> = serde_json::from_str(users_json)?;
        let report = self.analyze(&users)?;
        self.encoder.encode_to_json(&report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::weekly_average_steps_of;
    use crate::types::{ActivityFactor, ActivityLog};
    use chrono::{TimeZone, Utc};

    fn make_log(day: u32, steps: f64, calories: f64) -> ActivityLog {
        ActivityLog {
            id: format!("log-{day}"),
            score: 70.0,
            state: "medium".to_string(),
            factors: vec![
                ActivityFactor {
                    id: String::new(),
                    name: "steps".to_string(),
                    value: steps,
                    goal: 10000.0,
                    score: 0.0,
                    state: String::new(),
                    unit: "count".to_string(),
                },
                ActivityFactor {
                    id: String::new(),
                    name: "active_calories".to_string(),
                    value: calories,
                    goal: 500.0,
                    score: 0.0,
                    state: String::new(),
                    unit: "kcal".to_string(),
                },
            ],
            data_sources: vec![],
            score_date_time: Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap(),
            created_at_utc: None,
            version: 1,
        }
    }

    fn make_user(user_id: &str, daily_steps: &[f64]) -> UserActivityData {
        let logs: Vec<ActivityLog> = daily_steps
            .iter()
            .enumerate()
            .map(|(i, steps)| make_log(15 + i as u32, *steps, steps * 0.04))
            .collect();
        let weekly_average_steps = weekly_average_steps_of(&logs);
        UserActivityData {
            user_id: user_id.to_string(),
            logs,
            weekly_average_steps,
        }
    }

    fn sample_cohort() -> Vec<UserActivityData> {
        vec![
            make_user("high", &[11000.0, 10500.0, 11200.0, 10800.0]),
            make_user("mid", &[7600.0, 7500.0, 7700.0, 7800.0]),
            make_user("low", &[3000.0, 2500.0, 2800.0, 3100.0]),
            // Failed fetch: no logs, zero average
            UserActivityData {
                user_id: "empty".to_string(),
                logs: vec![],
                weekly_average_steps: 0.0,
            },
        ]
    }

    #[test]
    fn test_analyze_cohort_ranks_descending() {
        let result = analyze_cohort(&sample_cohort(), &ScoringConfig::default()).unwrap();

        // Zero-log user excluded from analyses
        assert_eq!(result.analyses.len(), 3);
        for pair in result.analyses.windows(2) {
            assert!(pair[0].activity_score >= pair[1].activity_score);
        }
        for (i, analysis) in result.analyses.iter().enumerate() {
            assert_eq!(analysis.rank, (i + 1) as u32);
        }
    }

    #[test]
    fn test_analyze_cohort_partitions() {
        let result = analyze_cohort(&sample_cohort(), &ScoringConfig::default()).unwrap();
        let wl = &result.winner_loser_analysis;

        assert_eq!(wl.winners.len(), 2);
        assert_eq!(wl.losers.len(), 1);
        assert!(wl
            .winners
            .iter()
            .all(|w| w.classification == Classification::Winner));
        assert!(wl
            .losers
            .iter()
            .all(|l| l.classification == Classification::Loser));

        // Overall average counts the zero-log user in the denominator
        let expected: f64 = (10875.0 + 7650.0 + 2850.0 + 0.0) / 4.0;
        assert_eq!(wl.overall_weekly_average_steps, expected.round() as i64);
    }

    #[test]
    fn test_analyze_cohort_empty_errors() {
        let result = analyze_cohort(&[], &ScoringConfig::default());
        assert!(matches!(result, Err(AnalysisError::EmptyCohort)));
    }

    #[test]
    fn test_analyze_cohort_idempotent() {
        let users = sample_cohort();
        let config = ScoringConfig::default();
        let first = analyze_cohort(&users, &config).unwrap();
        let second = analyze_cohort(&users, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tied_scores_keep_input_order() {
        let users = vec![
            make_user("first", &[8000.0, 8000.0]),
            make_user("second", &[8000.0, 8000.0]),
        ];
        let result = analyze_cohort(&users, &ScoringConfig::default()).unwrap();
        assert_eq!(result.analyses[0].user_id, "first");
        assert_eq!(result.analyses[1].user_id, "second");
        assert_eq!(result.analyses[0].rank, 1);
        assert_eq!(result.analyses[1].rank, 2);
    }

    #[test]
    fn test_engine_analyze_json_round_trip() {
        let engine = AnalysisEngine::new();
        let users_json = serde_json::to_string(&sample_cohort()).unwrap();

        let report_json = engine.analyze_json(&users_json).unwrap();
        let report: serde_json::Value = serde_json::from_str(&report_json).unwrap();

        assert_eq!(report["producer"]["name"], "stride-rank");
        assert_eq!(report["userCount"], 4);
        assert_eq!(report["analyses"].as_array().unwrap().len(), 3);
        assert!(report["winnerLoserAnalysis"]["overallWeeklyAverageSteps"].is_i64());
        assert_eq!(report["analyses"][0]["rank"], 1);
    }

    #[test]
    fn test_engine_custom_threshold_changes_classification() {
        let users = vec![make_user("u1", &[6000.0, 6200.0])];

        let strict = AnalysisEngine::new();
        let report = strict.analyze(&users).unwrap();
        assert_eq!(
            report.result.analyses[0].classification,
            Classification::Loser
        );

        let lenient = AnalysisEngine::with_config(ScoringConfig::with_threshold(5000.0));
        let report = lenient.analyze(&users).unwrap();
        assert_eq!(
            report.result.analyses[0].classification,
            Classification::Winner
        );
    }

    #[test]
    fn test_engine_invalid_json_errors() {
        let engine = AnalysisEngine::new();
        assert!(matches!(
            engine.analyze_json("not valid json"),
            Err(AnalysisError::JsonError(_))
        ));
    }
}
