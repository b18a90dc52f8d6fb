//! Core types for the stride-rank engine
//!
//! This module defines the data structures that flow through the analysis:
//! raw per-day activity logs, per-user weekly data, per-user performance
//! summaries, and the cohort-level winner/loser result.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single named metric for one day (e.g. `steps`, `active_calories`).
///
/// The `score` and `state` fields are provided by the upstream scoring API
/// and are informational only; the engine derives its own scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFactor {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub goal: f64,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub unit: String,
}

/// One day's activity record for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    /// Log identifier (not a user identifier)
    #[serde(default)]
    pub id: String,
    /// Upstream overall score for the day
    #[serde(default)]
    pub score: f64,
    /// Upstream state bucket (`minimal`/`low`/`medium`/`high`)
    #[serde(default)]
    pub state: String,
    /// Named metrics for the day; names unique, last write wins on duplicates
    pub factors: Vec<ActivityFactor>,
    #[serde(default)]
    pub data_sources: Vec<String>,
    /// When the day was scored
    pub score_date_time: DateTime<Utc>,
    #[serde(default)]
    pub created_at_utc: Option<DateTime<Utc>>,
    #[serde(default)]
    pub version: u32,
}

/// A user's full week of activity data, as delivered by the fetch collaborator.
///
/// `weekly_average_steps` is the mean of each log's `steps` factor value,
/// rounded to the nearest integer, and 0 when there are no logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivityData {
    pub user_id: String,
    pub logs: Vec<ActivityLog>,
    #[serde(default)]
    pub weekly_average_steps: f64,
}

/// Reward category assigned from weekly average steps alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Winner,
    Loser,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Winner => "winner",
            Classification::Loser => "loser",
        }
    }
}

/// Weekly performance summary for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalysis {
    pub user_id: String,
    /// Week start: the Monday (UTC) on or before the first log's date
    pub date: NaiveDate,
    /// Composite weekly score, weighted across steps/efficiency/balance/consistency
    pub activity_score: f64,
    /// Average daily steps across the week
    pub steps_value: f64,
    /// Average daily steps as a percentage of the step goal threshold
    pub steps_goal_percentage: f64,
    pub efficiency_score: f64,
    pub balance_score: f64,
    pub consistency_bonus: f64,
    /// 1-based position after global sorting; 0 until ranks are assigned
    pub rank: u32,
    pub classification: Classification,
    pub insights: Vec<String>,
}

/// Aggregate statistics over the winner partition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerStats {
    pub avg_steps: i64,
    pub avg_activity_score: f64,
    /// The three most frequent insight prefixes across all winners
    pub top_insights: Vec<String>,
}

/// Aggregate statistics over the loser partition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoserStats {
    pub avg_steps: i64,
    pub avg_activity_score: f64,
    /// Issues covering more than 60% of the partition
    pub common_issues: Vec<String>,
}

/// Cohort-level result: the winner/loser partitions and their statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerLoserAnalysis {
    pub winners: Vec<PerformanceAnalysis>,
    pub losers: Vec<PerformanceAnalysis>,
    /// Mean of all users' weekly average steps (zero-log users included)
    pub overall_weekly_average_steps: i64,
    pub winner_stats: WinnerStats,
    pub loser_stats: LoserStats,
}

/// Complete output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortAnalysis {
    /// All per-user summaries, sorted by descending activity score, ranks assigned
    pub analyses: Vec<PerformanceAnalysis>,
    pub winner_loser_analysis: WinnerLoserAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Classification::Winner).unwrap(),
            "\"winner\""
        );
        let parsed: Classification = serde_json::from_str("\"loser\"").unwrap();
        assert_eq!(parsed, Classification::Loser);
    }

    #[test]
    fn test_activity_log_wire_field_names() {
        let json = r#"{
            "id": "log-1",
            "score": 72.5,
            "factors": [
                {"name": "steps", "value": 8200.0, "goal": 10000.0, "unit": "count"}
            ],
            "scoreDateTime": "2024-01-17T08:00:00Z"
        }"#;

        let log: ActivityLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.id, "log-1");
        assert_eq!(log.factors.len(), 1);
        assert_eq!(log.factors[0].name, "steps");
        assert_eq!(log.factors[0].value, 8200.0);

        let out = serde_json::to_value(&log).unwrap();
        assert!(out.get("scoreDateTime").is_some());
        assert!(out.get("dataSources").is_some());
    }

    #[test]
    fn test_user_activity_data_defaults() {
        let json = r#"{"userId": "u1", "logs": []}"#;
        let user: UserActivityData = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_id, "u1");
        assert!(user.logs.is_empty());
        assert_eq!(user.weekly_average_steps, 0.0);
    }

    #[test]
    fn test_performance_analysis_wire_shape() {
        let analysis = PerformanceAnalysis {
            user_id: "u1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            activity_score: 79.0,
            steps_value: 7500.0,
            steps_goal_percentage: 100.0,
            efficiency_score: 50.0,
            balance_score: 70.0,
            consistency_bonus: 100.0,
            rank: 1,
            classification: Classification::Winner,
            insights: vec![],
        };

        let out = serde_json::to_value(&analysis).unwrap();
        assert_eq!(out["userId"], "u1");
        assert_eq!(out["date"], "2024-01-15");
        assert_eq!(out["activityScore"], 79.0);
        assert_eq!(out["stepsGoalPercentage"], 100.0);
        assert_eq!(out["consistencyBonus"], 100.0);
        assert_eq!(out["classification"], "winner");
    }
}
