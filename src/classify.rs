//! Winner/loser classification
//!
//! A user's reward category is a pure function of their weekly average
//! steps against the step goal threshold. It is never recomputed from the
//! activity score.

use crate::config::ScoringConfig;
use crate::error::AnalysisError;
use crate::types::{Classification, UserActivityData};

/// Cohort partition with the overall weekly average.
#[derive(Debug)]
pub struct CohortSplit<'a> {
    pub winners: Vec<&'a UserActivityData>,
    pub losers: Vec<&'a UserActivityData>,
    /// Mean of all users' weekly average steps, rounded to the nearest
    /// integer; zero-log users contribute 0 to the numerator
    pub overall_weekly_average: i64,
}

/// Classify one user from their weekly average steps.
pub fn classify_user(weekly_average_steps: f64, config: &ScoringConfig) -> Classification {
    if weekly_average_steps >= config.step_goal_threshold {
        Classification::Winner
    } else {
        Classification::Loser
    }
}

/// Partition a batch of users and compute the cohort average.
///
/// Errors with [`AnalysisError::EmptyCohort`] on an empty batch rather than
/// dividing by zero.
pub fn classify_users<'a>(
    users: &'a [UserActivityData],
    config: &ScoringConfig,
) -> Result<CohortSplit<'a>, AnalysisError> {
    if users.is_empty() {
        return Err(AnalysisError::EmptyCohort);
    }

    let mut winners = Vec::new();
    let mut losers = Vec::new();
    for user in users {
        match classify_user(user.weekly_average_steps, config) {
            Classification::Winner => winners.push(user),
            Classification::Loser => losers.push(user),
        }
    }

    let total: f64 = users.iter().map(|u| u.weekly_average_steps).sum();
    let overall_weekly_average = (total / users.len() as f64).round() as i64;

    Ok(CohortSplit {
        winners,
        losers,
        overall_weekly_average,
    })
}
