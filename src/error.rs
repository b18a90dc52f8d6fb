//! Error types for stride-rank

use thiserror::Error;

/// Errors that can occur during analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Cohort-wide averages are undefined over zero users
    #[error("Empty cohort: no users to analyze")]
    EmptyCohort,

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
