//! stride-rank - Scoring and classification engine for weekly step-challenge
//! reward rankings
//!
//! stride-rank turns per-user daily activity logs into ranked weekly
//! performance summaries through a deterministic pipeline: factor extraction
//! → component scoring + consistency scoring → activity score composition →
//! weekly aggregation → winner/loser classification and cohort statistics.
//!
//! The engine is pure and synchronous: it operates on already-fetched
//! in-memory data and never suspends, blocks, or retries. Fetching, storage,
//! and reward payout belong to external collaborators.

pub mod analysis;
pub mod classify;
pub mod config;
pub mod consistency;
pub mod error;
pub mod factors;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod types;

pub use config::ScoringConfig;
pub use error::AnalysisError;
pub use pipeline::{analyze_cohort, AnalysisEngine};
pub use report::{AnalysisReport, ReportEncoder, REPORT_VERSION};
pub use types::{
    ActivityFactor, ActivityLog, Classification, CohortAnalysis, PerformanceAnalysis,
    UserActivityData, WinnerLoserAnalysis,
};

/// Engine version embedded in all report payloads
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "stride-rank";
