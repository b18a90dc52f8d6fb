//! Report encoding
//!
//! Wraps an analysis result in a versioned envelope with producer metadata,
//! ready for JSON transport to the persistence/payout collaborator.

use crate::error::AnalysisError;
use crate::types::CohortAnalysis;
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Metadata identifying the engine instance that produced a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Versioned analysis report.
///
/// The analysis result is flattened into the envelope, so `analyses` and
/// `winnerLoserAnalysis` appear at the top level of the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    /// Number of users submitted, including zero-log users that produced
    /// no analysis entry
    pub user_count: usize,
    #[serde(flatten)]
    pub result: CohortAnalysis,
}

/// Report encoder carrying a stable per-process instance id
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create an encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Wrap an analysis result in the report envelope
    pub fn encode(&self, result: CohortAnalysis, user_count: usize) -> AnalysisReport {
        AnalysisReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            user_count,
            result,
        }
    }

    /// Serialize a report to pretty JSON
    pub fn encode_to_json(&self, report: &AnalysisReport) -> Result<String, AnalysisError> {
        serde_json::to_string_pretty(report).map_err(AnalysisError::JsonError)
    }
}
