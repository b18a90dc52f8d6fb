//! Scoring configuration
//!
//! Every constant that tunes the scoring curve lives here and is passed
//! explicitly to the scorers, the classifier, and the insight generator.
//! Nothing reads a process-wide singleton, so tests can exercise multiple
//! thresholds side by side.

use serde::{Deserialize, Serialize};

/// Default weekly-average step goal; doubles as the winner/loser threshold
pub const DEFAULT_STEP_GOAL_THRESHOLD: f64 = 7500.0;

/// Default reference calorie burn per step for efficiency scoring
pub const DEFAULT_CALORIES_PER_STEP: f64 = 0.04;

/// Weights of the unified activity score composition.
///
/// These have changed once already (an older 70/30 reward/points split was
/// replaced by this 40/30/20/10 composition), so they stay named
/// configuration rather than inline literals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub steps: f64,
    pub efficiency: f64,
    pub balance: f64,
    pub consistency: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            steps: 0.4,
            efficiency: 0.3,
            balance: 0.2,
            consistency: 0.1,
        }
    }
}

/// Calibration of the weekly consistency bonus.
///
/// A standard deviation of `stddev_scale` daily steps costs the full
/// `spread` points off 100; the result never drops below `floor`. An empty
/// week gets the `neutral` score instead, outside the clamp on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyParams {
    pub stddev_scale: f64,
    pub spread: f64,
    pub floor: f64,
    pub neutral: f64,
}

impl Default for ConsistencyParams {
    fn default() -> Self {
        Self {
            stddev_scale: 2000.0,
            spread: 60.0,
            floor: 40.0,
            neutral: 50.0,
        }
    }
}

/// Complete scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weekly-average step goal; single source of truth for classification,
    /// steps-score normalization, and step insights
    pub step_goal_threshold: f64,
    /// Reference calorie burn per step (efficiency ratio denominator)
    pub reference_calories_per_step: f64,
    pub weights: ScoreWeights,
    pub consistency: ConsistencyParams,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            step_goal_threshold: DEFAULT_STEP_GOAL_THRESHOLD,
            reference_calories_per_step: DEFAULT_CALORIES_PER_STEP,
            weights: ScoreWeights::default(),
            consistency: ConsistencyParams::default(),
        }
    }
}

impl ScoringConfig {
    /// Config with a custom step goal threshold, other values default
    pub fn with_threshold(step_goal_threshold: f64) -> Self {
        Self {
            step_goal_threshold,
            ..Self::default()
        }
    }
}
