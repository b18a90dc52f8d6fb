//! Factor extraction
//!
//! Turns the ordered factor list of an [`ActivityLog`] into a keyed lookup
//! by factor name. Unrecognized names are retained untouched; scorers that
//! don't reference them simply ignore them.

use crate::types::{ActivityFactor, ActivityLog};
use std::collections::HashMap;

/// Factor name: daily step count
pub const STEPS: &str = "steps";
/// Factor name: active calories burned
pub const ACTIVE_CALORIES: &str = "active_calories";
/// Factor name: hours with registered activity
pub const ACTIVE_HOURS: &str = "active_hours";
/// Factor name: minutes of extended inactivity
pub const EXTENDED_INACTIVITY: &str = "extended_inactivity";
/// Factor name: minutes of intense activity
pub const INTENSE_ACTIVITY_DURATION: &str = "intense_activity_duration";

/// Keyed view over one day's factors
pub type FactorMap = HashMap<String, ActivityFactor>;

/// Build a factor map from a log. Later duplicates of a name overwrite
/// earlier ones.
pub fn extract_factors(log: &ActivityLog) -> FactorMap {
    let mut map = FactorMap::with_capacity(log.factors.len());
    for factor in &log.factors {
        map.insert(factor.name.clone(), factor.clone());
    }
    map
}

/// Value of a named factor, 0 when absent
pub fn factor_value(factors: &FactorMap, name: &str) -> f64 {
    factors.get(name).map_or(0.0, |f| f.value)
}

/// Goal of a named factor; `default` when the factor is absent or its goal
/// is unset (0)
pub fn factor_goal(factors: &FactorMap, name: &str, default: f64) -> f64 {
    factors
        .get(name)
        .map(|f| f.goal)
        .filter(|goal| *goal != 0.0)
        .unwrap_or(default)
}
