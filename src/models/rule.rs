use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Time unit of a shelf-life range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[serde(alias = "hour")]
    Hours,
    #[serde(alias = "day")]
    Days,
    #[serde(alias = "week")]
    Weeks,
    #[serde(alias = "month")]
    Months,
    #[serde(alias = "year")]
    Years,
}

impl Unit {
    /// Number of hours in one of this unit. A month is a twelfth of a year.
    pub fn hours(&self) -> f64 {
        match self {
            Unit::Hours => 1.0,
            Unit::Days => 24.0,
            Unit::Weeks => 168.0,
            Unit::Months => 730.0,
            Unit::Years => 8760.0,
        }
    }

    /// Convert `value` expressed in `self` into `target` units.
    #[inline]
    pub fn convert(&self, value: f64, target: Unit) -> f64 {
        value * self.hours() / target.hours()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Hours => "hours",
            Unit::Days => "days",
            Unit::Weeks => "weeks",
            Unit::Months => "months",
            Unit::Years => "years",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base shelf-life range for one storage condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionEstimate {
    pub min: f64,
    pub max: f64,
    pub unit: Unit,

    /// Sensory caveats shown whenever this condition is queried.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
}

impl ConditionEstimate {
    /// Bounds are finite, non-negative and ordered.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max
    }
}

/// A food item and its base estimates keyed by storage condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodRule {
    pub name: String,
    pub conditions: BTreeMap<String, ConditionEstimate>,
}

impl FoodRule {
    /// Canonical key for lookups (trimmed, lowercase name).
    pub fn key(&self) -> String {
        normalize_key(&self.name)
    }

    pub fn condition(&self, condition: &str) -> Option<&ConditionEstimate> {
        self.conditions.get(&normalize_key(condition))
    }

    /// Supported condition names, sorted.
    pub fn condition_names(&self) -> Vec<String> {
        self.conditions.keys().cloned().collect()
    }
}

impl PartialEq for FoodRule {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for FoodRule {}

/// Lookup key used for foods, conditions, modifiers and sensory checks.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}
