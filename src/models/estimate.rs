use std::fmt;

use serde::Serialize;

use super::rule::Unit;

/// Coarse risk bucket derived from the upper bound of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Perishability {
    High,
    Moderate,
    Low,
}

impl fmt::Display for Perishability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Perishability::High => "High perishability",
            Perishability::Moderate => "Moderate perishability",
            Perishability::Low => "Low perishability",
        };
        f.write_str(s)
    }
}

/// Adjusted shelf-life range for one food under one storage condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    /// Canonical food name as written in the dataset.
    pub food: String,
    pub condition: String,
    pub min: f64,
    pub max: f64,
    pub unit: Unit,
    pub flags: Vec<String>,
    /// Modifiers that actually changed or flagged the estimate, in application order.
    pub applied_modifiers: Vec<String>,
    pub perishability: Perishability,
}

impl Estimate {
    #[inline]
    pub fn min_hours(&self) -> f64 {
        self.min * self.unit.hours()
    }

    #[inline]
    pub fn max_hours(&self) -> f64 {
        self.max * self.unit.hours()
    }
}

/// Outcome of a query that also takes observed sensory issues into account.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum Assessment {
    /// Nothing suspicious was observed.
    Estimate(Estimate),
    /// At least one sensory issue was observed; the food should not be eaten.
    Discard { issues: Vec<String> },
}
