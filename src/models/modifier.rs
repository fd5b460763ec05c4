use std::fmt;

use serde::{Deserialize, Serialize};

use super::rule::{Unit, normalize_key};

/// How a modifier changes a base range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Adjustment {
    /// Scale both bounds by `factor`.
    Multiply { factor: f64 },

    /// Shift both bounds by `amount`, expressed in `unit` (defaults to the
    /// unit of the base range).
    Add {
        amount: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<Unit>,
    },

    /// No numeric change; only surfaces the modifier's flag text.
    Flag,
}

impl Adjustment {
    /// Apply to a single bound expressed in `unit`. Never returns a negative value.
    pub fn apply(&self, value: f64, unit: Unit) -> f64 {
        let adjusted = match self {
            Adjustment::Multiply { factor } => value * factor,
            Adjustment::Add {
                amount,
                unit: amount_unit,
            } => value + amount_unit.map_or(*amount, |u| u.convert(*amount, unit)),
            Adjustment::Flag => value,
        };
        adjusted.max(0.0)
    }

    /// Reason the adjustment is unusable, if any.
    pub fn validate(&self) -> Option<String> {
        match self {
            Adjustment::Multiply { factor } if !factor.is_finite() || *factor <= 0.0 => {
                Some(format!("factor must be a positive number, got {}", factor))
            }
            Adjustment::Add { amount, .. } if !amount.is_finite() => {
                Some(format!("amount must be finite, got {}", amount))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjustment::Multiply { factor } => write!(f, "x{}", factor),
            Adjustment::Add { amount, unit } => {
                let sign = if *amount >= 0.0 { "+" } else { "" };
                match unit {
                    Some(unit) => write!(f, "{}{} {}", sign, amount, unit),
                    None => write!(f, "{}{}", sign, amount),
                }
            }
            Adjustment::Flag => f.write_str("flag only"),
        }
    }
}

/// A global adjustment that can be selected for any food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Storage conditions this modifier affects; empty means all of them.
    #[serde(default)]
    pub applies_to: Vec<String>,

    pub adjustment: Adjustment,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_text: Option<String>,
}

impl Modifier {
    pub fn key(&self) -> String {
        normalize_key(&self.name)
    }

    /// Human-readable label, e.g. `vacuum_sealed` -> `Vacuum Sealed`.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => title_case(&self.name),
        }
    }

    pub fn applies_to_condition(&self, condition: &str) -> bool {
        let condition = normalize_key(condition);
        self.applies_to.is_empty() || self.applies_to.iter().any(|c| normalize_key(c) == condition)
    }
}

/// Something the user may notice about the food that means it should be discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensoryCheck {
    pub name: String,
    pub label: String,
}

impl SensoryCheck {
    pub fn key(&self) -> String {
        normalize_key(&self.name)
    }
}

/// Free-form text shipped with the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notes {
    #[serde(default)]
    pub disclaimer: Option<String>,
}

fn title_case(name: &str) -> String {
    name.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
