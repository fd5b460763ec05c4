use crate::models::Perishability;

/// Upper bounds are never reported beyond one year.
pub const MAX_SHELF_LIFE_HOURS: f64 = 24.0 * 365.0;

/// Decimal places kept in reported bounds (rounded half away from zero).
pub const ROUNDING_DECIMALS: i32 = 2;

/// Upper bound (hours) at or below which a food is highly perishable.
pub const HIGH_PERISHABILITY_HOURS: f64 = 6.0;

/// Upper bound (hours) at or below which a food is moderately perishable.
pub const MODERATE_PERISHABILITY_HOURS: f64 = 72.0;

// ─────────────────────────────────────────────────────────────────────────────
// Food search
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum Jaro-Winkler similarity for a fuzzy food match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Maximum number of suggestions offered for an inexact query.
pub const MAX_SUGGESTIONS: usize = 5;

/// Advice printed after every estimate.
pub const GENERAL_RECOMMENDATIONS: &[&str] = &[
    "When unsure, prefer to discard high-risk foods such as meat, fish, eggs and dairy.",
    "Avoid reheating the same food multiple times.",
    "Keep hot foods hot and cold foods cold. Do not leave cooked foods at room temperature for many hours.",
    "Store foods in clean, airtight containers whenever possible.",
    "Label leftovers with date and aim to consume them within a few days.",
];

/// Perishability bucket for an upper bound expressed in hours.
pub fn perishability_for_hours(max_hours: f64) -> Perishability {
    if max_hours <= HIGH_PERISHABILITY_HOURS {
        Perishability::High
    } else if max_hours <= MODERATE_PERISHABILITY_HOURS {
        Perishability::Moderate
    } else {
        Perishability::Low
    }
}

/// Round to [`ROUNDING_DECIMALS`] places, half away from zero.
pub fn round_bound(value: f64) -> f64 {
    let factor = 10_f64.powi(ROUNDING_DECIMALS);
    (value * factor).round() / factor
}
