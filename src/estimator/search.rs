use strsim::jaro_winkler;

use crate::dataset::ShelfLifeRules;
use crate::estimator::constants::{FUZZY_MATCH_THRESHOLD, MAX_SUGGESTIONS};
use crate::models::{FoodRule, normalize_key};

/// Result of looking up a free-text food query.
#[derive(Debug, PartialEq)]
pub enum FoodMatch<'a> {
    Exact(&'a FoodRule),
    /// Close matches, best first.
    Candidates(Vec<&'a FoodRule>),
    None,
}

/// Find a food by exact name, falling back to substring and fuzzy matches.
pub fn search_foods<'a>(rules: &'a ShelfLifeRules, query: &str) -> FoodMatch<'a> {
    let query = normalize_key(query);
    if query.is_empty() {
        return FoodMatch::None;
    }

    if let Some(food) = rules.food(&query) {
        return FoodMatch::Exact(food);
    }

    let mut candidates: Vec<(&FoodRule, f64)> = rules
        .foods()
        .map(|f| (f, score(&f.key(), &query)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    if candidates.is_empty() {
        return FoodMatch::None;
    }

    FoodMatch::Candidates(
        candidates
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(f, _)| f)
            .collect(),
    )
}

/// Similarity in [0, 1]. Substring hits always clear the fuzzy threshold.
fn score(name: &str, query: &str) -> f64 {
    let fuzzy = jaro_winkler(name, query);
    if name.contains(query) {
        fuzzy.max(FUZZY_MATCH_THRESHOLD + (1.0 - FUZZY_MATCH_THRESHOLD) / 2.0)
    } else {
        fuzzy
    }
}
