use std::collections::HashSet;

use crate::dataset::ShelfLifeRules;
use crate::error::{Result, ShelfLifeError};
use crate::estimator::constants::{MAX_SHELF_LIFE_HOURS, perishability_for_hours, round_bound};
use crate::models::{Assessment, Estimate, normalize_key};

/// Estimate the shelf life of `food` stored under `condition`.
///
/// Selected modifiers are applied in dataset order, whatever order the caller
/// lists them in; repeated selections count once. Modifiers that do not apply
/// to the condition are skipped. Unknown modifier names are rejected.
///
/// Bounds are clamped at zero after each modifier, the upper bound is capped
/// at [`MAX_SHELF_LIFE_HOURS`], and both are rounded once at the end.
pub fn estimate<S: AsRef<str>>(
    rules: &ShelfLifeRules,
    food: &str,
    condition: &str,
    modifiers: &[S],
) -> Result<Estimate> {
    let record = rules
        .food(food)
        .ok_or_else(|| ShelfLifeError::FoodNotFound(food.trim().to_string()))?;

    let condition = normalize_key(condition);
    let base = record
        .condition(&condition)
        .ok_or_else(|| ShelfLifeError::UnsupportedCondition {
            food: record.name.clone(),
            condition: condition.clone(),
            supported: record.condition_names(),
        })?;

    let selected = selected_modifier_keys(rules, modifiers)?;

    let unit = base.unit;
    let mut min = base.min;
    let mut max = base.max;
    let mut flags = base.flags.clone();
    let mut applied_modifiers = Vec::new();

    for modifier in rules.modifiers() {
        if !selected.contains(&modifier.key()) || !modifier.applies_to_condition(&condition) {
            continue;
        }

        min = modifier.adjustment.apply(min, unit);
        max = modifier.adjustment.apply(max, unit);

        if let Some(text) = &modifier.flag_text {
            flags.push(text.clone());
        }
        applied_modifiers.push(modifier.name.clone());
    }

    let cap = MAX_SHELF_LIFE_HOURS / unit.hours();
    max = max.min(cap);
    min = min.min(max);

    let min = round_bound(min);
    let max = round_bound(max);

    Ok(Estimate {
        food: record.name.clone(),
        condition,
        min,
        max,
        unit,
        flags: dedup_in_order(flags),
        applied_modifiers,
        perishability: perishability_for_hours(max * unit.hours()),
    })
}

/// Like [`estimate`], but any observed sensory issue turns the result into a
/// discard verdict.
///
/// The food, condition and modifiers are validated even when an issue was
/// observed, so a bad query is reported the same way either way.
pub fn assess<S: AsRef<str>, T: AsRef<str>>(
    rules: &ShelfLifeRules,
    food: &str,
    condition: &str,
    modifiers: &[S],
    observed: &[T],
) -> Result<Assessment> {
    let estimate = estimate(rules, food, condition, modifiers)?;

    let mut issues = Vec::new();
    for name in observed {
        let check = rules
            .sensory_check(name.as_ref())
            .ok_or_else(|| ShelfLifeError::UnknownSensoryCheck(name.as_ref().to_string()))?;
        issues.push(check.label.clone());
    }

    if issues.is_empty() {
        Ok(Assessment::Estimate(estimate))
    } else {
        Ok(Assessment::Discard {
            issues: dedup_in_order(issues),
        })
    }
}

fn selected_modifier_keys<S: AsRef<str>>(
    rules: &ShelfLifeRules,
    modifiers: &[S],
) -> Result<HashSet<String>> {
    modifiers
        .iter()
        .map(|name| {
            rules
                .modifier(name.as_ref())
                .map(|m| m.key())
                .ok_or_else(|| ShelfLifeError::UnknownModifier(name.as_ref().to_string()))
        })
        .collect()
}

fn dedup_in_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Perishability, Unit};

    const NONE: &[&str] = &[];

    fn rules() -> ShelfLifeRules {
        ShelfLifeRules::from_json(
            r#"{
            "foods": [
                {"name": "Milk", "conditions": {
                    "refrigerated": {"min": 5, "max": 7, "unit": "days", "flags": ["Check for sour odor"]}
                }},
                {"name": "Cooked Rice", "conditions": {
                    "room_temperature": {"min": 2, "max": 4, "unit": "hours"},
                    "refrigerated": {"min": 3, "max": 5, "unit": "days"}
                }},
                {"name": "Honey", "conditions": {
                    "room_temperature": {"min": 1, "max": 3, "unit": "years"}
                }}
            ],
            "modifiers": [
                {"name": "halve", "adjustment": {"type": "multiply", "factor": 0.5}},
                {"name": "plus_day", "adjustment": {"type": "add", "amount": 1, "unit": "days"},
                 "flagText": "Extended by a day"},
                {"name": "warm_kitchen", "appliesTo": ["room_temperature"],
                 "adjustment": {"type": "add", "amount": -3, "unit": "hours"}},
                {"name": "thawed", "appliesTo": ["refrigerated"], "adjustment": {"type": "flag"},
                 "flagText": "Check for sour odor"}
            ],
            "sensoryChecks": [
                {"name": "mold", "label": "Visible mold"},
                {"name": "slimy", "label": "Slimy texture"}
            ]
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_base_estimate() {
        let est = estimate(&rules(), "milk", "Refrigerated", NONE).unwrap();
        assert_eq!(est.food, "Milk");
        assert_eq!(est.condition, "refrigerated");
        assert_eq!((est.min, est.max, est.unit), (5.0, 7.0, Unit::Days));
        assert_eq!(est.flags, vec!["Check for sour odor"]);
        assert!(est.applied_modifiers.is_empty());
        assert_eq!(est.perishability, Perishability::Low);
    }

    #[test]
    fn test_modifiers_apply_in_dataset_order() {
        // halve then add: (5 * 0.5 + 1, 7 * 0.5 + 1)
        let est = estimate(&rules(), "Milk", "refrigerated", &["plus_day", "halve"]).unwrap();
        assert_eq!((est.min, est.max), (3.5, 4.5));
        assert_eq!(est.applied_modifiers, vec!["halve", "plus_day"]);
    }

    #[test]
    fn test_duplicate_selection_counts_once() {
        let est = estimate(&rules(), "Milk", "refrigerated", &["halve", "HALVE"]).unwrap();
        assert_eq!((est.min, est.max), (2.5, 3.5));
    }

    #[test]
    fn test_non_applicable_modifier_skipped() {
        let est = estimate(&rules(), "Milk", "refrigerated", &["warm_kitchen"]).unwrap();
        assert_eq!((est.min, est.max), (5.0, 7.0));
        assert!(est.applied_modifiers.is_empty());
    }

    #[test]
    fn test_additive_clamps_at_zero() {
        let est = estimate(&rules(), "Cooked Rice", "room_temperature", &["warm_kitchen"]).unwrap();
        assert_eq!((est.min, est.max), (0.0, 1.0));
        assert_eq!(est.perishability, Perishability::High);
    }

    #[test]
    fn test_additive_converts_to_record_unit() {
        let est = estimate(&rules(), "Cooked Rice", "room_temperature", &["plus_day"]).unwrap();
        assert_eq!((est.min, est.max), (26.0, 28.0));
        assert_eq!(est.unit, Unit::Hours);
        assert_eq!(est.perishability, Perishability::Moderate);
    }

    #[test]
    fn test_upper_bound_capped_at_one_year() {
        let est = estimate(&rules(), "Honey", "room_temperature", NONE).unwrap();
        assert_eq!((est.min, est.max), (1.0, 1.0));
    }

    #[test]
    fn test_flags_deduplicated() {
        let est = estimate(&rules(), "Milk", "refrigerated", &["thawed", "plus_day"]).unwrap();
        assert_eq!(est.flags, vec!["Check for sour odor", "Extended by a day"]);
        assert_eq!(est.applied_modifiers, vec!["plus_day", "thawed"]);
    }

    #[test]
    fn test_unknown_modifier_rejected() {
        let err = estimate(&rules(), "Milk", "refrigerated", &["microwaved"]).unwrap_err();
        assert!(matches!(err, ShelfLifeError::UnknownModifier(name) if name == "microwaved"));
    }

    #[test]
    fn test_unsupported_condition_lists_supported() {
        let err = estimate(&rules(), "Cooked Rice", "frozen", NONE).unwrap_err();
        match err {
            ShelfLifeError::UnsupportedCondition {
                food,
                condition,
                supported,
            } => {
                assert_eq!(food, "Cooked Rice");
                assert_eq!(condition, "frozen");
                assert_eq!(supported, vec!["refrigerated", "room_temperature"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_assess_without_issues() {
        let result = assess(&rules(), "Milk", "refrigerated", NONE, NONE).unwrap();
        assert!(matches!(result, Assessment::Estimate(est) if est.max == 7.0));
    }

    #[test]
    fn test_assess_with_issues_discards() {
        let result = assess(&rules(), "Milk", "refrigerated", NONE, &["slimy", "mold", "slimy"]).unwrap();
        assert_eq!(
            result,
            Assessment::Discard {
                issues: vec!["Slimy texture".to_string(), "Visible mold".to_string()]
            }
        );
    }

    #[test]
    fn test_assess_validates_query_first() {
        let err = assess(&rules(), "Durian", "refrigerated", NONE, &["mold"]).unwrap_err();
        assert!(matches!(err, ShelfLifeError::FoodNotFound(_)));

        let err = assess(&rules(), "Milk", "refrigerated", NONE, &["fizzy"]).unwrap_err();
        assert!(matches!(err, ShelfLifeError::UnknownSensoryCheck(_)));
    }
}
