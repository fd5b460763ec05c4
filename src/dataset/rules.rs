use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use crate::error::DatasetError;
use crate::models::{ConditionEstimate, FoodRule, Modifier, Notes, SensoryCheck, normalize_key};

/// On-disk shape of the rules dataset.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RulesFile {
    #[serde(default)]
    notes: Notes,
    foods: Vec<RawFood>,
    #[serde(default)]
    modifiers: Vec<Modifier>,
    #[serde(default)]
    sensory_checks: Vec<SensoryCheck>,
}

/// A food as written in the file. Conditions keep every entry, repeats
/// included, so they can be rejected during validation.
#[derive(Debug, Deserialize)]
struct RawFood {
    name: String,
    #[serde(deserialize_with = "condition_entries")]
    conditions: Vec<(String, ConditionEstimate)>,
}

impl From<FoodRule> for RawFood {
    fn from(food: FoodRule) -> Self {
        Self {
            name: food.name,
            conditions: food.conditions.into_iter().collect(),
        }
    }
}

fn condition_entries<'de, D>(deserializer: D) -> Result<Vec<(String, ConditionEstimate)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, ConditionEstimate)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of storage condition to shelf-life range")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

/// The validated, read-only rules dataset.
///
/// Built once at startup and shared by reference for every query.
#[derive(Debug, Clone)]
pub struct ShelfLifeRules {
    /// All foods keyed by normalized name.
    foods: BTreeMap<String, FoodRule>,
    /// Modifiers in dataset order, which is also the order they are applied in.
    modifiers: Vec<Modifier>,
    sensory_checks: Vec<SensoryCheck>,
    notes: Notes,
}

impl ShelfLifeRules {
    /// Parse and validate a dataset from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, DatasetError> {
        let file: RulesFile = serde_json::from_str(text)?;
        Self::build(file.foods, file.modifiers, file.sensory_checks, file.notes)
    }

    /// Validate records and build the lookup tables.
    ///
    /// Condition names are normalized to trimmed lowercase. Duplicate foods,
    /// modifiers or sensory checks are rejected rather than merged.
    pub fn new(
        foods: Vec<FoodRule>,
        modifiers: Vec<Modifier>,
        sensory_checks: Vec<SensoryCheck>,
        notes: Notes,
    ) -> Result<Self, DatasetError> {
        let foods = foods.into_iter().map(RawFood::from).collect();
        Self::build(foods, modifiers, sensory_checks, notes)
    }

    fn build(
        foods: Vec<RawFood>,
        modifiers: Vec<Modifier>,
        sensory_checks: Vec<SensoryCheck>,
        notes: Notes,
    ) -> Result<Self, DatasetError> {
        let mut food_map = BTreeMap::new();
        for food in foods {
            let food = normalize_food(food)?;
            let key = food.key();
            if food_map.contains_key(&key) {
                return Err(DatasetError::DuplicateFood(food.name));
            }
            food_map.insert(key, food);
        }

        let known_conditions: BTreeSet<&str> = food_map
            .values()
            .flat_map(|f| f.conditions.keys().map(String::as_str))
            .collect();

        let mut seen = HashSet::new();
        for modifier in &modifiers {
            if modifier.key().is_empty() {
                return Err(DatasetError::EmptyModifierName);
            }
            if !seen.insert(modifier.key()) {
                return Err(DatasetError::DuplicateModifier(modifier.name.clone()));
            }
            if let Some(reason) = modifier.adjustment.validate() {
                return Err(DatasetError::InvalidAdjustment {
                    modifier: modifier.name.clone(),
                    reason,
                });
            }
            for condition in &modifier.applies_to {
                if !known_conditions.contains(normalize_key(condition).as_str()) {
                    warn!(
                        modifier = %modifier.name,
                        condition = %condition,
                        "modifier applies to a condition no food uses"
                    );
                }
            }
        }

        let mut seen = HashSet::new();
        for check in &sensory_checks {
            if check.key().is_empty() {
                return Err(DatasetError::EmptySensoryCheckName);
            }
            if !seen.insert(check.key()) {
                return Err(DatasetError::DuplicateSensoryCheck(check.name.clone()));
            }
        }

        info!(
            foods = food_map.len(),
            modifiers = modifiers.len(),
            sensory_checks = sensory_checks.len(),
            "loaded rules dataset"
        );

        Ok(Self {
            foods: food_map,
            modifiers,
            sensory_checks,
            notes,
        })
    }

    /// Get a food by name (case-insensitive).
    pub fn food(&self, name: &str) -> Option<&FoodRule> {
        self.foods.get(&normalize_key(name))
    }

    /// All foods, ordered by normalized name.
    pub fn foods(&self) -> impl Iterator<Item = &FoodRule> {
        self.foods.values()
    }

    /// Canonical food names for search and autocomplete, sorted.
    pub fn food_names(&self) -> Vec<&str> {
        self.foods.values().map(|f| f.name.as_str()).collect()
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn modifier(&self, name: &str) -> Option<&Modifier> {
        let key = normalize_key(name);
        self.modifiers.iter().find(|m| m.key() == key)
    }

    pub fn sensory_checks(&self) -> &[SensoryCheck] {
        &self.sensory_checks
    }

    pub fn sensory_check(&self, name: &str) -> Option<&SensoryCheck> {
        let key = normalize_key(name);
        self.sensory_checks.iter().find(|c| c.key() == key)
    }

    /// Every storage condition used by at least one food, sorted.
    pub fn conditions(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .foods
            .values()
            .flat_map(|f| f.conditions.keys().map(String::as_str))
            .collect();
        set.into_iter().collect()
    }

    pub fn disclaimer(&self) -> Option<&str> {
        self.notes.disclaimer.as_deref()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

fn normalize_food(food: RawFood) -> Result<FoodRule, DatasetError> {
    let name = food.name.trim().to_string();
    if name.is_empty() {
        return Err(DatasetError::EmptyFoodName);
    }
    if food.conditions.is_empty() {
        return Err(DatasetError::NoConditions(name));
    }

    let mut conditions = BTreeMap::new();
    for (condition, estimate) in food.conditions {
        let key = normalize_key(&condition);
        if !estimate.is_valid() {
            return Err(DatasetError::InvalidRange {
                food: name,
                condition: key,
                min: estimate.min,
                max: estimate.max,
            });
        }
        if conditions.insert(key.clone(), estimate).is_some() {
            return Err(DatasetError::DuplicateCondition {
                food: name,
                condition: key,
            });
        }
    }

    Ok(FoodRule { name, conditions })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "notes": {"disclaimer": "Estimates only."},
        "foods": [
            {"name": "Milk", "conditions": {"refrigerated": {"min": 5, "max": 7, "unit": "days"}}},
            {"name": "Bread", "conditions": {
                "Room_Temperature": {"min": 3, "max": 5, "unit": "days", "flags": ["Check for mold"]},
                "frozen": {"min": 3, "max": 6, "unit": "months"}
            }}
        ],
        "modifiers": [
            {"name": "opened", "appliesTo": ["refrigerated"], "adjustment": {"type": "multiply", "factor": 0.6}}
        ],
        "sensoryChecks": [{"name": "off_odor", "label": "Sour or off odor"}]
    }"#;

    #[test]
    fn test_from_json() {
        let rules = ShelfLifeRules::from_json(SAMPLE).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.food_names(), vec!["Bread", "Milk"]);
        assert_eq!(rules.modifiers().len(), 1);
        assert_eq!(rules.sensory_checks().len(), 1);
        assert_eq!(rules.disclaimer(), Some("Estimates only."));
    }

    #[test]
    fn test_conditions_are_normalized() {
        let rules = ShelfLifeRules::from_json(SAMPLE).unwrap();
        let bread = rules.food("bread").unwrap();
        assert_eq!(bread.condition_names(), vec!["frozen", "room_temperature"]);
        assert_eq!(
            rules.conditions(),
            vec!["frozen", "refrigerated", "room_temperature"]
        );
    }

    #[test]
    fn test_minimal_dataset() {
        let rules = ShelfLifeRules::from_json(
            r#"{"foods": [{"name": "Milk", "conditions": {"refrigerated": {"min": 5, "max": 7, "unit": "days"}}}]}"#,
        )
        .unwrap();
        assert!(rules.modifiers().is_empty());
        assert!(rules.sensory_checks().is_empty());
        assert_eq!(rules.disclaimer(), None);
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let rules = ShelfLifeRules::from_json(SAMPLE).unwrap();
        assert_eq!(rules.food("  MILK ").unwrap().name, "Milk");
        assert!(rules.modifier("Opened").is_some());
        assert!(rules.sensory_check("OFF_ODOR").is_some());
        assert!(rules.food("Durian").is_none());
    }

    #[test]
    fn test_duplicate_food_rejected() {
        let err = ShelfLifeRules::from_json(
            r#"{"foods": [
                {"name": "Milk", "conditions": {"refrigerated": {"min": 5, "max": 7, "unit": "days"}}},
                {"name": "milk", "conditions": {"frozen": {"min": 1, "max": 3, "unit": "months"}}}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateFood(name) if name == "milk"));
    }

    #[test]
    fn test_duplicate_condition_rejected() {
        let err = ShelfLifeRules::from_json(
            r#"{"foods": [{"name": "Milk", "conditions": {
                "Frozen": {"min": 1, "max": 2, "unit": "months"},
                "frozen": {"min": 1, "max": 3, "unit": "months"}
            }}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateCondition { .. }));
    }

    #[test]
    fn test_repeated_condition_key_rejected() {
        let err = ShelfLifeRules::from_json(
            r#"{"foods": [{"name": "Milk", "conditions": {
                "frozen": {"min": 1, "max": 2, "unit": "months"},
                "frozen": {"min": 1, "max": 3, "unit": "months"}
            }}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DatasetError::DuplicateCondition { food, condition } if food == "Milk" && condition == "frozen"
        ));
    }

    #[test]
    fn test_empty_modifier_and_sensory_names_rejected() {
        let err = ShelfLifeRules::from_json(
            r#"{"foods": [{"name": "Milk", "conditions": {"refrigerated": {"min": 5, "max": 7, "unit": "days"}}}],
                "modifiers": [{"name": " ", "adjustment": {"type": "flag"}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::EmptyModifierName));

        let err = ShelfLifeRules::from_json(
            r#"{"foods": [{"name": "Milk", "conditions": {"refrigerated": {"min": 5, "max": 7, "unit": "days"}}}],
                "sensoryChecks": [{"name": "", "label": "Visible mold"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::EmptySensoryCheckName));
    }

    #[test]
    fn test_food_without_conditions_rejected() {
        let err = ShelfLifeRules::from_json(r#"{"foods": [{"name": "Milk", "conditions": {}}]}"#)
            .unwrap_err();
        assert!(matches!(err, DatasetError::NoConditions(_)));
    }

    #[test]
    fn test_invalid_range_rejected() {
        let err = ShelfLifeRules::from_json(
            r#"{"foods": [{"name": "Milk", "conditions": {"refrigerated": {"min": 7, "max": 5, "unit": "days"}}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRange { .. }));
    }

    #[test]
    fn test_missing_field_rejected() {
        let err = ShelfLifeRules::from_json(
            r#"{"foods": [{"name": "Milk", "conditions": {"refrigerated": {"min": 5, "unit": "days"}}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn test_invalid_modifiers_rejected() {
        let err = ShelfLifeRules::from_json(
            r#"{"foods": [{"name": "Milk", "conditions": {"refrigerated": {"min": 5, "max": 7, "unit": "days"}}}],
                "modifiers": [{"name": "broken", "adjustment": {"type": "multiply", "factor": -1}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::InvalidAdjustment { .. }));

        let err = ShelfLifeRules::from_json(
            r#"{"foods": [{"name": "Milk", "conditions": {"refrigerated": {"min": 5, "max": 7, "unit": "days"}}}],
                "modifiers": [
                    {"name": "opened", "adjustment": {"type": "flag"}},
                    {"name": "Opened", "adjustment": {"type": "flag"}}
                ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateModifier(_)));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = ShelfLifeRules::from_json(
            r#"{"foods": [{"name": "  ", "conditions": {"refrigerated": {"min": 5, "max": 7, "unit": "days"}}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::EmptyFoodName));
    }
}
