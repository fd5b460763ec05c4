use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::dataset::ShelfLifeRules;
use crate::error::{Result, ShelfLifeError};
use crate::estimator::{FoodMatch, search_foods};
use crate::models::FoodRule;

/// Prompt for a food name with fuzzy matching, until one is picked.
pub fn prompt_food(rules: &ShelfLifeRules) -> Result<&FoodRule> {
    loop {
        let input: String = Input::new()
            .with_prompt("Food or dish")
            .interact_text()?;

        match search_foods(rules, &input) {
            FoodMatch::Exact(food) => return Ok(food),
            FoodMatch::None => {
                println!("No matching food found for '{}'", input.trim());
            }
            FoodMatch::Candidates(candidates) if candidates.len() == 1 => {
                let food = candidates[0];
                let confirm = Confirm::new()
                    .with_prompt(format!("Did you mean '{}'?", food.name))
                    .default(true)
                    .interact()?;

                if confirm {
                    return Ok(food);
                }
            }
            FoodMatch::Candidates(candidates) => {
                let mut options: Vec<&str> = candidates.iter().map(|f| f.name.as_str()).collect();
                options.push("None of these");

                let selection = Select::new()
                    .with_prompt("Which did you mean?")
                    .items(&options)
                    .default(0)
                    .interact()?;

                if selection < candidates.len() {
                    return Ok(candidates[selection]);
                }
            }
        }
    }
}

/// Prompt for one of the storage conditions the food supports.
pub fn prompt_condition(food: &FoodRule) -> Result<String> {
    let conditions = food.condition_names();
    let labels: Vec<String> = conditions.iter().map(|c| c.replace('_', " ")).collect();

    let selection = Select::new()
        .with_prompt(format!("How is '{}' stored?", food.name))
        .items(&labels)
        .default(0)
        .interact()?;

    conditions
        .into_iter()
        .nth(selection)
        .ok_or_else(|| ShelfLifeError::InvalidInput("No storage condition selected".to_string()))
}

/// Prompt for modifiers relevant to `condition`. Returns modifier names.
pub fn prompt_modifiers(rules: &ShelfLifeRules, condition: &str) -> Result<Vec<String>> {
    let relevant: Vec<_> = rules
        .modifiers()
        .iter()
        .filter(|m| m.applies_to_condition(condition))
        .collect();

    if relevant.is_empty() {
        return Ok(Vec::new());
    }

    let labels: Vec<String> = relevant.iter().map(|m| m.display_label()).collect();
    let selected = MultiSelect::new()
        .with_prompt("Modifiers (space to toggle, enter to confirm)")
        .items(&labels)
        .interact()?;

    Ok(selected
        .into_iter()
        .map(|i| relevant[i].name.clone())
        .collect())
}

/// Prompt for sensory issues the user has noticed. Returns check names.
pub fn prompt_sensory_checks(rules: &ShelfLifeRules) -> Result<Vec<String>> {
    let checks = rules.sensory_checks();
    if checks.is_empty() {
        return Ok(Vec::new());
    }

    let labels: Vec<&str> = checks.iter().map(|c| c.label.as_str()).collect();
    let selected = MultiSelect::new()
        .with_prompt("Do you notice any of these? (space to toggle, enter to confirm)")
        .items(&labels)
        .interact()?;

    Ok(selected
        .into_iter()
        .map(|i| checks[i].name.clone())
        .collect())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
