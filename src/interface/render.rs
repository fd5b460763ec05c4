use crate::dataset::ShelfLifeRules;
use crate::estimator::GENERAL_RECOMMENDATIONS;
use crate::models::{Estimate, FoodRule};

/// Format a duration in hours as e.g. `2d 4h`.
pub fn format_duration(hours: f64) -> String {
    let hours = hours.max(0.0);
    let days = (hours / 24.0).floor() as u64;
    let rest = (hours % 24.0).floor() as u64;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if rest > 0 {
        parts.push(format!("{}h", rest));
    }
    if parts.is_empty() {
        parts.push("0h".to_string());
    }
    parts.join(" ")
}

pub fn display_disclaimer(rules: &ShelfLifeRules) {
    if let Some(disclaimer) = rules.disclaimer() {
        println!("{}", disclaimer);
        println!();
    }
}

/// Display an estimate with its caveats.
pub fn display_estimate(estimate: &Estimate) {
    println!();
    println!("=== Estimated shelf life ===");
    println!();
    println!(
        "{} ({})",
        estimate.food,
        estimate.condition.replace('_', " ")
    );
    println!(
        "Usable window: {} - {} {} ({} - {})",
        estimate.min,
        estimate.max,
        estimate.unit,
        format_duration(estimate.min_hours()),
        format_duration(estimate.max_hours())
    );
    println!("Overall risk level: {}", estimate.perishability);

    if !estimate.applied_modifiers.is_empty() {
        println!("Modifiers applied: {}", estimate.applied_modifiers.join(", "));
    }

    if !estimate.flags.is_empty() {
        println!();
        println!("Caveats:");
        for flag in &estimate.flags {
            println!("  - {}", flag);
        }
    }

    println!();
}

/// Display the verdict for food with observed sensory issues.
pub fn display_discard(issues: &[String]) {
    println!();
    println!("Sensory warning: discard immediately based on the issues noticed:");
    for issue in issues {
        println!("  - {}", issue);
    }
    println!();
}

pub fn display_recommendations() {
    println!("--- General Recommendations ---");
    for line in GENERAL_RECOMMENDATIONS {
        println!("- {}", line);
    }
    println!();
}

/// Display foods with their supported storage conditions.
pub fn display_food_list(foods: &[&FoodRule], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    let max_name_len = foods.iter().map(|f| f.name.len()).max().unwrap_or(10);

    for food in foods {
        let conditions: Vec<String> = food
            .conditions
            .iter()
            .map(|(name, est)| format!("{} {}-{} {}", name.replace('_', " "), est.min, est.max, est.unit))
            .collect();

        println!(
            "  {:<width$}  {}",
            food.name,
            conditions.join(" | "),
            width = max_name_len
        );
    }

    println!();
}

/// Display modifiers in application order, then sensory checks.
pub fn display_modifiers(rules: &ShelfLifeRules) {
    println!();
    println!("=== Modifiers (applied in this order) ===");
    println!();

    for (i, modifier) in rules.modifiers().iter().enumerate() {
        let scope = if modifier.applies_to.is_empty() {
            "all conditions".to_string()
        } else {
            modifier.applies_to.join(", ")
        };
        println!(
            "{:>3}. {} [{}] - {}",
            i + 1,
            modifier.display_label(),
            scope,
            modifier.adjustment
        );
        if let Some(text) = &modifier.flag_text {
            println!("       {}", text);
        }
    }

    if !rules.sensory_checks().is_empty() {
        println!();
        println!("=== Sensory checks ===");
        println!();
        for check in rules.sensory_checks() {
            println!("  {} - {}", check.name, check.label);
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0h");
        assert_eq!(format_duration(0.5), "0h");
        assert_eq!(format_duration(5.0), "5h");
        assert_eq!(format_duration(24.0), "1d");
        assert_eq!(format_duration(30.0), "1d 6h");
        assert_eq!(format_duration(100.8), "4d 4h");
    }
}
