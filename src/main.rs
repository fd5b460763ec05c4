use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use shelf_life::cli::{Cli, Command, ExportFormat};
use shelf_life::dataset::{DatasetSource, ShelfLifeRules, export_csv, export_json};
use shelf_life::error::{Result, ShelfLifeError};
use shelf_life::estimator::{FoodMatch, assess, search_foods};
use shelf_life::interface::{
    display_discard, display_disclaimer, display_estimate, display_food_list, display_modifiers,
    display_recommendations, prompt_condition, prompt_food, prompt_modifiers,
    prompt_sensory_checks, prompt_yes_no,
};
use shelf_life::models::Assessment;

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shelf_life=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let source = DatasetSource::from_option(cli.rules);
    let command = cli.command.unwrap_or_default();

    debug!(source = %source.describe(), ?command, "starting");

    // The raw export is a pass-through and does not need a parsed dataset.
    if let Command::Export {
        format: ExportFormat::Json,
        output,
    } = &command
    {
        return export_json(&source, open_output(output.as_ref())?);
    }

    let rules = source.load()?;

    match command {
        Command::Estimate {
            food,
            condition,
            modifiers,
            sensory,
            json,
        } => match food {
            Some(food) => cmd_query(&rules, &food, condition, &modifiers, &sensory, json),
            None => cmd_interactive(&rules, json),
        },
        Command::List { search } => cmd_list(&rules, search.as_deref()),
        Command::Modifiers => {
            display_modifiers(&rules);
            Ok(())
        }
        Command::Export { output, .. } => export_csv(&rules, open_output(output.as_ref())?),
    }
}

/// Answer a single query given on the command line.
fn cmd_query(
    rules: &ShelfLifeRules,
    food: &str,
    condition: Option<String>,
    modifiers: &[String],
    sensory: &[String],
    json: bool,
) -> Result<()> {
    let record = match rules.food(food) {
        Some(record) => record,
        None => {
            suggest_foods(rules, food);
            return Err(ShelfLifeError::FoodNotFound(food.trim().to_string()));
        }
    };

    // A food with a single storage condition needs no prompt.
    let condition = match condition {
        Some(condition) => condition,
        None => match record.condition_names().as_slice() {
            [only] => only.clone(),
            _ => prompt_condition(record)?,
        },
    };

    let assessment = assess(rules, &record.name, &condition, modifiers, sensory)?;
    show_assessment(&assessment, json)
}

/// Prompt for each query until the user is done.
fn cmd_interactive(rules: &ShelfLifeRules, json: bool) -> Result<()> {
    if !json {
        display_disclaimer(rules);
        println!("Total foods in database: {}", rules.len());
        println!();
    }

    loop {
        let food = prompt_food(rules)?;
        let condition = prompt_condition(food)?;
        let modifiers = prompt_modifiers(rules, &condition)?;
        let sensory = prompt_sensory_checks(rules)?;

        debug!(food = %food.name, %condition, ?modifiers, ?sensory, "interactive query");

        let assessment = assess(rules, &food.name, &condition, &modifiers, &sensory)?;
        show_assessment(&assessment, json)?;

        if !prompt_yes_no("Estimate another food?", false)? {
            break;
        }
    }

    Ok(())
}

/// List all foods, or only those matching a search.
fn cmd_list(rules: &ShelfLifeRules, search: Option<&str>) -> Result<()> {
    match search {
        None => {
            let foods: Vec<_> = rules.foods().collect();
            display_food_list(&foods, "Foods");
        }
        Some(query) => {
            let foods = match search_foods(rules, query) {
                FoodMatch::Exact(food) => vec![food],
                FoodMatch::Candidates(foods) => foods,
                FoodMatch::None => Vec::new(),
            };
            display_food_list(&foods, &format!("Foods matching '{}'", query));
        }
    }
    Ok(())
}

fn show_assessment(assessment: &Assessment, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(assessment)?);
        return Ok(());
    }

    match assessment {
        Assessment::Estimate(estimate) => {
            display_estimate(estimate);
            display_recommendations();
        }
        Assessment::Discard { issues } => display_discard(issues),
    }
    Ok(())
}

fn suggest_foods(rules: &ShelfLifeRules, query: &str) {
    if let FoodMatch::Candidates(foods) = search_foods(rules, query) {
        let names: Vec<&str> = foods.iter().map(|f| f.name.as_str()).collect();
        eprintln!("Did you mean: {}?", names.join(", "));
    }
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    })
}
