use std::path::PathBuf;

use thiserror::Error;

/// Problems with the rules dataset itself. Fatal at startup.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Cannot read rules dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed rules dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Food entry with an empty name")]
    EmptyFoodName,

    #[error("Duplicate food: {0}")]
    DuplicateFood(String),

    #[error("Food '{0}' has no storage conditions")]
    NoConditions(String),

    #[error("Food '{food}' lists storage condition '{condition}' more than once")]
    DuplicateCondition { food: String, condition: String },

    #[error("Food '{food}' has an invalid range for '{condition}': {min}..{max}")]
    InvalidRange {
        food: String,
        condition: String,
        min: f64,
        max: f64,
    },

    #[error("Modifier with an empty name")]
    EmptyModifierName,

    #[error("Duplicate modifier: {0}")]
    DuplicateModifier(String),

    #[error("Modifier '{modifier}' has an invalid adjustment: {reason}")]
    InvalidAdjustment { modifier: String, reason: String },

    #[error("Sensory check with an empty name")]
    EmptySensoryCheckName,

    #[error("Duplicate sensory check: {0}")]
    DuplicateSensoryCheck(String),
}

#[derive(Debug, Error)]
pub enum ShelfLifeError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error("'{food}' has no estimate for {condition} storage; try one of: {}", .supported.join(", "))]
    UnsupportedCondition {
        food: String,
        condition: String,
        supported: Vec<String>,
    },

    #[error("Unknown modifier: {0}")]
    UnknownModifier(String),

    #[error("Unknown sensory check: {0}")]
    UnknownSensoryCheck(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ShelfLifeError>;
