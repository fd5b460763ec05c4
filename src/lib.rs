pub mod cli;
pub mod dataset;
pub mod error;
pub mod estimator;
pub mod interface;
pub mod models;

pub use dataset::{DatasetSource, ShelfLifeRules, bundled_rules, load_rules};
pub use error::{DatasetError, Result, ShelfLifeError};
pub use estimator::{assess, estimate};
pub use models::{Assessment, Estimate, FoodRule, Modifier, Perishability, Unit};
