mod loader;
mod rules;

pub use loader::{
    BUNDLED_RULES_JSON, DatasetSource, bundled_rules, export_csv, export_json, load_rules,
};
pub use rules::ShelfLifeRules;
