use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{DatasetError, Result};
use crate::dataset::ShelfLifeRules;

/// Rules dataset compiled into the binary.
pub static BUNDLED_RULES_JSON: &str = include_str!("../../data/rules.json");

/// Where the rules dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Bundled,
    File(PathBuf),
}

impl DatasetSource {
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => DatasetSource::File(path),
            None => DatasetSource::Bundled,
        }
    }

    /// Raw dataset text, exactly as stored.
    pub fn read_text(&self) -> std::result::Result<String, DatasetError> {
        match self {
            DatasetSource::Bundled => Ok(BUNDLED_RULES_JSON.to_string()),
            DatasetSource::File(path) => read_file(path),
        }
    }

    pub fn load(&self) -> std::result::Result<ShelfLifeRules, DatasetError> {
        ShelfLifeRules::from_json(&self.read_text()?)
    }

    pub fn describe(&self) -> String {
        match self {
            DatasetSource::Bundled => "bundled rules.json".to_string(),
            DatasetSource::File(path) => path.display().to_string(),
        }
    }
}

/// Load and validate rules from a JSON file.
pub fn load_rules<P: AsRef<Path>>(path: P) -> std::result::Result<ShelfLifeRules, DatasetError> {
    ShelfLifeRules::from_json(&read_file(path.as_ref())?)
}

/// Load the dataset compiled into the binary.
pub fn bundled_rules() -> std::result::Result<ShelfLifeRules, DatasetError> {
    ShelfLifeRules::from_json(BUNDLED_RULES_JSON)
}

fn read_file(path: &Path) -> std::result::Result<String, DatasetError> {
    fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the raw dataset text verbatim.
pub fn export_json<W: Write>(source: &DatasetSource, mut out: W) -> Result<()> {
    let text = source.read_text()?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Write one CSV row per food and storage condition.
pub fn export_csv<W: Write>(rules: &ShelfLifeRules, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(["food", "condition", "min", "max", "unit", "flags"])?;

    for food in rules.foods() {
        for (condition, estimate) in &food.conditions {
            wtr.write_record([
                food.name.as_str(),
                condition.as_str(),
                estimate.min.to_string().as_str(),
                estimate.max.to_string().as_str(),
                estimate.unit.as_str(),
                estimate.flags.join("; ").as_str(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
