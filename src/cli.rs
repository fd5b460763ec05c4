use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// ShelfLife — estimate how long a food keeps, from a curated rules dataset.
#[derive(Parser, Debug)]
#[command(name = "shelf_life")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a rules JSON file. Uses the bundled dataset when omitted.
    #[arg(short, long, global = true, env = "SHELF_LIFE_RULES")]
    pub rules: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Estimate shelf life. Prompts for anything not given on the command line.
    Estimate {
        /// Food name (fuzzy matched when not exact).
        food: Option<String>,

        /// Storage condition, e.g. refrigerated.
        #[arg(short, long)]
        condition: Option<String>,

        /// Modifier to apply; repeat for several.
        #[arg(short, long = "modifier")]
        modifiers: Vec<String>,

        /// Sensory issue noticed; repeat for several.
        #[arg(short, long = "sensory")]
        sensory: Vec<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List known foods.
    List {
        /// Only show foods matching this text.
        #[arg(long)]
        search: Option<String>,
    },

    /// List modifiers and sensory checks.
    Modifiers,

    /// Export the rules dataset.
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Output file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// The dataset file, verbatim.
    Json,
    /// One row per food and storage condition.
    Csv,
}

impl Default for Command {
    fn default() -> Self {
        Command::Estimate {
            food: None,
            condition: None,
            modifiers: Vec::new(),
            sensory: Vec::new(),
            json: false,
        }
    }
}
