//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Tree-stand simulator: load, grow, reap and snapshot a forest of trees
#[derive(Parser, Debug)]
#[command(name = "forestry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Snapshot directory (overrides config)
    #[arg(short = 'C', long, global = true, env = "FORESTRY_DIR", value_hint = ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a forest (replaces an existing snapshot)
    New {
        /// Forest name
        name: String,
        /// Number of random trees to plant
        #[arg(short, long, default_value_t = 0)]
        random: usize,
    },

    /// Append trees from a delimited text file
    Import {
        /// Forest name
        name: String,
        /// Text file: species,year_planted,height,growth_rate per line
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Keep trees parsed before a bad line
        #[arg(long)]
        partial: bool,
    },

    /// Print the forest
    Show {
        /// Forest name
        name: String,
    },

    /// Plant random trees
    Add {
        /// Forest name
        name: String,
        /// Number of trees
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Cut down the tree at an index
    Cut {
        /// Forest name
        name: String,
        /// Tree index (as printed by `show`)
        index: usize,
    },

    /// Simulate years of growth
    Grow {
        /// Forest name
        name: String,
        /// Number of years
        #[arg(short, long, default_value_t = 1)]
        years: u32,
    },

    /// Replace every tree taller than a height with a new random tree
    Reap {
        /// Forest name
        name: String,
        /// Height threshold in feet
        height: f64,
    },

    /// Write the forest as delimited text
    Export {
        /// Forest name
        name: String,
        /// Target text file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Interactive session on a forest
    Shell {
        /// Forest name
        name: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Print a config template
    Template,
}
