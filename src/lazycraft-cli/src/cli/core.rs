//! Core CLI definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::library::LibraryCommand;

#[derive(Parser)]
#[command(name = "lazycraft")]
#[command(about = "Path of Exile item parser and craft loop", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "LAZYCRAFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for item commands
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// Target mods, given directly or picked from a mod list
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Target mod text (repeatable), e.g. "increased Fire Damage"
    #[arg(short, long = "target")]
    pub targets: Vec<String>,

    /// Mod list to pick targets from
    #[arg(long, requires = "pick")]
    pub list: Option<String>,

    /// Indices into --list (comma-separated, as printed by `library show`)
    #[arg(long, value_delimiter = ',', requires = "list")]
    pub pick: Vec<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse item text and print its details and mods
    #[command(visible_alias = "p")]
    Parse {
        /// Item text file (reads stdin if not provided)
        input: Option<PathBuf>,

        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show which affix slots are still open
    #[command(visible_alias = "a")]
    Affixes {
        /// Item text file (reads stdin if not provided)
        input: Option<PathBuf>,
    },

    /// Check whether an item carries the target mods
    Compare {
        /// Item text file (reads stdin if not provided)
        input: Option<PathBuf>,

        #[command(flatten)]
        targets: TargetArgs,
    },

    /// Run the craft loop against captured item texts
    ///
    /// Each FRAME is the item text as it looks after one more currency
    /// application; the first frame is the starting item.
    #[command(visible_alias = "c")]
    Craft {
        /// Item text files, in order
        #[arg(required = true)]
        frames: Vec<PathBuf>,

        #[command(flatten)]
        targets: TargetArgs,

        /// Override the configured retry budget
        #[arg(long)]
        max_retries: Option<i64>,

        /// Print the final report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage mod lists
    #[command(visible_alias = "l")]
    Library {
        /// Mod list directory (overrides the configured one)
        #[arg(long)]
        dir: Option<PathBuf>,

        #[command(subcommand)]
        command: LibraryCommand,
    },

    /// Configure default settings
    Configure {
        /// Set the retry budget
        #[arg(long)]
        max_retries: Option<i64>,

        /// Set the stop key (F1-F12, Escape, Pause, ...)
        #[arg(long)]
        stop_key: Option<String>,

        /// Set the mod list directory
        #[arg(long)]
        mod_dir: Option<PathBuf>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
