//! Mod list CLI definitions

use clap::Subcommand;

#[derive(Subcommand)]
pub enum LibraryCommand {
    /// List available mod lists
    List,

    /// Show the mods in a list
    Show {
        /// List name (with or without .csv)
        name: String,

        /// Only show mods whose text or tag contains this
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Append a mod to a list (created if missing)
    Add {
        /// List name (with or without .csv)
        name: String,

        /// Mod text, e.g. "#% increased Fire Damage"
        #[arg(short, long = "mod")]
        mod_text: String,

        /// Mod tags, e.g. "Damage, Elemental, Fire"
        #[arg(long, default_value = "")]
        tag: String,

        #[arg(long)]
        tier: Option<u32>,

        /// Minimum item level
        #[arg(long)]
        ilvl: Option<u32>,

        #[arg(long)]
        weight: Option<u32>,
    },

    /// Remove the mod at INDEX (as printed by `show`)
    Remove {
        /// List name (with or without .csv)
        name: String,

        index: usize,
    },
}
