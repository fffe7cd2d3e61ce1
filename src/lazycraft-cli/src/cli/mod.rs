//! CLI argument definitions for lazycraft
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod core;
mod library;

pub use core::{Cli, Commands, OutputFormat, TargetArgs};
pub use library::LibraryCommand;
