mod cli;
mod commands;
mod config;
mod input;
mod replay;

use anyhow::Result;
use clap::Parser;
use config::Config;
use lazycraft::ModLibrary;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "lazycraft=debug"
    } else {
        "lazycraft=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { input, format } => {
            let text = input::read_item_text(input.as_deref())?;
            commands::item::parse(&text, format)?;
        }

        Commands::Affixes { input } => {
            let text = input::read_item_text(input.as_deref())?;
            commands::item::affixes(&text)?;
        }

        Commands::Compare { input, targets } => {
            let targets = commands::resolve_targets(&targets, &config.options.mod_files_dir)?;
            let text = input::read_item_text(input.as_deref())?;
            commands::item::compare(&text, &targets)?;
        }

        Commands::Craft {
            frames,
            targets,
            max_retries,
            json,
        } => {
            let targets = commands::resolve_targets(&targets, &config.options.mod_files_dir)?;
            commands::craft::handle(&config, &frames, &targets, max_retries, json)?;
        }

        Commands::Library { dir, command } => {
            let dir = dir.unwrap_or_else(|| config.options.mod_files_dir.clone());
            let library = ModLibrary::open(dir)?;
            commands::library::handle(&library, command)?;
        }

        Commands::Configure {
            max_retries,
            stop_key,
            mod_dir,
            show,
        } => {
            commands::configure::handle(config, max_retries, stop_key, mod_dir, show)?;
        }
    }

    Ok(())
}
