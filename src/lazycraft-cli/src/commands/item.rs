//! Item text command handlers
//!
//! Handles `parse`, `affixes` and `compare`.

use anyhow::{bail, Result};
use lazycraft::{
    compare_mods, open_affixes, parse_item_details, parse_mods, AffixStatus, ItemDetails,
    Modifier,
};
use serde::Serialize;

use crate::cli::OutputFormat;

#[derive(Debug, Serialize)]
struct ParsedItem {
    #[serde(flatten)]
    details: ItemDetails,
    mods: Vec<Modifier>,
}

/// Handle the parse command
pub fn parse(text: &str, format: OutputFormat) -> Result<()> {
    let item = ParsedItem {
        details: parse_item_details(text),
        mods: parse_mods(text),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&item)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&item)?),
        OutputFormat::Table => print!("{}", render_table(&item)),
    }
    Ok(())
}

fn render_table(item: &ParsedItem) -> String {
    let mut out = String::new();
    let details = &item.details;

    let rarity = details
        .rarity
        .as_ref()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "?".into());
    out.push_str(&format!("Rarity: {}\n", rarity));
    if let Some(name) = &details.name {
        out.push_str(&format!("Name:   {}\n", name));
    }
    if let (Some(current), Some(max)) = (details.current_stack, details.max_stack) {
        out.push_str(&format!("Stack:  {}/{}\n", current, max));
    }

    if item.mods.is_empty() {
        out.push_str("\nNo mods found\n");
        return out;
    }

    out.push('\n');
    let header = format!("{:<7} {:<4} {:<40} {}", "type", "tier", "value", "tags");
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.len()));
    out.push('\n');

    for m in &item.mods {
        let tier = m.tier.map(|t| t.to_string()).unwrap_or_else(|| "-".into());
        out.push_str(&format!(
            "{:<7} {:<4} {:<40} {}\n",
            m.kind.as_str(),
            tier,
            m.normalized_value,
            m.tags.join(", ")
        ));
    }
    out
}

/// Handle the affixes command
pub fn affixes(text: &str) -> Result<()> {
    let status = open_affixes(text)?;
    print!("{}", render_affixes(&status));
    Ok(())
}

fn render_affixes(status: &AffixStatus) -> String {
    let mut out = format!(
        "Prefixes: {}\nSuffixes: {}\n",
        status.prefixes, status.suffixes
    );
    if status.has_open_affix {
        let missing: Vec<&str> = status.missing.iter().map(|m| m.as_str()).collect();
        out.push_str(&format!("Open: {}\n", missing.join(", ")));
    } else {
        out.push_str("No open affixes\n");
    }
    out
}

/// Handle the compare command
///
/// Fails when any target is missing so scripts can use the exit status.
pub fn compare(text: &str, targets: &[String]) -> Result<()> {
    if targets.is_empty() {
        bail!("No targets given (use --target or --list/--pick)");
    }

    let mods = parse_mods(text);
    for target in targets {
        let hit = compare_mods(&mods, std::slice::from_ref(target));
        println!("[{}] {}", if hit { "x" } else { " " }, target);
    }

    if !compare_mods(&mods, targets) {
        bail!("Item does not carry every target mod");
    }
    println!("All targets present");
    Ok(())
}
