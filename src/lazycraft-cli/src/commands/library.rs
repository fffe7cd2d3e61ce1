//! Mod list command handlers

use anyhow::{bail, Result};
use lazycraft::library::search;
use lazycraft::{ModEntry, ModLibrary};

use crate::cli::LibraryCommand;

/// Handle a library subcommand
pub fn handle(library: &ModLibrary, command: LibraryCommand) -> Result<()> {
    match command {
        LibraryCommand::List => list(library),
        LibraryCommand::Show { name, search } => show(library, &name, search.as_deref()),
        LibraryCommand::Add {
            name,
            mod_text,
            tag,
            tier,
            ilvl,
            weight,
        } => {
            let entry = ModEntry {
                mod_text,
                tag,
                tier,
                item_level: ilvl,
                weight,
                ..Default::default()
            };
            add(library, &name, entry)
        }
        LibraryCommand::Remove { name, index } => remove(library, &name, index),
    }
}

fn list(library: &ModLibrary) -> Result<()> {
    let names = library.list()?;
    if names.is_empty() {
        println!("No mod lists in {}", library.dir().display());
        return Ok(());
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

fn show(library: &ModLibrary, name: &str, query: Option<&str>) -> Result<()> {
    let entries = library.load(name)?;
    let shown: Vec<(usize, &ModEntry)> = match query {
        Some(q) => {
            let hits = search(&entries, q);
            entries
                .iter()
                .enumerate()
                .filter(|(_, e)| hits.contains(e))
                .collect()
        }
        None => entries.iter().enumerate().collect(),
    };

    if shown.is_empty() {
        println!("No mods found");
        return Ok(());
    }

    print!("{}", render(&shown));
    Ok(())
}

fn render(rows: &[(usize, &ModEntry)]) -> String {
    let header = format!(
        "{:>3}  {:<45} {:<30} {:>4} {:>4}",
        "#", "mod", "tag", "tier", "ilvl"
    );
    let mut out = format!("{}\n{}\n", header, "-".repeat(header.len()));

    for (index, entry) in rows {
        let num = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_default();
        out.push_str(&format!(
            "{:>3}  {:<45} {:<30} {:>4} {:>4}\n",
            index,
            entry.mod_text,
            entry.tag,
            num(entry.tier),
            num(entry.item_level)
        ));
    }
    out
}

fn add(library: &ModLibrary, name: &str, entry: ModEntry) -> Result<()> {
    if entry.mod_text.trim().is_empty() {
        bail!("Mod text must not be empty");
    }

    let mut entries = match library.load(name) {
        Ok(entries) => entries,
        Err(lazycraft::LibraryError::NotFound { .. }) => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    println!("Added {:?} as #{} (target: {})", entry.mod_text, entries.len(), entry.target());
    entries.push(entry);
    library.save(name, &entries)?;
    Ok(())
}

fn remove(library: &ModLibrary, name: &str, index: usize) -> Result<()> {
    let mut entries = library.load(name)?;
    if index >= entries.len() {
        bail!("{} has {} mods, no index {}", name, entries.len(), index);
    }

    let removed = entries.remove(index);
    library.save(name, &entries)?;
    println!("Removed {:?}", removed.mod_text);
    Ok(())
}
