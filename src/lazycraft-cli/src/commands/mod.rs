//! Command handlers for the lazycraft CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod craft;
pub mod item;
pub mod library;

use anyhow::{bail, Result};
use lazycraft::{normalize_mod, ModLibrary};
use std::collections::HashSet;
use std::path::Path;

use crate::cli::TargetArgs;

/// Most mods of one affix type a craft can aim for.
const MAX_PER_AFFIX: usize = 3;

/// Collect target mods from `--target` and `--list/--pick`.
///
/// Duplicates are rejected after normalization. Picks from a list whose name
/// says `prefix` or `suffix` are capped at three.
pub fn resolve_targets(args: &TargetArgs, mod_dir: &Path) -> Result<Vec<String>> {
    let mut targets: Vec<String> = args.targets.iter().map(|t| t.trim().to_string()).collect();

    if let Some(list) = &args.list {
        let lowered = list.to_lowercase();
        let affix = ["prefix", "suffix"]
            .into_iter()
            .find(|kind| lowered.contains(kind));
        if let Some(kind) = affix {
            if args.pick.len() > MAX_PER_AFFIX {
                bail!("You can only have {} {}es.", MAX_PER_AFFIX, kind);
            }
        }

        let entries = ModLibrary::open(mod_dir)?.load(list)?;
        for &index in &args.pick {
            let Some(entry) = entries.get(index) else {
                bail!(
                    "{} has {} mods, no index {}",
                    list,
                    entries.len(),
                    index
                );
            };
            targets.push(entry.target());
        }
    }

    targets.retain(|t| !t.is_empty());

    let mut seen = HashSet::new();
    for target in &targets {
        if !seen.insert(normalize_mod(target)) {
            bail!("This mod has already been added: {}", target);
        }
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazycraft::ModEntry;

    #[test]
    fn test_resolve_direct_targets() {
        let dir = tempfile::tempdir().unwrap();
        let args = TargetArgs {
            targets: vec![" increased Fire Damage ".into(), "".into()],
            ..Default::default()
        };
        assert_eq!(
            resolve_targets(&args, dir.path()).unwrap(),
            vec!["increased Fire Damage"]
        );
    }

    #[test]
    fn test_resolve_picked_targets() {
        let dir = tempfile::tempdir().unwrap();
        ModLibrary::open(dir.path())
            .unwrap()
            .save(
                "jewel",
                &[
                    ModEntry::new("(14-16)% increased Fire Damage"),
                    ModEntry::new("+# to maximum Life"),
                ],
            )
            .unwrap();

        let args = TargetArgs {
            targets: vec!["to Strength".into()],
            list: Some("jewel".into()),
            pick: vec![1, 0],
        };
        assert_eq!(
            resolve_targets(&args, dir.path()).unwrap(),
            vec![
                "to Strength",
                "+# to maximum Life",
                "#% increased Fire Damage"
            ]
        );
    }

    #[test]
    fn test_resolve_rejects_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        ModLibrary::open(dir.path())
            .unwrap()
            .save("jewel", &[ModEntry::new("(14-16)% increased Fire Damage")])
            .unwrap();

        let repeated_pick = TargetArgs {
            list: Some("jewel".into()),
            pick: vec![0, 0],
            ..Default::default()
        };
        let err = resolve_targets(&repeated_pick, dir.path()).unwrap_err();
        assert!(err.to_string().contains("already been added"));

        let target_and_pick = TargetArgs {
            targets: vec!["#% increased Fire Damage".into()],
            list: Some("jewel".into()),
            pick: vec![0],
        };
        assert!(resolve_targets(&target_and_pick, dir.path()).is_err());

        let same_text = TargetArgs {
            targets: vec!["+10 to Strength".into(), "+12 to Strength".into()],
            ..Default::default()
        };
        assert!(resolve_targets(&same_text, dir.path()).is_err());
    }

    #[test]
    fn test_resolve_caps_affix_lists() {
        let dir = tempfile::tempdir().unwrap();
        let entries: Vec<ModEntry> = ["Life", "Mana", "Armour", "Evasion"]
            .iter()
            .map(|stat| ModEntry::new(format!("+# to maximum {stat}")))
            .collect();
        let library = ModLibrary::open(dir.path()).unwrap();
        library.save("Ring_Prefixes", &entries).unwrap();
        library.save("ring_suffix", &entries).unwrap();
        library.save("ring", &entries).unwrap();

        let pick = |list: &str, pick: Vec<usize>| TargetArgs {
            list: Some(list.into()),
            pick,
            ..Default::default()
        };

        let err = resolve_targets(&pick("Ring_Prefixes", vec![0, 1, 2, 3]), dir.path())
            .unwrap_err();
        assert_eq!(err.to_string(), "You can only have 3 prefixes.");
        let err = resolve_targets(&pick("ring_suffix", vec![0, 1, 2, 3]), dir.path())
            .unwrap_err();
        assert_eq!(err.to_string(), "You can only have 3 suffixes.");

        assert_eq!(
            resolve_targets(&pick("Ring_Prefixes", vec![0, 1, 2]), dir.path())
                .unwrap()
                .len(),
            3
        );
        assert_eq!(
            resolve_targets(&pick("ring", vec![0, 1, 2, 3]), dir.path())
                .unwrap()
                .len(),
            4
        );
    }

    #[test]
    fn test_resolve_bad_pick() {
        let dir = tempfile::tempdir().unwrap();
        ModLibrary::open(dir.path())
            .unwrap()
            .save("jewel", &[ModEntry::new("+# to Dexterity")])
            .unwrap();

        let args = TargetArgs {
            list: Some("jewel".into()),
            pick: vec![3],
            ..Default::default()
        };
        assert!(resolve_targets(&args, dir.path()).is_err());
    }
}
