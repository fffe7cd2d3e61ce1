//! Craft command handler
//!
//! Drives a [`CraftSession`] over captured item texts. Ctrl-C raises the
//! session's stop flag.

use anyhow::{bail, Context, Result};
use lazycraft::{CancelToken, CraftConfig, CraftReport, CraftSession};
use std::fs;
use std::num::NonZeroU32;
use std::path::PathBuf;

use crate::config::Config;
use crate::replay;

/// Handle the craft command
pub fn handle(
    config: &Config,
    frames: &[PathBuf],
    targets: &[String],
    max_retries: Option<i64>,
    json: bool,
) -> Result<()> {
    if targets.is_empty() {
        bail!("No targets given (use --target or --list/--pick)");
    }

    let mut craft_config = config.craft_config()?;
    if let Some(n) = max_retries {
        craft_config.max_retries = u32::try_from(n)
            .ok()
            .and_then(NonZeroU32::new)
            .with_context(|| format!("--max-retries must be at least 1, got {}", n))?;
    }

    let texts = frames
        .iter()
        .map(|path| {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read frame {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .context("Failed to install Ctrl-C handler")?;
    tracing::info!(
        "Crafting for {} target(s), up to {} retries; press Ctrl-C to stop",
        targets.len(),
        craft_config.max_retries
    );

    let report = run(texts, targets, &craft_config, cancel);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", summarize(&report));
    }

    if !report.outcome.is_success() {
        bail!("Craft failed: {}", report.outcome);
    }
    Ok(())
}

fn run(
    texts: Vec<String>,
    targets: &[String],
    config: &CraftConfig,
    cancel: CancelToken,
) -> CraftReport {
    let (source, executor) = replay::replay(texts, config.delays.clipboard_copy);
    let mut session = CraftSession::new(source, executor, cancel, config);
    let report = session.run(targets);
    tracing::debug!(actions = session.executor().applied(), "replay finished");
    report
}

fn summarize(report: &CraftReport) -> String {
    let mut out = format!("Outcome: {}\n", report.outcome);
    out.push_str(&format!("Retries: {}\n", report.retries));

    let applied: Vec<String> = report.applied.iter().map(|c| c.to_string()).collect();
    if applied.is_empty() {
        out.push_str("Applied: none\n");
    } else {
        out.push_str(&format!("Applied: {}\n", applied.join(", ")));
    }

    if let Some(snapshot) = &report.snapshot {
        out.push_str(&format!("Final item ({}):\n", snapshot.rarity));
        for m in &snapshot.mods {
            out.push_str(&format!("  [{}] {}\n", m.kind, m.raw_value));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazycraft::{CraftOutcome, Currency, FailureReason};
    use std::time::Duration;

    const NORMAL: &str = "Item Class: Jewels\nRarity: Normal\nCobalt Jewel\n";

    const MAGIC_FIRE: &str = "Item Class: Jewels\n\
        Rarity: Magic\n\
        Flaming Cobalt Jewel\n\
        --------\n\
        { Prefix Modifier \"Flaming\" (Tier: 1) — Damage, Elemental, Fire }\n\
        16(14-16)% increased Fire Damage\n";

    const MAGIC_COLD: &str = "Item Class: Jewels\n\
        Rarity: Magic\n\
        Cobalt Jewel of the Seal\n\
        --------\n\
        { Suffix Modifier \"of the Seal\" (Tier: 6) — Elemental, Cold, Resistance }\n\
        +14(12-17)% to Cold Resistance\n";

    fn config() -> CraftConfig {
        let mut config = CraftConfig::default();
        config.delays.clipboard_copy = Duration::ZERO;
        config
    }

    fn targets() -> Vec<String> {
        vec!["increased Fire Damage".to_string()]
    }

    #[test]
    fn test_replay_reaches_target() {
        let texts = vec![NORMAL.into(), MAGIC_COLD.into(), MAGIC_FIRE.into()];
        let report = run(texts, &targets(), &config(), CancelToken::new());

        assert_eq!(report.outcome, CraftOutcome::Success);
        assert_eq!(report.applied.first(), Some(&Currency::Transmutation));
        assert!(report.applied.len() >= 2);
        assert!(summarize(&report).starts_with("Outcome: matched"));
    }

    #[test]
    fn test_replay_runs_out_of_frames() {
        let texts = vec![NORMAL.into(), MAGIC_COLD.into()];
        let report = run(texts, &targets(), &config(), CancelToken::new());

        assert!(matches!(
            report.outcome,
            CraftOutcome::Failure(FailureReason::ActionFailed(_))
        ));
    }

    #[test]
    fn test_summary_lists_final_mods() {
        let report = run(
            vec![MAGIC_FIRE.into()],
            &targets(),
            &config(),
            CancelToken::new(),
        );
        let summary = summarize(&report);

        assert!(summary.contains("Applied: none"));
        assert!(summary.contains("Final item (Magic):"));
        assert!(summary.contains("[prefix] 16(14-16)% increased Fire Damage"));
    }

    #[test]
    fn test_report_json() {
        let report = run(vec![String::new()], &targets(), &config(), CancelToken::new());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["outcome"]["failure"], "unreadable_item");
    }
}
