//! Item text input helpers

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read item text from a file, or stdin when no path is given
pub fn read_item_text(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read item text from {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read item text from stdin")?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("item.txt");
        fs::write(&path, "Rarity: Normal\nCobalt Jewel\n").unwrap();

        let text = read_item_text(Some(&path)).unwrap();
        assert!(text.starts_with("Rarity: Normal"));
    }

    #[test]
    fn test_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_item_text(Some(&dir.path().join("missing.txt"))).unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }
}
