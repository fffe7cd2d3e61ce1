//! Mod list files
//!
//! Each list is a CSV file in the library directory with the columns
//! `Mod,Tag,Tier,iLvl,Weight,Prefix%,Weight%`. Users pick target mods from
//! these lists; the craft loop itself never reads them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::modifier::normalize_mod;

pub const HEADER: &str = "Mod,Tag,Tier,iLvl,Weight,Prefix%,Weight%";

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("mod list {name:?} not found in {dir}")]
    NotFound { name: String, dir: PathBuf },

    #[error("{file}:{line}: {message}")]
    MalformedRow {
        file: String,
        line: usize,
        message: String,
    },

    #[error("invalid mod list name: {0:?}")]
    InvalidName(String),
}

/// One row of a mod list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModEntry {
    pub mod_text: String,
    pub tag: String,
    pub tier: Option<u32>,
    pub item_level: Option<u32>,
    pub weight: Option<u32>,
    /// Share of the prefix/suffix pool, as printed (e.g. `12.5%`)
    pub prefix_share: String,
    /// Share of the total weight, as printed
    pub weight_share: String,
}

impl ModEntry {
    pub fn new(mod_text: impl Into<String>) -> Self {
        Self {
            mod_text: mod_text.into(),
            ..Default::default()
        }
    }

    /// Target string for this entry.
    pub fn target(&self) -> String {
        normalize_mod(self.mod_text.trim())
    }

    fn to_row(&self) -> String {
        [
            escape_csv(&self.mod_text),
            escape_csv(&self.tag),
            optional(self.tier),
            optional(self.item_level),
            optional(self.weight),
            escape_csv(&self.prefix_share),
            escape_csv(&self.weight_share),
        ]
        .join(",")
    }

    fn from_row(fields: &[String]) -> Result<Self, String> {
        let field = |i: usize| fields.get(i).map(String::as_str).unwrap_or_default();
        if field(0).trim().is_empty() {
            return Err("empty Mod column".to_string());
        }

        Ok(ModEntry {
            mod_text: field(0).to_string(),
            tag: field(1).to_string(),
            tier: number(field(2), "Tier")?,
            item_level: number(field(3), "iLvl")?,
            weight: number(field(4), "Weight")?,
            prefix_share: field(5).to_string(),
            weight_share: field(6).to_string(),
        })
    }
}

fn optional(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn number(value: &str, column: &str) -> Result<Option<u32>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| format!("{} is not a number: {:?}", column, value))
}

/// Escape a string for CSV output
///
/// Fields with surrounding whitespace are quoted too, so they survive a reload.
pub fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) || s.trim() != s {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Split CSV text into records, each tagged with its starting line number.
///
/// Quoted fields may span lines and keep their whitespace; unquoted fields
/// are trimmed. Blank lines are skipped.
pub fn parse_csv(contents: &str) -> Vec<(usize, Vec<String>)> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut was_quoted = false;
    let mut line = 1;
    let mut start = 1;
    let mut chars = contents.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
        }
        match (c, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', true) => quoted = false,
            ('"', false) if field.trim().is_empty() && !was_quoted => {
                field.clear();
                quoted = true;
                was_quoted = true;
            }
            (',', false) => end_field(&mut fields, &mut field, &mut was_quoted),
            ('\n', false) => {
                end_field(&mut fields, &mut field, &mut was_quoted);
                let record = std::mem::take(&mut fields);
                if !is_blank(&record) {
                    records.push((start, record));
                }
                start = line;
            }
            ('\r', false) if chars.peek() == Some(&'\n') => {}
            _ => field.push(c),
        }
    }

    end_field(&mut fields, &mut field, &mut was_quoted);
    if !is_blank(&fields) {
        records.push((start, fields));
    }
    records
}

fn end_field(fields: &mut Vec<String>, field: &mut String, was_quoted: &mut bool) {
    let value = std::mem::take(field);
    fields.push(if *was_quoted {
        value
    } else {
        value.trim().to_string()
    });
    *was_quoted = false;
}

fn is_blank(record: &[String]) -> bool {
    record.len() == 1 && record[0].is_empty()
}

/// Case-insensitive filter over mod text and tag.
pub fn search<'a>(entries: &'a [ModEntry], query: &str) -> Vec<&'a ModEntry> {
    let query = query.to_lowercase();
    entries
        .iter()
        .filter(|e| {
            e.mod_text.to_lowercase().contains(&query) || e.tag.to_lowercase().contains(&query)
        })
        .collect()
}

/// Directory of mod lists.
#[derive(Debug, Clone)]
pub struct ModLibrary {
    dir: PathBuf,
}

impl ModLibrary {
    /// Open the library, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of all lists, sorted.
    pub fn list(&self) -> Result<Vec<String>, LibraryError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|e| e == "csv") {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn load(&self, name: &str) -> Result<Vec<ModEntry>, LibraryError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(LibraryError::NotFound {
                name: name.to_string(),
                dir: self.dir.clone(),
            });
        }

        let contents = fs::read_to_string(&path)?;
        let mut entries = Vec::new();
        for (line, record) in parse_csv(&contents).into_iter().skip(1) {
            let entry = ModEntry::from_row(&record).map_err(|message| {
                LibraryError::MalformedRow {
                    file: name.to_string(),
                    line,
                    message,
                }
            })?;
            entries.push(entry);
        }

        tracing::debug!(list = name, count = entries.len(), "loaded mod list");
        Ok(entries)
    }

    pub fn save(&self, name: &str, entries: &[ModEntry]) -> Result<(), LibraryError> {
        let path = self.path_for(name)?;
        let mut contents = String::from(HEADER);
        contents.push('\n');
        for entry in entries {
            contents.push_str(&entry.to_row());
            contents.push('\n');
        }
        fs::write(&path, contents)?;

        tracing::info!("Saved {} mods to {}", entries.len(), path.display());
        Ok(())
    }

    /// Resolve a list name to a file, adding `.csv` when missing.
    fn path_for(&self, name: &str) -> Result<PathBuf, LibraryError> {
        let trimmed = name.trim();
        if trimmed.is_empty()
            || trimmed.contains(['/', '\\'])
            || trimmed == "."
            || trimmed == ".."
        {
            return Err(LibraryError::InvalidName(name.to_string()));
        }

        let file = if trimmed.ends_with(".csv") {
            trimmed.to_string()
        } else {
            format!("{}.csv", trimmed)
        };
        Ok(self.dir.join(file))
    }
}
