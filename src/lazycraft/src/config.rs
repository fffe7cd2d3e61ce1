//! Craft configuration
//!
//! [`CraftOptions`] is the on-disk form (TOML, or the JSON options layout used by
//! older installs). It is validated once into a [`CraftConfig`], which is what
//! the session and front-ends consume.

use std::fmt;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::craft::Region;

pub const DEFAULT_MAX_RETRIES: i64 = 3;
pub const DEFAULT_STOP_KEY: &str = "F3";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("max_retries must be a positive integer, got {0}")]
    InvalidMaxRetries(i64),

    #[error("unknown stop key: {0:?}")]
    UnknownStopKey(String),

    #[error("{name} must be a non-negative number of seconds, got {value}")]
    InvalidDelay { name: &'static str, value: f64 },

    #[error("{name} must be non-zero, got {width}x{height}")]
    InvalidBlockSize {
        name: &'static str,
        width: u32,
        height: u32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Delays between simulated input steps, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionDelays {
    pub key_press_delay: f64,
    pub clipboard_copy_delay: f64,
}

impl Default for ExecutionDelays {
    fn default() -> Self {
        Self {
            key_press_delay: 0.1,
            clipboard_copy_delay: 0.1,
        }
    }
}

/// Unvalidated options as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftOptions {
    pub max_retries: i64,
    pub stop_key: String,
    /// Seconds spent on one mouse movement
    pub mouse_speed: f64,
    pub currency_block_size: [u32; 2],
    pub item_block_size: [u32; 2],
    /// Top-left corner of the item cell
    pub item_slot: [i32; 2],
    pub mod_files_dir: PathBuf,
    pub execution_delays: ExecutionDelays,
}

impl Default for CraftOptions {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            stop_key: DEFAULT_STOP_KEY.to_string(),
            mouse_speed: 0.24,
            currency_block_size: [42, 42],
            item_block_size: [84, 166],
            item_slot: [0, 0],
            mod_files_dir: PathBuf::from("mod_files"),
            execution_delays: ExecutionDelays::default(),
        }
    }
}

impl CraftOptions {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parse the JSON options layout. Unknown keys are ignored.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Load options from a `.json` or `.toml` file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|e| e == "json") {
            Self::from_json(&contents)
        } else {
            Self::from_toml(&contents)
        }
    }

    pub fn validate(&self) -> Result<CraftConfig, ConfigError> {
        let max_retries = u32::try_from(self.max_retries)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(ConfigError::InvalidMaxRetries(self.max_retries))?;

        let stop_key = self.stop_key.parse()?;

        let delays = Delays {
            key_press: seconds("key_press_delay", self.execution_delays.key_press_delay)?,
            clipboard_copy: seconds(
                "clipboard_copy_delay",
                self.execution_delays.clipboard_copy_delay,
            )?,
            mouse_move: seconds("mouse_speed", self.mouse_speed)?,
        };

        let currency_block = block("currency_block_size", self.currency_block_size)?;
        let [item_width, item_height] = block("item_block_size", self.item_block_size)?;

        Ok(CraftConfig {
            max_retries,
            stop_key,
            delays,
            item_region: Region {
                x: self.item_slot[0],
                y: self.item_slot[1],
                width: item_width,
                height: item_height,
            },
            currency_block,
            mod_files_dir: self.mod_files_dir.clone(),
        })
    }
}

fn seconds(name: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidDelay { name, value })
}

fn block(name: &'static str, [width, height]: [u32; 2]) -> Result<[u32; 2], ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::InvalidBlockSize {
            name,
            width,
            height,
        });
    }
    Ok([width, height])
}

/// Delays handed to the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    pub key_press: Duration,
    /// Settle time between an action and the next clipboard read
    pub clipboard_copy: Duration,
    pub mouse_move: Duration,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftConfig {
    pub max_retries: NonZeroU32,
    pub stop_key: StopKey,
    pub delays: Delays,
    /// Screen region of the item being crafted
    pub item_region: Region,
    pub currency_block: [u32; 2],
    pub mod_files_dir: PathBuf,
}

impl Default for CraftConfig {
    fn default() -> Self {
        Self {
            max_retries: NonZeroU32::MIN.saturating_add(2),
            stop_key: StopKey::F3,
            delays: Delays {
                key_press: Duration::from_millis(100),
                clipboard_copy: Duration::from_millis(100),
                mouse_move: Duration::from_millis(240),
            },
            item_region: Region {
                x: 0,
                y: 0,
                width: 84,
                height: 166,
            },
            currency_block: [42, 42],
            mod_files_dir: PathBuf::from("mod_files"),
        }
    }
}

/// Key that aborts a running craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopKey {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Escape,
    Pause,
    ScrollLock,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
}

impl StopKey {
    pub const ALL: [StopKey; 21] = [
        StopKey::F1,
        StopKey::F2,
        StopKey::F3,
        StopKey::F4,
        StopKey::F5,
        StopKey::F6,
        StopKey::F7,
        StopKey::F8,
        StopKey::F9,
        StopKey::F10,
        StopKey::F11,
        StopKey::F12,
        StopKey::Escape,
        StopKey::Pause,
        StopKey::ScrollLock,
        StopKey::Insert,
        StopKey::Delete,
        StopKey::Home,
        StopKey::End,
        StopKey::PageUp,
        StopKey::PageDown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StopKey::F1 => "F1",
            StopKey::F2 => "F2",
            StopKey::F3 => "F3",
            StopKey::F4 => "F4",
            StopKey::F5 => "F5",
            StopKey::F6 => "F6",
            StopKey::F7 => "F7",
            StopKey::F8 => "F8",
            StopKey::F9 => "F9",
            StopKey::F10 => "F10",
            StopKey::F11 => "F11",
            StopKey::F12 => "F12",
            StopKey::Escape => "Escape",
            StopKey::Pause => "Pause",
            StopKey::ScrollLock => "ScrollLock",
            StopKey::Insert => "Insert",
            StopKey::Delete => "Delete",
            StopKey::Home => "Home",
            StopKey::End => "End",
            StopKey::PageUp => "PageUp",
            StopKey::PageDown => "PageDown",
        }
    }
}

impl FromStr for StopKey {
    type Err = ConfigError;

    /// Case-insensitive; `_`, `-` and spaces are ignored and `esc` is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        if key == "esc" {
            return Ok(StopKey::Escape);
        }

        StopKey::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(&key))
            .ok_or_else(|| ConfigError::UnknownStopKey(s.to_string()))
    }
}

impl fmt::Display for StopKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = CraftOptions::default().validate().unwrap();
        assert_eq!(config.max_retries.get(), 3);
        assert_eq!(config.stop_key, StopKey::F3);
        assert_eq!(config.delays.clipboard_copy, Duration::from_millis(100));
        assert_eq!(config.item_region.width, 84);
        assert_eq!(config.item_region, CraftConfig::default().item_region);
    }

    #[test]
    fn test_rejects_non_positive_retries() {
        for value in [0, -1] {
            let options = CraftOptions {
                max_retries: value,
                ..Default::default()
            };
            assert!(matches!(
                options.validate(),
                Err(ConfigError::InvalidMaxRetries(v)) if v == value
            ));
        }
    }

    #[test]
    fn test_rejects_unknown_stop_key() {
        let options = CraftOptions {
            stop_key: "F42".into(),
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ConfigError::UnknownStopKey(k)) if k == "F42"
        ));
    }

    #[test]
    fn test_rejects_negative_delay() {
        let mut options = CraftOptions::default();
        options.execution_delays.clipboard_copy_delay = -0.5;
        assert!(matches!(
            options.validate(),
            Err(ConfigError::InvalidDelay {
                name: "clipboard_copy_delay",
                ..
            })
        ));

        let options = CraftOptions {
            mouse_speed: f64::NAN,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_block() {
        let options = CraftOptions {
            item_block_size: [0, 166],
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ConfigError::InvalidBlockSize { name: "item_block_size", .. })
        ));
    }

    #[test]
    fn test_stop_key_parsing() {
        assert_eq!("f3".parse::<StopKey>().unwrap(), StopKey::F3);
        assert_eq!("F12".parse::<StopKey>().unwrap(), StopKey::F12);
        assert_eq!("esc".parse::<StopKey>().unwrap(), StopKey::Escape);
        assert_eq!("page_up".parse::<StopKey>().unwrap(), StopKey::PageUp);
        assert_eq!("Scroll Lock".parse::<StopKey>().unwrap(), StopKey::ScrollLock);
        assert!("ctrl".parse::<StopKey>().is_err());
        assert!("".parse::<StopKey>().is_err());
    }

    #[test]
    fn test_stop_key_names_round_trip() {
        for key in StopKey::ALL {
            assert_eq!(key.to_string().parse::<StopKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_json_options_layout() {
        let json = r#"{
            "stop_key": "f4",
            "max_retries": 10,
            "currency_block_size": [40, 40],
            "execution_delays": { "clipboard_copy_delay": 0.25 },
            "mouse_speed": 0.3,
            "theme": "dark"
        }"#;
        let options = CraftOptions::from_json(json).unwrap();
        assert_eq!(options.item_block_size, [84, 166]);
        assert!((options.execution_delays.key_press_delay - 0.1).abs() < f64::EPSILON);

        let config = options.validate().unwrap();
        assert_eq!(config.max_retries.get(), 10);
        assert_eq!(config.stop_key, StopKey::F4);
        assert_eq!(config.delays.clipboard_copy, Duration::from_millis(250));
        assert_eq!(config.currency_block, [40, 40]);
    }

    #[test]
    fn test_toml_round_trip_and_load() {
        let options = CraftOptions {
            max_retries: 7,
            stop_key: "F8".into(),
            item_slot: [310, 420],
            ..Default::default()
        };
        let toml = options.to_toml().unwrap();
        assert_eq!(CraftOptions::from_toml(&toml).unwrap(), options);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, &toml).unwrap();
        let loaded = CraftOptions::load(&path).unwrap().validate().unwrap();
        assert_eq!(loaded.item_region.x, 310);
        assert_eq!(loaded.item_region.y, 420);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let options = CraftOptions::from_toml("max_retries = 5\n").unwrap();
        assert_eq!(options.max_retries, 5);
        assert_eq!(options.stop_key, "F3");
        assert_eq!(options.mod_files_dir, PathBuf::from("mod_files"));
    }
}
