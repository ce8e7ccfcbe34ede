use crate::error::{NotesError, Result};
use crate::sort::SortField;
use crate::store::DEFAULT_OPEN_TIMEOUT;
use crate::validation::{TitleValidator, DEFAULT_MAX_TITLE_LENGTH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";

pub const KEYS: &[&str] = &["max-title-length", "open-timeout-ms", "default-sort", "editor"];

/// Configuration for notes, stored in .notes/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotesConfig {
    /// Longest title accepted on create, in characters
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,

    /// How long to wait for a locked database before giving up
    #[serde(default = "default_open_timeout_ms")]
    pub open_timeout_ms: u64,

    /// Sort field used by `list` when none is given
    #[serde(default)]
    pub default_sort: SortField,

    /// Editor command; takes precedence over $EDITOR and $VISUAL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

fn default_max_title_length() -> usize {
    DEFAULT_MAX_TITLE_LENGTH
}

fn default_open_timeout_ms() -> u64 {
    DEFAULT_OPEN_TIMEOUT.as_millis() as u64
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            max_title_length: default_max_title_length(),
            open_timeout_ms: default_open_timeout_ms(),
            default_sort: SortField::default(),
            editor: None,
        }
    }
}

impl NotesConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        serde_json::from_str(&content).map_err(|e| {
            NotesError::Config(format!("{}: {}", config_path.display(), e))
        })
    }

    /// Save config to the given directory, which must already exist
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| NotesError::Config(e.to_string()))?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn open_timeout(&self) -> Duration {
        Duration::from_millis(self.open_timeout_ms)
    }

    pub fn validator(&self) -> TitleValidator {
        TitleValidator::new(self.max_title_length)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "max-title-length" => Ok(self.max_title_length.to_string()),
            "open-timeout-ms" => Ok(self.open_timeout_ms.to_string()),
            "default-sort" => Ok(self.default_sort.to_string()),
            "editor" => Ok(self.editor.clone().unwrap_or_default()),
            other => Err(unknown_key(other)),
        }
    }

    /// Parses and stores `value` under `key`. An empty editor clears the override.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "max-title-length" => {
                let max: usize = value.parse().map_err(|_| invalid(key, value))?;
                if max == 0 {
                    return Err(invalid(key, value));
                }
                self.max_title_length = max;
            }
            "open-timeout-ms" => {
                self.open_timeout_ms = value.parse().map_err(|_| invalid(key, value))?;
            }
            "default-sort" => {
                self.default_sort = value.parse().map_err(NotesError::Config)?;
            }
            "editor" => {
                let value = value.trim();
                self.editor = (!value.is_empty()).then(|| value.to_string());
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> NotesError {
    NotesError::Config(format!(
        "unknown config key '{}' (known keys: {})",
        key,
        KEYS.join(", ")
    ))
}

fn invalid(key: &str, value: &str) -> NotesError {
    NotesError::Config(format!("invalid value '{}' for {}", value, key))
}
