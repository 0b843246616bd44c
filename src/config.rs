//! Configuration file handling.
//!
//! The config lives at `<config_dir>/reelsync/config.toml`. Every field has
//! a default, so a missing file or a missing field is never an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use toml_edit::{DocumentMut, Item};
use tracing::{debug, info};

use crate::cue::DEFAULT_TOLERANCE;
use crate::narration::{NarrationSettings, SpeechMethod};

/// Errors that can occur while reading or writing the config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine the config directory")]
    NoConfigDir,

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config is not valid TOML: {0}")]
    Edit(#[from] toml_edit::TomlError),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub narration: NarrationConfig,
    pub chat: ChatConfig,
    pub film: FilmConfig,
    pub log: LogConfig,
}

/// `[player]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Seconds moved by the arrow keys
    pub seek_step_secs: f64,
    /// Player loop tick in milliseconds
    pub tick_ms: u64,
    /// Language for titles and descriptions (`fr`, `en`, `es`)
    pub language: String,
    /// Subtitle track shown at start; empty for none
    pub subtitle: String,
    /// Color theme (`default` or `high-contrast`)
    pub theme: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            seek_step_secs: 5.0,
            tick_ms: 100,
            language: "fr".to_string(),
            subtitle: String::new(),
            theme: "default".to_string(),
        }
    }
}

/// `[narration]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Speak audio description from the start
    pub enabled: bool,
    /// Proximity window around each cue, in seconds
    pub tolerance_secs: f64,
    /// Speaking rate multiplier
    pub rate: f64,
    /// Voice language tag
    pub voice: String,
    /// Speech program to try first (`espeak-ng`, `spd-say`, `say`); empty for automatic
    pub preferred_tool: String,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            tolerance_secs: DEFAULT_TOLERANCE,
            rate: 1.1,
            voice: "fr-FR".to_string(),
            preferred_tool: String::new(),
        }
    }
}

impl NarrationConfig {
    /// Controller settings for descriptions in `language`.
    pub fn settings(&self, language: &str) -> NarrationSettings {
        NarrationSettings {
            tolerance: self.tolerance_secs.max(0.0),
            language: language.to_string(),
            voice: self.voice.clone(),
            rate: self.rate as f32,
        }
    }

    pub fn preferred_method(&self) -> Option<SpeechMethod> {
        SpeechMethod::from_name(&self.preferred_tool)
    }
}

/// `[chat]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// WebSocket endpoint
    pub endpoint: String,
    /// Connect when the player starts
    pub autoconnect: bool,
    /// Author name for sent messages
    pub username: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: "wss://tp-iai3.cleverapps.io".to_string(),
            autoconnect: false,
            username: crate::chat::DEFAULT_AUTHOR.to_string(),
        }
    }
}

/// `[film]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmConfig {
    /// Film document played when none is given on the command line
    pub source: String,
}

/// `[log]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `reelsync=debug`
    pub level: String,
    /// Log file for the player; empty for the default location
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: String::new(),
        }
    }
}

impl LogConfig {
    /// Log file path, falling back to `<data_dir>/reelsync/reelsync.log`.
    pub fn file_path(&self) -> Option<PathBuf> {
        if !self.file.trim().is_empty() {
            return Some(PathBuf::from(self.file.trim()));
        }
        dirs::data_dir().map(|dir| dir.join("reelsync").join("reelsync.log"))
    }
}

impl Config {
    /// Default config file location.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os("REELSYNC_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        dirs::config_dir()
            .map(|dir| dir.join("reelsync").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`. A missing file gives the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(write_err)?;
        info!(path = %path.display(), "Saved config");
        Ok(())
    }
}

/// Outcome of [`migrate_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct MigrateResult {
    /// Updated file content
    pub content: String,
    /// Added fields as `section.key`
    pub added_fields: Vec<String>,
    /// Sections that did not exist at all
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty()
    }
}

/// Add every missing default field to `content`.
///
/// Existing values, comments and ordering are kept; only absent keys and
/// sections are appended.
pub fn migrate_config(content: &str) -> Result<MigrateResult, ConfigError> {
    let mut doc: DocumentMut = content.parse()?;
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())?.parse()?;

    let mut added_fields = Vec::new();
    let mut sections_added = Vec::new();

    for (section, default_item) in defaults.iter() {
        let Some(default_table) = default_item.as_table() else {
            continue;
        };
        match doc.get_mut(section).and_then(Item::as_table_mut) {
            Some(table) => {
                for (key, value) in default_table.iter() {
                    if !table.contains_key(key) {
                        table.insert(key, value.clone());
                        added_fields.push(format!("{}.{}", section, key));
                    }
                }
            }
            None => {
                if doc.contains_key(section) {
                    // Present but not a table; leave the user's value alone
                    continue;
                }
                doc.insert(section, default_item.clone());
                sections_added.push(section.to_string());
                added_fields.extend(
                    default_table
                        .iter()
                        .map(|(key, _)| format!("{}.{}", section, key)),
                );
            }
        }
    }

    Ok(MigrateResult {
        content: doc.to_string(),
        added_fields,
        sections_added,
    })
}
