//! Configuration management for cueplay
//!
//! Configuration lives in `~/.config/cueplay/config.toml` (or the platform
//! equivalent). Every field has a default, so a missing file or a partial
//! file is fine.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the terminal player goes fullscreen.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FullscreenMode {
    /// xterm window-manipulation sequences
    #[default]
    Xterm,
    /// Fullscreen is not available
    None,
}

/// Player behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Pointer idle time before controls hide (milliseconds)
    pub inactivity_delay_ms: u64,
    /// Pointer rest time before a scrub drag commits its seek (milliseconds)
    pub scrub_debounce_ms: u64,
    /// Seek distance for the arrow keys (seconds)
    pub seek_step: f64,
    /// Seek distance for the period and comma keys (seconds)
    pub fine_seek_step: f64,
    /// Caption language selected when a payload loads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    pub fullscreen: FullscreenMode,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            inactivity_delay_ms: 3000,
            scrub_debounce_ms: 150,
            seek_step: 10.0,
            fine_seek_step: 1.0,
            default_language: None,
            fullscreen: FullscreenMode::default(),
        }
    }
}

/// Log output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `CUEPLAY_LOG`
    pub level: String,
    /// Log file; defaults to `cueplay.log` in the cache directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Resolved log file path.
    pub fn file_path(&self) -> Result<PathBuf> {
        if let Some(file) = &self.file {
            return Ok(file.clone());
        }
        let cache_dir = dirs::cache_dir().context("Could not determine cache directory")?;
        Ok(cache_dir.join("cueplay").join("cueplay.log"))
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("cueplay").join("config.toml"))
    }
}
