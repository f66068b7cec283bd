//! Persistent player settings
//!
//! A small JSON document in the user's config directory:
//!
//! ```json
//! {
//!   "highScore": 12400,
//!   "musicEnabled": true,
//!   "isFullscreen": false
//! }
//! ```
//!
//! Missing keys take their defaults. A missing or unreadable file never stops
//! the game: [`SettingsStore::load`] logs and falls back to defaults.

mod error;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use error::{Result, SettingsError};

/// Environment variable overriding the settings file location
pub const SETTINGS_PATH_ENV: &str = "TETRIX_SETTINGS_PATH";

/// File name under `$HOME/.config`
pub const SETTINGS_FILE_NAME: &str = "tetrix.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    pub high_score: u32,
    pub music_enabled: bool,
    pub is_fullscreen: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            high_score: 0,
            music_enabled: true,
            is_fullscreen: false,
        }
    }
}

impl GameSettings {
    /// Raise the high score if `score` beats it; returns true if it did
    pub fn record_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    /// Flip the music preference and return the new value
    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        self.music_enabled
    }
}

/// Loads and saves [`GameSettings`] at a fixed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `TETRIX_SETTINGS_PATH`, or `$HOME/.config/tetrix.json`
    pub fn from_env() -> Result<Self> {
        if let Some(path) = std::env::var_os(SETTINGS_PATH_ENV).filter(|p| !p.is_empty()) {
            return Ok(Self::new(path));
        }
        Self::default_path().map(Self::new)
    }

    pub fn default_path() -> Result<PathBuf> {
        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .ok_or(SettingsError::NoConfigDir)?;
        Ok(PathBuf::from(home).join(".config").join(SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file, reporting every failure
    pub fn try_load(&self) -> Result<GameSettings> {
        let text = fs::read_to_string(&self.path).map_err(|e| SettingsError::io(&self.path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Read the file, falling back to defaults on any failure
    pub fn load(&self) -> GameSettings {
        match self.try_load() {
            Ok(settings) => {
                debug!(path = %self.path.display(), "settings loaded");
                settings
            }
            Err(e) if e.is_not_found() => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                GameSettings::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to load settings, using defaults");
                GameSettings::default()
            }
        }
    }

    /// Write pretty-printed JSON, creating parent directories as needed
    pub fn save(&self, settings: &GameSettings) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SettingsError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json).map_err(|e| SettingsError::io(&self.path, e))?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
