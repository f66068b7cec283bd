//! Error types for settings persistence
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors that can occur while loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading, writing or creating directories failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not valid settings JSON
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither an explicit path nor a home directory is available
    #[error("No settings path: set TETRIX_SETTINGS_PATH or HOME")]
    NoConfigDir,
}

impl SettingsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True if the file simply does not exist yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
