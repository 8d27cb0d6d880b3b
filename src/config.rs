//! Project configuration for fisherman.
//!
//! An optional `.fisherman.yaml` at the repository root can pin the hooks
//! directory and force color on or off:
//!
//! ```yaml
//! hooks_dir: .githooks
//! color: false
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file path relative to the project root.
pub const CONFIG_FILE_PATH: &str = ".fisherman.yaml";

/// Project configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FishermanConfig {
    /// Hooks directory to use instead of asking git. Relative paths are
    /// taken from the directory holding the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks_dir: Option<PathBuf>,

    /// Force colored output on or off. Unset means detect the terminal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

impl FishermanConfig {
    /// Load config from a specific base directory, returning None if there is
    /// no config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(base_dir: &Path) -> Result<Option<Self>> {
        let config_path = Self::config_path(base_dir);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        tracing::debug!(path = %config_path.display(), ?config, "loaded config");
        Ok(Some(config))
    }

    /// Save config to a specific base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(Self::config_path(base_dir), content)?;
        Ok(())
    }

    /// Get the config file path for a base directory.
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE_PATH)
    }

    /// The configured hooks directory, resolved against `base_dir`.
    #[must_use]
    pub fn hooks_dir_in(&self, base_dir: &Path) -> Option<PathBuf> {
        self.hooks_dir.as_ref().map(|dir| base_dir.join(dir))
    }
}
