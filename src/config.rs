//! # Configuration Module
//!
//! Runtime settings for playlist generation, resolved in three layers:
//! built-in defaults, then an optional JSON config file, then command-line
//! flags.
//!
//! ## Config File
//!
//! Looked up in the platform-standard config directory:
//! - Linux: `~/.config/smarter-playlist/config.json`
//! - macOS: `~/Library/Application Support/smarter-playlist/config.json`
//! - Windows: `%APPDATA%\smarter-playlist\config.json`
//!
//! Every key is optional:
//!
//! ```json
//! {
//!   "catalog_path": "/home/me/music/catalog.json",
//!   "playlist_name": "Smarter Playlist",
//!   "length": 100,
//!   "strategy_weights": {"next-in-album": 100, "random-in-album": 2, "random": 20},
//!   "include_marker": "#smart",
//!   "seed": 7
//! }
//! ```

use crate::playlist::StrategyWeights;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the platform config/data directories.
pub const APP_DIR: &str = "smarter-playlist";

/// Playlist name used when none is configured.
pub const DEFAULT_PLAYLIST_NAME: &str = "Smarter Playlist";

/// Playlist length used when none is configured.
pub const DEFAULT_LENGTH: usize = 100;

/// Returns the platform-appropriate config file path.
///
/// The file itself need not exist.
///
/// # Errors
///
/// Returns an error if the system config directory cannot be determined.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system config directory. Pass --config to point at a config file."
        )
    })?;

    Ok(config_dir.join(APP_DIR).join("config.json"))
}

/// Default catalog location: `catalog.json` in the platform data directory.
#[must_use]
pub fn default_catalog_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_default()
        .join("catalog.json")
}

/// Configuration for a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// JSON catalog to read songs from
    pub catalog_path: PathBuf,
    /// Name of the destination playlist
    pub playlist_name: String,
    /// Requested number of songs
    pub length: usize,
    /// How likely each strategy is per step
    pub strategy_weights: StrategyWeights,
    /// Only songs whose comments contain this text are eligible
    pub include_marker: Option<String>,
    /// Fixed RNG seed for reproducible playlists
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            playlist_name: DEFAULT_PLAYLIST_NAME.to_string(),
            length: DEFAULT_LENGTH,
            strategy_weights: StrategyWeights::default(),
            include_marker: None,
            seed: None,
        }
    }
}

/// Values given on the command line; `None` leaves the configured value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub catalog_path: Option<PathBuf>,
    pub playlist_name: Option<String>,
    pub length: Option<usize>,
    pub strategy_weights: Option<StrategyWeights>,
    pub include_marker: Option<String>,
    pub seed: Option<u64>,
}

impl RuntimeConfig {
    /// Read a config file, falling back to defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `explicit` if given, else from the platform config path.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file is missing, or if the
    /// file that is found cannot be parsed.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) if !path.exists() => {
                anyhow::bail!("Config file {} does not exist", path.display())
            }
            Some(path) => Self::load_or_default(path),
            None => Self::load_or_default(&get_config_path()?),
        }
    }

    /// Apply command-line values on top of this configuration.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(path) = overrides.catalog_path {
            self.catalog_path = path;
        }
        if let Some(name) = overrides.playlist_name {
            self.playlist_name = name;
        }
        if let Some(length) = overrides.length {
            self.length = length;
        }
        if let Some(weights) = overrides.strategy_weights {
            self.strategy_weights = weights;
        }
        if overrides.include_marker.is_some() {
            self.include_marker = overrides.include_marker;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.playlist_name, "Smarter Playlist");
        assert_eq!(config.length, 100);
        assert_eq!(config.strategy_weights, StrategyWeights::default());
        assert_eq!(config.include_marker, None);
        assert!(config.catalog_path.ends_with("catalog.json"));
    }

    #[test]
    fn test_config_path_structure() {
        if let Ok(path) = get_config_path() {
            assert!(path.ends_with("smarter-playlist/config.json"));
        }
    }

    #[test]
    fn test_missing_file_gives_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = RuntimeConfig::load_or_default(&dir.path().join("absent.json"))?;
        assert_eq!(config, RuntimeConfig::default());
        Ok(())
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(RuntimeConfig::resolve(Some(&dir.path().join("absent.json"))).is_err());
        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r##"{"length": 25, "strategy_weights": {"random": 1}, "include_marker": "#smart"}"##,
        )?;

        let config = RuntimeConfig::resolve(Some(&path))?;
        assert_eq!(config.length, 25);
        assert_eq!(config.playlist_name, DEFAULT_PLAYLIST_NAME);
        assert_eq!(config.strategy_weights.get(Strategy::Random), 1.0);
        assert_eq!(config.strategy_weights.get(Strategy::NextInAlbum), 0.0);
        assert_eq!(config.include_marker.as_deref(), Some("#smart"));
        Ok(())
    }

    #[test]
    fn test_invalid_weights_in_file_are_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"strategy_weights": {"random": 0}}"#)?;

        assert!(RuntimeConfig::load_or_default(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = RuntimeConfig::default().with_overrides(Overrides {
            playlist_name: Some("Commute".to_string()),
            length: Some(12),
            seed: Some(3),
            ..Overrides::default()
        });

        assert_eq!(config.playlist_name, "Commute");
        assert_eq!(config.length, 12);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.strategy_weights, StrategyWeights::default());
    }
}
