// SPDX-License-Identifier: MPL-2.0
//! User preferences, loaded from and saved to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[service]` - Avatar service URL template
//! - `[display]` - Default avatar size
//! - `[cache]` - Decoded-avatar cache capacity
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable
//! deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Set the `AVATAR_LENS_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory
//!
//! Retry count and delay are deliberately not configurable; they are fixed
//! constants of the loader (see [`crate::avatar::loader`]).

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const CONFIG_DIR_ENV: &str = "AVATAR_LENS_CONFIG_DIR";
const APP_DIR: &str = "avatar_lens";

/// Default URL template for deriving an avatar locator from an identity token.
pub const DEFAULT_URL_TEMPLATE: &str = "https://picsum.photos/seed/{face_id}/100";

/// Default rendered avatar size in logical pixels.
pub const DEFAULT_AVATAR_SIZE: u16 = 75;

/// Minimum rendered avatar size in logical pixels.
pub const MIN_AVATAR_SIZE: u16 = 16;

/// Maximum rendered avatar size in logical pixels.
pub const MAX_AVATAR_SIZE: u16 = 512;

/// Default number of decoded avatars kept in the LRU cache.
pub const DEFAULT_CACHE_ENTRIES: usize = 32;

/// Avatar service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ServiceConfig {
    /// URL template with a `{face_id}` placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_template: Option<String>,
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DisplayConfig {
    /// Default avatar size in logical pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u16>,
}

/// Cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CacheConfig {
    /// Number of decoded avatars to keep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<usize>,
}

/// Root configuration document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Effective URL template, falling back to the built-in default.
    #[must_use]
    pub fn url_template(&self) -> &str {
        self.service
            .url_template
            .as_deref()
            .unwrap_or(DEFAULT_URL_TEMPLATE)
    }

    /// Effective avatar size, clamped to the supported range.
    #[must_use]
    pub fn avatar_size(&self) -> u16 {
        self.display
            .size
            .unwrap_or(DEFAULT_AVATAR_SIZE)
            .clamp(MIN_AVATAR_SIZE, MAX_AVATAR_SIZE)
    }

    /// Effective cache capacity.
    #[must_use]
    pub fn cache_entries(&self) -> usize {
        self.cache.entries.unwrap_or(DEFAULT_CACHE_ENTRIES).max(1)
    }
}

fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Loads the configuration from the default location.
///
/// Always yields a usable configuration: a missing file produces defaults,
/// and a malformed file produces defaults plus a warning message the caller
/// can surface.
#[must_use]
pub fn load() -> (Config, Option<String>) {
    match config_path() {
        Some(path) if path.exists() => match load_from_path(&path) {
            Ok(config) => (config, None),
            Err(err) => (
                Config::default(),
                Some(format!("ignoring invalid config {}: {}", path.display(), err)),
            ),
        },
        _ => (Config::default(), None),
    }
}

/// Loads the configuration from an explicit path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

/// Saves the configuration to the default location.
///
/// # Errors
///
/// Returns an error if no config directory can be determined or the file
/// cannot be written.
pub fn save(config: &Config) -> Result<()> {
    match config_path() {
        Some(path) => save_to_path(config, &path),
        None => Err(crate::error::Error::Config(
            "no config directory available".to_string(),
        )),
    }
}

/// Saves the configuration to an explicit path, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}
