// SPDX-License-Identifier: MPL-2.0
//! Browser settings, loaded and saved as a `settings.toml` file.
//!
//! Every field is optional in the file; missing or unparsable values fall
//! back to defaults so an old or hand-edited settings file never blocks a
//! browsing session.

use crate::browser::preview::{
    DEFAULT_THUMBNAIL_CACHE_ENTRIES, MAX_THUMBNAIL_CACHE_ENTRIES, MIN_THUMBNAIL_CACHE_ENTRIES,
};
use crate::diagnostics::{DEFAULT_LOG_CAPACITY, MAX_LOG_CAPACITY, MIN_LOG_CAPACITY};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "MediaRail";

/// Default number of rail thumbnails on each side of the current item.
pub const DEFAULT_RAIL_RADIUS: usize = 3;

/// Largest supported rail radius.
pub const MAX_RAIL_RADIUS: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Thumbnails shown on each side of the current item in the rail.
    #[serde(default)]
    pub rail_radius: Option<usize>,
    /// Capacity of the rail thumbnail cache.
    #[serde(default)]
    pub thumbnail_cache_entries: Option<usize>,
    /// Capacity of the diagnostic event log.
    #[serde(default)]
    pub event_log_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rail_radius: Some(DEFAULT_RAIL_RADIUS),
            thumbnail_cache_entries: Some(DEFAULT_THUMBNAIL_CACHE_ENTRIES),
            event_log_capacity: Some(DEFAULT_LOG_CAPACITY),
        }
    }
}

impl Config {
    /// Effective rail radius, clamped to the supported range.
    #[must_use]
    pub fn effective_rail_radius(&self) -> usize {
        self.rail_radius
            .unwrap_or(DEFAULT_RAIL_RADIUS)
            .clamp(1, MAX_RAIL_RADIUS)
    }

    /// Effective thumbnail cache capacity, clamped to the supported range.
    #[must_use]
    pub fn effective_thumbnail_cache_entries(&self) -> usize {
        self.thumbnail_cache_entries
            .unwrap_or(DEFAULT_THUMBNAIL_CACHE_ENTRIES)
            .clamp(MIN_THUMBNAIL_CACHE_ENTRIES, MAX_THUMBNAIL_CACHE_ENTRIES)
    }

    /// Effective event log capacity, clamped to the supported range.
    #[must_use]
    pub fn effective_event_log_capacity(&self) -> usize {
        self.event_log_capacity
            .unwrap_or(DEFAULT_LOG_CAPACITY)
            .clamp(MIN_LOG_CAPACITY, MAX_LOG_CAPACITY)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
