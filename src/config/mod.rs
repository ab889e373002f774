// SPDX-License-Identifier: MPL-2.0
//! User preferences: tile sizing, border thickness, and the playback
//! marking policy, stored as `settings.toml` in the config directory.
//!
//! Every field is optional on disk and merged over defaults on load, so a
//! settings file written by an older or newer build never breaks parsing.
//! A malformed file reads as the defaults.

use crate::app::paths;
use crate::error::Result;
use crate::watch_state::PlayMark;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "settings.toml";

/// Default minimum tile width in pixels.
pub const DEFAULT_MIN_TILE_WIDTH_PX: u16 = 220;

/// Default watch-state border thickness in pixels.
pub const DEFAULT_BORDER_WIDTH_PX: u16 = 1;

/// Supported minimum-tile-width range for the settings slider.
pub const MIN_TILE_WIDTH_PX: u16 = 120;
pub const MAX_TILE_WIDTH_PX: u16 = 600;

/// Supported border-thickness range for the settings slider.
pub const MIN_BORDER_WIDTH_PX: u16 = 0;
pub const MAX_BORDER_WIDTH_PX: u16 = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub min_tile_width_px: Option<u16>,
    #[serde(default)]
    pub border_width_px: Option<u16>,
    #[serde(default)]
    pub play_mark: Option<PlayMark>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_tile_width_px: Some(DEFAULT_MIN_TILE_WIDTH_PX),
            border_width_px: Some(DEFAULT_BORDER_WIDTH_PX),
            play_mark: Some(PlayMark::default()),
        }
    }
}

impl Config {
    /// Effective minimum tile width, clamped so persisted configs cannot
    /// request a degenerate grid.
    #[must_use]
    pub fn min_tile_width(&self) -> u16 {
        self.min_tile_width_px
            .unwrap_or(DEFAULT_MIN_TILE_WIDTH_PX)
            .clamp(MIN_TILE_WIDTH_PX, MAX_TILE_WIDTH_PX)
    }

    /// Effective watch-state border thickness.
    #[must_use]
    pub fn border_width(&self) -> u16 {
        self.border_width_px
            .unwrap_or(DEFAULT_BORDER_WIDTH_PX)
            .clamp(MIN_BORDER_WIDTH_PX, MAX_BORDER_WIDTH_PX)
    }

    /// Effective playback marking policy.
    #[must_use]
    pub fn play_mark(&self) -> PlayMark {
        self.play_mark.unwrap_or_default()
    }
}

pub fn load() -> Result<Config> {
    if let Some(path) = paths::get_app_config_dir().map(|dir| dir.join(CONFIG_FILE)) {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = paths::get_app_config_dir().map(|dir| dir.join(CONFIG_FILE)) {
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
