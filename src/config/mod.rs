// SPDX-License-Identifier: MPL-2.0
//! This module handles the viewer's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! Every field is optional in the file; missing or invalid values fall back
//! to the defaults in [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use iced_reel::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.seek_step_secs = Some(5.0);
//! config::save(&config).expect("Failed to save config");
//!
//! let settings = config.viewer_settings();
//! assert_eq!(settings.seek_step.value(), 5.0);
//! ```

pub mod defaults;

use crate::domain::video::{FeedbackDuration, SeekStep};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedReel";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub seek_step_secs: Option<f64>,
    #[serde(default)]
    pub feedback_duration_ms: Option<u64>,
    #[serde(default)]
    pub autoplay: Option<bool>,
    #[serde(default)]
    pub start_muted: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seek_step_secs: Some(defaults::DEFAULT_SEEK_STEP_SECS),
            feedback_duration_ms: Some(defaults::DEFAULT_FEEDBACK_DURATION_MS),
            autoplay: Some(defaults::DEFAULT_AUTOPLAY),
            start_muted: Some(defaults::DEFAULT_START_MUTED),
        }
    }
}

/// Validated settings consumed by a viewer session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerSettings {
    pub seek_step: SeekStep,
    pub feedback: FeedbackDuration,
    pub autoplay: bool,
    pub start_muted: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Config::default().viewer_settings()
    }
}

impl Config {
    /// Resolves the optional file values into clamped viewer settings.
    #[must_use]
    pub fn viewer_settings(&self) -> ViewerSettings {
        ViewerSettings {
            seek_step: self
                .seek_step_secs
                .map_or_else(SeekStep::default, SeekStep::new),
            feedback: self
                .feedback_duration_ms
                .map_or_else(FeedbackDuration::default, FeedbackDuration::from_millis),
            autoplay: self.autoplay.unwrap_or(defaults::DEFAULT_AUTOPLAY),
            start_muted: self.start_muted.unwrap_or(defaults::DEFAULT_START_MUTED),
        }
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

/// Loads a config file. Unparseable content yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), %err, "invalid config, using defaults");
        Config::default()
    }))
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
