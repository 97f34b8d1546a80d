//! Runtime configuration for the page-interaction layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! The static page may carry a JSON object in the body's
//! `data-portfolio-config` attribute. Every field is optional; missing fields
//! take the defaults below, which reproduce the stock page behaviour.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;

use crate::consts;
use crate::error::ConfigError;
use crate::observer::WatchOptions;
use crate::theme::Theme;

/// Tunables for every feature module.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Storage key for the persisted theme.
    pub storage_key: String,
    /// Theme used when nothing is persisted.
    pub default_theme: Theme,
    pub transition_ms: u32,
    pub click_feedback_ms: u32,
    pub scroll_top_threshold: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub counter_threshold: f64,
    pub counter_duration_ms: u32,
    /// Enables the hero heading typing effect.
    pub typing_effect: bool,
    pub typing_delay_ms: u32,
    pub typing_speed_ms: u32,
    /// Console log level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            storage_key: consts::THEME_STORAGE_KEY.to_owned(),
            default_theme: Theme::Dark,
            transition_ms: consts::THEME_TRANSITION_MS,
            click_feedback_ms: consts::CLICK_FEEDBACK_MS,
            scroll_top_threshold: consts::SCROLL_TOP_THRESHOLD_PX,
            reveal_threshold: consts::REVEAL_THRESHOLD,
            reveal_root_margin: consts::REVEAL_ROOT_MARGIN.to_owned(),
            counter_threshold: consts::COUNTER_THRESHOLD,
            counter_duration_ms: consts::COUNTER_DURATION_MS,
            typing_effect: false,
            typing_delay_ms: consts::TYPING_DELAY_MS,
            typing_speed_ms: consts::TYPING_SPEED_MS,
            log_level: "info".to_owned(),
        }
    }
}

impl PageConfig {
    /// Parse a config from its JSON attribute value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON or mistyped fields,
    /// [`ConfigError::LogLevel`] for an unrecognised `log_level` and
    /// [`ConfigError::Threshold`] for an intersection threshold outside
    /// `0.0..=1.0`.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.level_filter()?;
        for (field, value) in
            [("reveal_threshold", config.reveal_threshold), ("counter_threshold", config.counter_threshold)]
        {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Threshold { field, value });
            }
        }
        Ok(config)
    }

    /// Parsed form of [`PageConfig::log_level`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LogLevel`] when the name is not a log level.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level).map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// Intersection options for the reveal-on-scroll watcher.
    #[must_use]
    pub fn reveal_watch(&self) -> WatchOptions {
        WatchOptions { threshold: self.reveal_threshold, root_margin: self.reveal_root_margin.clone() }
    }

    /// Intersection options for the stat counter watcher.
    #[must_use]
    pub fn counter_watch(&self) -> WatchOptions {
        WatchOptions { threshold: self.counter_threshold, root_margin: WatchOptions::NO_MARGIN.to_owned() }
    }
}
