//! Light/dark theme controller.
//!
//! Reads the persisted preference, applies one of two mutually exclusive mode
//! classes to the body, keeps the toggle control's glyph in sync and writes
//! the preference back on every explicit change.
//!
//! TRADE-OFFS
//! ==========
//! Applying the theme at load and adopting the OS color scheme do not
//! persist anything. Only an explicit `set`/`toggle` writes the store, so the
//! page keeps following the OS until the visitor makes a choice, and ignores
//! it forever after.
//!
//! Each toggle arms its own 300ms timer to drop `theme-transitioning`.
//! Rapid toggles are not coalesced; an early removal may cut a later
//! animation short.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::PageConfig;
use crate::consts;
use crate::dom::{Dom, ElementId, Selector};
use crate::error::ConfigError;
use crate::scheduler::{Scheduler, Task};
use crate::store::KeyValueStore;

/// The two visual modes of the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Persisted string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Body class for this mode.
    #[must_use]
    pub fn mode_class(self) -> &'static str {
        match self {
            Self::Light => consts::LIGHT_MODE_CLASS,
            Self::Dark => consts::DARK_MODE_CLASS,
        }
    }

    /// Toggle glyph: a moon offers dark while light is active, a sun offers light.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => consts::MOON_ICON,
            Self::Dark => consts::SUN_ICON,
        }
    }

    /// Theme matching a `prefers-color-scheme: dark` result.
    #[must_use]
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ConfigError::UnknownTheme(other.to_owned())),
        }
    }
}

/// Theme operations bound to one storage key.
#[derive(Clone, Debug)]
pub struct ThemeController {
    storage_key: String,
    fallback: Theme,
    transition_ms: u32,
}

impl Default for ThemeController {
    fn default() -> Self {
        Self::new(&PageConfig::default())
    }
}

impl ThemeController {
    #[must_use]
    pub fn new(config: &PageConfig) -> Self {
        Self {
            storage_key: config.storage_key.clone(),
            fallback: config.default_theme,
            transition_ms: config.transition_ms,
        }
    }

    /// The persisted preference, if one was ever written and is recognised.
    #[must_use]
    pub fn stored(&self, store: &impl KeyValueStore) -> Option<Theme> {
        let raw = store.get(&self.storage_key)?;
        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(err) => {
                log::debug!("theme: ignoring stored value: {err}");
                None
            }
        }
    }

    /// The persisted preference, or the fallback (dark) when none is stored.
    #[must_use]
    pub fn current(&self, store: &impl KeyValueStore) -> Theme {
        self.stored(store).unwrap_or(self.fallback)
    }

    /// Swap the body mode classes and the toggle glyph without persisting.
    pub fn apply(&self, dom: &mut impl Dom, theme: Theme) {
        if let Some(body) = dom.body() {
            dom.add_class(body, theme.mode_class());
            dom.remove_class(body, theme.opposite().mode_class());
        }
        if let Some(toggle) = dom.query_first(&Selector::Id(consts::THEME_TOGGLE_ID)) {
            dom.set_text(toggle, theme.icon());
        }
    }

    /// Apply `theme` and persist it as the visitor's explicit choice.
    pub fn set(&self, dom: &mut impl Dom, store: &mut impl KeyValueStore, theme: Theme) {
        self.apply(dom, theme);
        store.set(&self.storage_key, theme.as_str());
    }

    /// Switch to the opposite theme with a transient transition class.
    pub fn toggle(
        &self,
        dom: &mut impl Dom,
        store: &mut impl KeyValueStore,
        timers: &mut impl Scheduler,
    ) -> Theme {
        let next = self.current(store).opposite();
        if let Some(body) = dom.body() {
            dom.add_class(body, consts::THEME_TRANSITIONING_CLASS);
            timers.after(
                self.transition_ms,
                Task::RemoveClass { target: body, class: consts::THEME_TRANSITIONING_CLASS },
            );
        }
        self.set(dom, store, next);
        log::debug!("theme: toggled to {next}");
        next
    }

    /// Apply the current theme and make sure the toggle control exists.
    ///
    /// Returns the toggle control so the caller can route its clicks.
    pub fn init(&self, dom: &mut impl Dom, store: &impl KeyValueStore) -> Option<ElementId> {
        let theme = self.current(store);
        self.apply(dom, theme);

        let toggle = match dom.query_first(&Selector::Id(consts::THEME_TOGGLE_ID)) {
            Some(existing) => existing,
            None => {
                let body = dom.body()?;
                let created = dom.create("button")?;
                dom.set_attribute(created, "id", consts::THEME_TOGGLE_ID);
                dom.add_class(created, consts::THEME_TOGGLE_CLASS);
                dom.append(body, created);
                created
            }
        };
        dom.set_attribute(toggle, "aria-label", consts::THEME_TOGGLE_LABEL);
        dom.set_text(toggle, theme.icon());
        Some(toggle)
    }

    /// Follow an OS color-scheme change unless the visitor chose a theme.
    ///
    /// Returns `true` when the change was adopted.
    pub fn on_system_change(&self, dom: &mut impl Dom, store: &impl KeyValueStore, prefers_dark: bool) -> bool {
        if store.get(&self.storage_key).is_some() {
            log::debug!("theme: explicit preference stored, ignoring OS change");
            return false;
        }
        self.apply(dom, Theme::from_prefers_dark(prefers_dark));
        true
    }
}
