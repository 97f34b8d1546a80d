//! Shared names and default timings for the page-interaction layer.

// ── Theme ───────────────────────────────────────────────────────

/// Storage key holding the persisted theme preference.
pub const THEME_STORAGE_KEY: &str = "theme";

pub const LIGHT_MODE_CLASS: &str = "light-mode";
pub const DARK_MODE_CLASS: &str = "dark-mode";

/// Present on the body while a theme swap animates.
pub const THEME_TRANSITIONING_CLASS: &str = "theme-transitioning";

pub const THEME_TOGGLE_ID: &str = "theme-toggle";
pub const THEME_TOGGLE_CLASS: &str = "theme-toggle";
pub const THEME_TOGGLE_LABEL: &str = "Toggle theme";

/// Glyph shown while the light theme is active (offers dark).
pub const MOON_ICON: &str = "🌙";
/// Glyph shown while the dark theme is active (offers light).
pub const SUN_ICON: &str = "☀️";

/// Media query used for the operating-system color-scheme signal.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

// ── Reveal / counter ────────────────────────────────────────────

pub const SECTION_CLASS: &str = "section";
pub const FADE_OUT_CLASS: &str = "fade-out";
pub const FADE_IN_CLASS: &str = "fade-in";

pub const STAT_NUMBER_CLASS: &str = "stat-number";
pub const COUNTED_CLASS: &str = "counted";

// ── Click affordances ───────────────────────────────────────────

pub const CTA_BUTTON_CLASS: &str = "cta-button";
pub const PROJECT_CARD_CLASS: &str = "project-card";
pub const CONTACT_CARD_CLASS: &str = "contact-card";
pub const CLICKED_CLASS: &str = "clicked";
pub const RIPPLE_CLASS: &str = "ripple";

// ── Scroll-to-top ───────────────────────────────────────────────

pub const SCROLL_TOP_ID: &str = "scroll-to-top";
pub const SCROLL_TOP_CLASS: &str = "scroll-to-top";
pub const SCROLL_TOP_LABEL: &str = "Scroll to top";
pub const SCROLL_TOP_ICON: &str = "↑";
pub const VISIBLE_CLASS: &str = "visible";

// ── Typing effect ───────────────────────────────────────────────

pub const HERO_CLASS: &str = "hero";
pub const HERO_HEADING_TAG: &str = "h1";

// ── Default timings (milliseconds) and thresholds ───────────────

pub const THEME_TRANSITION_MS: u32 = 300;
pub const CLICK_FEEDBACK_MS: u32 = 300;
pub const COUNTER_DURATION_MS: u32 = 1500;
pub const TYPING_DELAY_MS: u32 = 500;
pub const TYPING_SPEED_MS: u32 = 100;

/// Vertical scroll offset (CSS pixels) past which the scroll-to-top control shows.
pub const SCROLL_TOP_THRESHOLD_PX: f64 = 500.0;

pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Shrinks the viewport's bottom edge so sections reveal slightly early.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const COUNTER_THRESHOLD: f64 = 0.5;

/// Body attribute that may carry a JSON [`crate::config::PageConfig`].
pub const CONFIG_ATTRIBUTE: &str = "data-portfolio-config";
