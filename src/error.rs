//! Error types for configuration and browser binding.
//!
//! Nothing here surfaces to the visitor. Errors are logged and the affected
//! feature falls back to its defaults or stays inert.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Error returned while reading [`crate::config::PageConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration attribute is not valid JSON for `PageConfig`.
    #[error("invalid page config: {0}")]
    Json(#[from] serde_json::Error),
    /// A theme name other than `light` or `dark`.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
    /// A log level `log::LevelFilter` does not recognise.
    #[error("unknown log level: {0}")]
    LogLevel(String),
    /// An intersection threshold outside `0.0..=1.0`.
    #[error("{field} must be within 0.0..=1.0, got {value}")]
    Threshold { field: &'static str, value: f64 },
}

/// Error raised while wiring the page to the browser.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("no global window")]
    MissingWindow,
    #[error("window has no document")]
    MissingDocument,
    #[error("document has no body")]
    MissingBody,
    /// A DOM call threw; the payload is the debug rendering of the thrown value.
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(feature = "hydrate")]
impl From<wasm_bindgen::JsValue> for BindError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}
