use super::*;

#[test]
fn defaults_match_stock_page_behaviour() {
    let config = PageConfig::default();
    assert_eq!(config.storage_key, "theme");
    assert_eq!(config.default_theme, Theme::Dark);
    assert_eq!(config.transition_ms, 300);
    assert_eq!(config.click_feedback_ms, 300);
    assert_eq!(config.counter_duration_ms, 1500);
    assert!(!config.typing_effect);
    assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
}

#[test]
fn partial_json_fills_remaining_fields_with_defaults() {
    let config = PageConfig::from_json(r#"{ "typing_effect": true, "default_theme": "light" }"#).unwrap();
    assert!(config.typing_effect);
    assert_eq!(config.default_theme, Theme::Light);
    assert_eq!(config.storage_key, "theme");
    assert_eq!(config.reveal_root_margin, "0px 0px -50px 0px");
}

#[test]
fn empty_object_is_the_default_config() {
    assert_eq!(PageConfig::from_json("{}").unwrap(), PageConfig::default());
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = PageConfig::from_json("{ typing_effect: yes").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn unknown_theme_name_is_rejected() {
    let err = PageConfig::from_json(r#"{ "default_theme": "sepia" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn unknown_log_level_is_rejected() {
    let err = PageConfig::from_json(r#"{ "log_level": "chatty" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::LogLevel(level) if level == "chatty"));
}

#[test]
fn watch_options_carry_thresholds_and_margins() {
    let config = PageConfig::default();
    let reveal = config.reveal_watch();
    assert!((reveal.threshold - 0.1).abs() < f64::EPSILON);
    assert_eq!(reveal.root_margin, "0px 0px -50px 0px");
    let counter = config.counter_watch();
    assert!((counter.threshold - 0.5).abs() < f64::EPSILON);
    assert_eq!(counter.root_margin, "0px");
}

#[test]
fn thresholds_outside_unit_range_are_rejected() {
    let err = PageConfig::from_json(r#"{ "reveal_threshold": 5.0, "reveal_root_margin": "bogus" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Threshold { field: "reveal_threshold", .. }));

    let err = PageConfig::from_json(r#"{ "counter_threshold": -0.25 }"#).unwrap_err();
    assert_eq!(err.to_string(), "counter_threshold must be within 0.0..=1.0, got -0.25");

    let edges = PageConfig::from_json(r#"{ "reveal_threshold": 0.0, "counter_threshold": 1.0 }"#).unwrap();
    assert!((edges.counter_watch().threshold - 1.0).abs() < f64::EPSILON);
}
