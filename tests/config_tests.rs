//! Tests for configuration loading and validation

use eye_blink_detection::config::{Config, EXAMPLE_CONFIG};
use eye_blink_detection::filters::AngleFilter;
use eye_blink_detection::processor::FocusMode;
use eye_blink_detection::Error;

#[test]
fn test_default_config_validates() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.focus_mode().unwrap(), FocusMode::Prominent);
}

#[test]
fn test_example_config_round_trips() {
    let config: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
    let serialized = serde_yaml::to_string(&config).unwrap();
    let reparsed: Config = serde_yaml::from_str(&serialized).unwrap();

    assert_eq!(
        reparsed.tracker.eye_open_threshold,
        config.tracker.eye_open_threshold
    );
    assert_eq!(reparsed.processor.mode, config.processor.mode);
    assert_eq!(
        reparsed.capture.blink_capture_count,
        config.capture.blink_capture_count
    );
}

#[test]
fn test_file_round_trip() {
    let path = std::env::temp_dir().join("eye-blink-detection-config-test.yaml");

    let mut config = Config::default();
    config.processor.mode = "multi".to_string();
    config.tracker.event_cooldown_ms = 1500;

    config.to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.processor.mode, "multi");
    assert_eq!(loaded.tracker.event_cooldown_ms, 1500);
}

#[test]
fn test_missing_file_is_io_error() {
    let result = Config::from_file("/nonexistent/config.yaml");
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_malformed_config_rejected() {
    let path = std::env::temp_dir().join("eye-blink-detection-bad-config-test.yaml");
    std::fs::write(&path, "tracker: [not, a, mapping]").unwrap();

    let result = Config::from_file(&path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_threshold_out_of_range_rejected() {
    let mut config = Config::default();
    config.tracker.eye_open_threshold = 1.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_cooldown_rejected() {
    let mut config = Config::default();
    config.tracker.event_cooldown_ms = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_unknown_mode_rejected() {
    let mut config = Config::default();
    config.processor.mode = "all".to_string();
    assert!(config.validate().is_err());
    assert!(config.focus_mode().is_err());
}

#[test]
fn test_zero_retirement_rejected() {
    let mut config = Config::default();
    config.processor.retire_after_missing = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_even_median_window_rejected() {
    let mut config = Config::default();
    config.filter.median_window = 4;
    assert!(config.validate().is_err());
}

#[test]
fn test_alpha_out_of_range_rejected() {
    let mut config = Config::default();
    config.filter.exponential_alpha = 0.0;
    assert!(config.validate().is_err());

    config.filter.exponential_alpha = 1.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_blink_capture_count_rejected() {
    let mut config = Config::default();
    config.capture.blink_capture_count = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_create_filter_from_config() {
    let mut config = Config::default();
    assert!(config.create_filter().unwrap().is_none());

    config.filter.default_filter = "median".to_string();
    let filter = config.create_filter().unwrap().unwrap();
    assert_eq!(filter.name(), "MedianFilter");

    config.filter.default_filter = "something_else".to_string();
    assert!(config.create_filter().is_err());
}
