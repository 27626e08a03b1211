//! Configuration management for the blink detection application

use crate::constants::{
    DEFAULT_BLINK_CAPTURE_COUNT, DEFAULT_EXPONENTIAL_ALPHA, DEFAULT_MEDIAN_WINDOW,
    DEFAULT_MOVING_AVERAGE_WINDOW, DEFAULT_RETIRE_AFTER_MISSING, EVENT_COOLDOWN_MS,
    EYE_OPEN_THRESHOLD, TURN_ROLL_LIMIT_DEG, TURN_YAW_THRESHOLD_DEG,
};
use crate::processor::FocusMode;
use crate::tracker::TrackerParams;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Event tracker thresholds
    pub tracker: TrackerConfig,

    /// Face-to-tracker routing configuration
    pub processor: ProcessorConfig,

    /// Angle filter configuration
    pub filter: FilterConfig,

    /// Capture routing configuration
    pub capture: CaptureConfig,
}

/// Event tracker thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Probability above which an eye counts as open (0.0-1.0)
    pub eye_open_threshold: f32,

    /// Yaw magnitude in degrees that counts as a head turn
    pub turn_yaw_threshold: f32,

    /// Roll magnitude in degrees within which a turn is accepted
    pub turn_roll_limit: f32,

    /// Minimum interval between events of the same kind, in milliseconds
    pub event_cooldown_ms: u64,
}

/// Face-to-tracker routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Focus mode: "prominent" or "multi"
    pub mode: String,

    /// Consecutive missing frames before a tracker is retired
    pub retire_after_missing: u32,
}

/// Angle filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Default filter type ("none", "moving_average", "exponential", "median")
    pub default_filter: String,

    /// Moving average window size
    pub moving_average_window: usize,

    /// Exponential filter alpha value
    pub exponential_alpha: f32,

    /// Median filter window size
    pub median_window: usize,
}

/// Capture routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Blink count at which a still capture is requested
    pub blink_capture_count: u32,

    /// Request a capture on every head-turn event
    pub capture_on_turn: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            processor: ProcessorConfig::default(),
            filter: FilterConfig::default(),
            capture: CaptureConfig::default(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            eye_open_threshold: EYE_OPEN_THRESHOLD,
            turn_yaw_threshold: TURN_YAW_THRESHOLD_DEG,
            turn_roll_limit: TURN_ROLL_LIMIT_DEG,
            event_cooldown_ms: EVENT_COOLDOWN_MS,
        }
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            mode: "prominent".to_string(),
            retire_after_missing: DEFAULT_RETIRE_AFTER_MISSING,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_filter: "none".to_string(),
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            exponential_alpha: DEFAULT_EXPONENTIAL_ALPHA,
            median_window: DEFAULT_MEDIAN_WINDOW,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            blink_capture_count: DEFAULT_BLINK_CAPTURE_COUNT,
            capture_on_turn: true,
        }
    }
}

impl TrackerConfig {
    /// Tracker parameters derived from this configuration.
    #[must_use]
    pub fn params(&self) -> TrackerParams {
        TrackerParams {
            eye_open_threshold: self.eye_open_threshold,
            turn_yaw_threshold: self.turn_yaw_threshold,
            turn_roll_limit: self.turn_roll_limit,
            event_cooldown: Duration::from_millis(self.event_cooldown_ms),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// The configured focus mode
    pub fn focus_mode(&self) -> Result<FocusMode> {
        match self.processor.mode.as_str() {
            "prominent" => Ok(FocusMode::Prominent),
            "multi" => Ok(FocusMode::Multi),
            mode => Err(Error::Config(format!("Unknown focus mode: {mode}"))),
        }
    }

    /// Create an angle filter from configuration, or `None` for "none"
    pub fn create_filter(&self) -> Result<Option<Box<dyn crate::filters::AngleFilter>>> {
        use crate::filters::{
            create_filter, exponential::ExponentialFilter, median::MedianFilter,
            moving_average::MovingAverageFilter,
        };

        match self.filter.default_filter.as_str() {
            "none" => Ok(None),
            "moving_average" => Ok(Some(Box::new(MovingAverageFilter::new(
                self.filter.moving_average_window,
            )))),
            "exponential" => Ok(Some(Box::new(ExponentialFilter::new(
                self.filter.exponential_alpha,
            )))),
            "median" => Ok(Some(Box::new(MedianFilter::new(self.filter.median_window)))),
            name => create_filter(name).map(Some),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.tracker.eye_open_threshold) {
            return Err(Error::Config(
                "Eye open threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.tracker.turn_yaw_threshold <= 0.0 {
            return Err(Error::Config(
                "Turn yaw threshold must be greater than 0".to_string(),
            ));
        }
        if self.tracker.turn_roll_limit <= 0.0 {
            return Err(Error::Config(
                "Turn roll limit must be greater than 0".to_string(),
            ));
        }
        if self.tracker.event_cooldown_ms == 0 {
            return Err(Error::Config(
                "Event cooldown must be greater than 0".to_string(),
            ));
        }

        self.focus_mode()?;
        if self.processor.retire_after_missing == 0 {
            return Err(Error::Config(
                "Retire-after-missing frame count must be greater than 0".to_string(),
            ));
        }

        if self.filter.moving_average_window == 0 {
            return Err(Error::Config(
                "Moving average window size must be greater than 0".to_string(),
            ));
        }
        if self.filter.median_window == 0 || self.filter.median_window % 2 == 0 {
            return Err(Error::Config(
                "Median window size must be odd and greater than 0".to_string(),
            ));
        }
        if !(self.filter.exponential_alpha > 0.0 && self.filter.exponential_alpha <= 1.0) {
            return Err(Error::Config(
                "Exponential alpha must be in (0, 1]".to_string(),
            ));
        }

        if self.capture.blink_capture_count == 0 {
            return Err(Error::Config(
                "Blink capture count must be greater than 0".to_string(),
            ));
        }

        // Filter parameters were checked above; this rejects unknown names.
        self.create_filter()?;

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Eye Blink Detection Configuration

# Event tracker thresholds
tracker:
  eye_open_threshold: 0.4
  turn_yaw_threshold: 40.0
  turn_roll_limit: 20.0
  event_cooldown_ms: 2000

# Face-to-tracker routing
processor:
  mode: "prominent"
  retire_after_missing: 30

# Angle smoothing
filter:
  default_filter: "none"
  moving_average_window: 5
  exponential_alpha: 0.5
  median_window: 5

# Capture routing
capture:
  blink_capture_count: 2
  capture_on_turn: true
"#;
