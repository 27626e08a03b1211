//! Constants used throughout the application

/// Probability above which an eye is classified as open
pub const EYE_OPEN_THRESHOLD: f32 = 0.4;

/// Yaw magnitude in degrees beyond which the head counts as turned
pub const TURN_YAW_THRESHOLD_DEG: f32 = 40.0;

/// Roll magnitude in degrees within which a turn is still accepted
pub const TURN_ROLL_LIMIT_DEG: f32 = 20.0;

/// Minimum interval between successive events of the same kind
pub const EVENT_COOLDOWN_MS: u64 = 2000;

/// Blink count at which the capture router requests a still image
pub const DEFAULT_BLINK_CAPTURE_COUNT: u32 = 2;

/// Consecutive missing frames before a tracker is retired
pub const DEFAULT_RETIRE_AFTER_MISSING: u32 = 30;

/// Default window sizes for filters
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 5;
pub const DEFAULT_MEDIAN_WINDOW: usize = 5;

/// Default exponential filter smoothing factor
pub const DEFAULT_EXPONENTIAL_ALPHA: f32 = 0.5;
