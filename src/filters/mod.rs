//! Signal filtering algorithms for smoothing head rotation angles.
//!
//! Per-frame yaw/roll estimates from the detection engine carry
//! frame-to-frame jitter; near the turn thresholds that jitter can read as
//! repeated threshold crossings. These filters optionally smooth the angle
//! pair before the tracker evaluates it. The default is no filtering.

/// Moving average filter for simple smoothing
pub mod moving_average;

/// Exponential filter for responsive smoothing
pub mod exponential;

/// Median filter for outlier rejection
pub mod median;

use crate::Result;

/// Trait for all angle filters
pub trait AngleFilter: Send + Sync {
    /// Apply filter to a yaw/roll pair in degrees
    fn apply(&mut self, yaw: f32, roll: f32) -> (f32, f32);

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
pub struct NoFilter;

impl AngleFilter for NoFilter {
    fn apply(&mut self, yaw: f32, roll: f32) -> (f32, f32) {
        (yaw, roll)
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create an angle filter by type name
pub fn create_filter(filter_type: &str) -> Result<Box<dyn AngleFilter>> {
    match filter_type.to_lowercase().as_str() {
        "none" | "nofilter" => Ok(Box::new(NoFilter)),
        "moving_average" | "movingaverage" => Ok(Box::new(
            moving_average::MovingAverageFilter::new(crate::constants::DEFAULT_MOVING_AVERAGE_WINDOW),
        )),
        "exponential" => Ok(Box::new(exponential::ExponentialFilter::new(
            crate::constants::DEFAULT_EXPONENTIAL_ALPHA,
        ))),
        "median" => Ok(Box::new(median::MedianFilter::new(
            crate::constants::DEFAULT_MEDIAN_WINDOW,
        ))),
        _ => Err(crate::Error::Filter(format!(
            "Unknown filter type: {filter_type}"
        ))),
    }
}
