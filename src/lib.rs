//! Blink and head-turn event detection on top of an external face detection
//! engine.
//!
//! The detection engine (camera capture, face finding, landmark extraction,
//! eye-open classification, head pose) lives outside this crate and reports
//! per-frame observations. This library turns that noisy stream into
//! debounced high-level events:
//!
//! 1. A per-face [`tracker::FaceTracker`] smooths missing landmarks via
//!    proportion caching, holds eye state across uncomputed frames, and
//!    debounces blink and head-turn events with per-kind cooldowns
//! 2. A [`processor::FrameProcessor`] owns the tracker lifecycle across
//!    frames (create, update, missing, retire)
//! 3. A [`capture::CaptureRouter`] decides which events are worth a still
//!    capture
//!
//! # Examples
//!
//! ```
//! use std::time::Instant;
//! use eye_blink_detection::detection::{FaceBox, FaceObservation};
//! use eye_blink_detection::tracker::{
//!     EventKind, EventListener, FaceTracker, NullOverlay, TrackerParams,
//! };
//!
//! struct PrintListener;
//!
//! impl EventListener for PrintListener {
//!     fn on_event(&mut self, count: u32, kind: EventKind) {
//!         println!("event #{count}: {kind:?}");
//!     }
//! }
//!
//! let start = Instant::now();
//! let mut tracker = FaceTracker::new(
//!     start,
//!     TrackerParams::default(),
//!     Box::new(PrintListener),
//!     Box::new(NullOverlay),
//! );
//!
//! // One frame with both eyes closed produces a blink event.
//! let face = FaceObservation {
//!     id: 1,
//!     bbox: FaceBox::new(0.0, 0.0, 200.0, 200.0),
//!     landmarks: Vec::new(),
//!     left_eye_open: Some(0.1),
//!     right_eye_open: Some(0.1),
//!     yaw: 0.0,
//!     roll: 0.0,
//! };
//! tracker.on_update(start, &face);
//! assert_eq!(tracker.blink_count(), 1);
//! ```
//!
//! Recorded sessions can be replayed offline through [`app::BlinkApp`]; see
//! the `eye-blink-detection` binary.

/// Data model for per-frame detection engine output
pub mod detection;

/// Per-face blink and head-turn event tracker
pub mod tracker;

/// Frame-to-tracker routing and tracker lifecycle
pub mod processor;

/// Capture routing for tracker events
pub mod capture;

/// Angle smoothing filters
pub mod filters;

/// Configuration management
pub mod config;

/// Recorded detection traces for offline replay
pub mod trace;

/// Trace replay application
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Error types and result handling
pub mod error;

pub use error::{Error, Result};
