//! Recorded detection traces for offline replay.
//!
//! A trace is a YAML list of frames, each carrying the milliseconds elapsed
//! since the start of the recording and the faces the detection engine
//! reported for that frame. Replaying a trace through the processor
//! reproduces a live session without a camera or detection engine attached.

use crate::detection::FaceObservation;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One recorded frame of detection output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceFrame {
    /// Milliseconds since the start of the recording
    pub elapsed_ms: u64,

    /// Faces reported for this frame. Empty means no face was detected.
    #[serde(default)]
    pub faces: Vec<FaceObservation>,
}

/// Load a trace from a YAML file
pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<Vec<TraceFrame>> {
    let content = std::fs::read_to_string(path)?;
    parse_trace(&content)
}

/// Parse a trace from YAML content
pub fn parse_trace(content: &str) -> Result<Vec<TraceFrame>> {
    let frames: Vec<TraceFrame> =
        serde_yaml::from_str(content).map_err(|e| Error::Trace(format!("Failed to parse trace: {e}")))?;

    // Frame times must map onto a monotonic timeline.
    for pair in frames.windows(2) {
        if pair[1].elapsed_ms < pair[0].elapsed_ms {
            return Err(Error::Trace(format!(
                "Frame times must be non-decreasing, got {} after {}",
                pair[1].elapsed_ms, pair[0].elapsed_ms
            )));
        }
    }

    Ok(frames)
}

/// Example trace file content
pub const EXAMPLE_TRACE: &str = r#"# Recorded detection session: one face blinking twice, then turning left.
- elapsed_ms: 0
  faces:
    - id: 1
      bbox: { x: 40.0, y: 30.0, width: 240.0, height: 240.0 }
      landmarks:
        - { kind: left_eye, position: { x: 100.0, y: 110.0 } }
        - { kind: right_eye, position: { x: 200.0, y: 110.0 } }
      left_eye_open: 0.95
      right_eye_open: 0.93
      yaw: 2.0
      roll: 1.0
- elapsed_ms: 330
  faces:
    - id: 1
      bbox: { x: 40.0, y: 30.0, width: 240.0, height: 240.0 }
      left_eye_open: 0.05
      right_eye_open: 0.08
      yaw: 1.5
      roll: 0.5
- elapsed_ms: 2660
  faces:
    - id: 1
      bbox: { x: 42.0, y: 31.0, width: 238.0, height: 239.0 }
      left_eye_open: 0.03
      right_eye_open: 0.06
      yaw: 0.5
      roll: 0.0
- elapsed_ms: 5200
  faces:
    - id: 1
      bbox: { x: 60.0, y: 32.0, width: 230.0, height: 235.0 }
      left_eye_open: 0.9
      right_eye_open: 0.91
      yaw: -48.0
      roll: 3.0
"#;
