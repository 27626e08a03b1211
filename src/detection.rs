//! Data model for per-frame output of the external face detection engine.
//!
//! The detection engine is an external collaborator: it finds faces, assigns
//! them stable numeric ids across frames, and reports landmark positions,
//! per-eye open probabilities and head rotation angles. Any of these may be
//! missing in a given frame (motion blur, partial occlusion), which is why
//! landmarks are a sparse list and eye probabilities are `Option`al.
//!
//! All types are serde-enabled so recorded detection sessions can be written
//! to and replayed from trace files (see the `trace` module).

use serde::{Deserialize, Serialize};

/// A 2D position in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned face bounding box: top-left origin plus width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FaceBox {
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Box area, used to pick the most prominent face in a frame.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Landmark identity tags as reported by the detection engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkKind {
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftEarTip,
    RightEarTip,
    NoseBase,
    LeftCheek,
    RightCheek,
    LeftMouth,
    RightMouth,
    BottomMouth,
}

/// A named anatomical point on a detected face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub kind: LandmarkKind,
    pub position: Point,
}

impl Landmark {
    #[must_use]
    pub fn new(kind: LandmarkKind, position: Point) -> Self {
        Self { kind, position }
    }
}

/// One face as reported by the detection engine for one frame.
///
/// `left_eye_open` / `right_eye_open` are `None` when the engine could not
/// compute a probability for that eye this frame (its "uncomputed"
/// sentinel); otherwise the value is in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    /// Stable face identity assigned by the engine's tracking layer.
    pub id: u32,

    /// Face bounding box in frame coordinates.
    pub bbox: FaceBox,

    /// Landmarks present this frame. May be empty.
    #[serde(default)]
    pub landmarks: Vec<Landmark>,

    /// Probability that the left eye is open, if computed.
    #[serde(default)]
    pub left_eye_open: Option<f32>,

    /// Probability that the right eye is open, if computed.
    #[serde(default)]
    pub right_eye_open: Option<f32>,

    /// Head yaw (Euler Y) in degrees. Negative is a turn to the left.
    #[serde(default)]
    pub yaw: f32,

    /// Head roll (Euler Z) in degrees.
    #[serde(default)]
    pub roll: f32,
}

impl FaceObservation {
    /// Look up a landmark reported this frame.
    #[must_use]
    pub fn landmark(&self, kind: LandmarkKind) -> Option<Point> {
        self.landmarks
            .iter()
            .find(|l| l.kind == kind)
            .map(|l| l.position)
    }
}

/// Everything the detection engine reported for a single frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameObservation {
    pub faces: Vec<FaceObservation>,
}

impl FrameObservation {
    #[must_use]
    pub fn new(faces: Vec<FaceObservation>) -> Self {
        Self { faces }
    }

    /// The face with the largest bounding box area, if any.
    #[must_use]
    pub fn largest_face(&self) -> Option<&FaceObservation> {
        self.faces
            .iter()
            .max_by(|a, b| a.bbox.area().total_cmp(&b.bbox.area()))
    }
}
