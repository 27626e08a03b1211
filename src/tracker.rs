//! Per-face blink and head-turn event tracker.
//!
//! This module converts raw, possibly-incomplete per-frame face observations
//! into debounced high-level events (blink, head-turn-left, head-turn-right).
//! To compensate for intermediate frames where the face was detected but one
//! or both eyes were not, the tracker remembers each landmark's position as a
//! proportion of the face bounding box and interpolates from those
//! proportions when a landmark is missing. Missing landmarks are common
//! during quick movements due to camera image blurring.
//!
//! One `FaceTracker` instance owns the state of exactly one tracked face.
//! Events are delivered synchronously through an injected [`EventListener`];
//! the visual representation is driven through an injected [`FaceOverlay`].

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::debug;

use crate::constants::{
    EVENT_COOLDOWN_MS, EYE_OPEN_THRESHOLD, TURN_ROLL_LIMIT_DEG, TURN_YAW_THRESHOLD_DEG,
};
use crate::detection::{FaceObservation, LandmarkKind, Point};
use crate::filters::AngleFilter;

/// High-level events emitted by a [`FaceTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Both-eyes blink
    Blink,
    /// Head turned past the yaw threshold to the left
    LeftTurn,
    /// Head turned past the yaw threshold to the right
    RightTurn,
}

/// Receives debounced tracker events.
///
/// Invoked synchronously from `on_update`, once per qualifying event, with
/// the face's current blink count. Implementations are expected to return
/// quickly; anything slow (image capture, UI work) should be deferred by the
/// host.
pub trait EventListener {
    fn on_event(&mut self, count: u32, kind: EventKind);
}

/// Resolved eye and ear positions pushed to the overlay each frame.
///
/// Positions are `None` when the landmark was absent this frame and no
/// cached proportion exists yet to approximate it from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EyesUpdate {
    pub left_eye: Option<Point>,
    pub right_eye: Option<Point>,
    pub left_ear: Option<Point>,
    pub right_ear: Option<Point>,
    pub left_open: bool,
    pub right_open: bool,
}

/// Visual representation of a tracked face, owned by the host renderer.
pub trait FaceOverlay {
    /// New resolved positions for this frame.
    fn update_eyes(&mut self, eyes: &EyesUpdate);

    /// The face was not detected this frame; hide the visuals.
    fn hide(&mut self);

    /// The face is gone for good; remove the visuals.
    fn clear(&mut self);
}

/// No-op overlay for headless operation.
pub struct NullOverlay;

impl FaceOverlay for NullOverlay {
    fn update_eyes(&mut self, _eyes: &EyesUpdate) {}

    fn hide(&mut self) {}

    fn clear(&mut self) {}
}

/// Tracker lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// Face is currently detected and updates are flowing
    Active,
    /// Face was not detected in the most recent frame
    Missing,
    /// Face is presumed permanently gone; terminal
    Done,
}

/// Thresholds governing event evaluation.
#[derive(Debug, Clone)]
pub struct TrackerParams {
    /// Probability above which an eye is classified as open
    pub eye_open_threshold: f32,

    /// Yaw magnitude in degrees beyond which the head counts as turned
    pub turn_yaw_threshold: f32,

    /// Roll magnitude in degrees within which a turn is still accepted
    pub turn_roll_limit: f32,

    /// Minimum interval between successive events of the same kind
    pub event_cooldown: Duration,
}

impl Default for TrackerParams {
    fn default() -> Self {
        Self {
            eye_open_threshold: EYE_OPEN_THRESHOLD,
            turn_yaw_threshold: TURN_YAW_THRESHOLD_DEG,
            turn_roll_limit: TURN_ROLL_LIMIT_DEG,
            event_cooldown: Duration::from_millis(EVENT_COOLDOWN_MS),
        }
    }
}

/// Tracks eye positions and state for one face over time.
pub struct FaceTracker {
    params: TrackerParams,
    listener: Box<dyn EventListener>,
    overlay: Box<dyn FaceOverlay>,
    angle_filter: Option<Box<dyn AngleFilter>>,

    state: TrackerState,

    // Previously seen proportions of landmark locations relative to the face
    // bounding box, used to approximate a landmark's position when it is
    // missing from the current frame. Never cleared for the life of the
    // tracker.
    previous_proportions: HashMap<LandmarkKind, Point>,

    // Previous eye open state, reused for frames that lack a computed
    // eye-open probability.
    previous_left_open: bool,
    previous_right_open: bool,

    blink_count: u32,
    last_blink: Option<Instant>,
    last_left_turn: Instant,
    last_right_turn: Instant,
}

impl FaceTracker {
    /// Create a tracker for a newly appeared face.
    ///
    /// `created_at` seeds the turn cooldowns, so no turn event can fire
    /// within the first cooldown interval of the tracker's life. The blink
    /// cooldown starts unset and the first qualifying blink fires
    /// immediately.
    #[must_use]
    pub fn new(
        created_at: Instant,
        params: TrackerParams,
        listener: Box<dyn EventListener>,
        overlay: Box<dyn FaceOverlay>,
    ) -> Self {
        Self {
            params,
            listener,
            overlay,
            angle_filter: None,
            state: TrackerState::Active,
            previous_proportions: HashMap::new(),
            previous_left_open: true,
            previous_right_open: true,
            blink_count: 0,
            last_blink: None,
            last_left_turn: created_at,
            last_right_turn: created_at,
        }
    }

    /// Smooth yaw/roll through `filter` before threshold evaluation.
    #[must_use]
    pub fn with_angle_filter(mut self, filter: Box<dyn AngleFilter>) -> Self {
        self.angle_filter = Some(filter);
        self
    }

    #[must_use]
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Blinks observed over this face's lifetime.
    #[must_use]
    pub fn blink_count(&self) -> u32 {
        self.blink_count
    }

    /// Consume one detection update for this face.
    ///
    /// `now` must come from a monotonic clock and be non-decreasing across
    /// calls. Ignored entirely once the tracker is `Done`.
    pub fn on_update(&mut self, now: Instant, face: &FaceObservation) {
        if self.state == TrackerState::Done {
            return;
        }
        self.state = TrackerState::Active;

        self.update_previous_proportions(face);

        let (yaw, roll) = match self.angle_filter.as_mut() {
            Some(filter) => filter.apply(face.yaw, face.roll),
            None => (face.yaw, face.roll),
        };
        self.evaluate_turns(now, yaw, roll);

        let left_eye = self.landmark_position(face, LandmarkKind::LeftEye);
        let right_eye = self.landmark_position(face, LandmarkKind::RightEye);
        let left_ear = self.landmark_position(face, LandmarkKind::LeftEar);
        let right_ear = self.landmark_position(face, LandmarkKind::RightEar);

        let left_open = match face.left_eye_open {
            None => self.previous_left_open,
            Some(score) => {
                let open = score > self.params.eye_open_threshold;
                self.previous_left_open = open;
                open
            }
        };

        let right_open = match face.right_eye_open {
            None => self.previous_right_open,
            Some(score) => {
                let open = score > self.params.eye_open_threshold;
                self.previous_right_open = open;
                open
            }
        };

        // The closed check reads the held-state fields, which the
        // classification above has already overwritten for any eye with a
        // computed probability this frame. An eye whose probability was
        // uncomputed is judged on its held value.
        if (!self.previous_left_open || !self.previous_right_open) && self.blink_cooldown_elapsed(now)
        {
            self.last_blink = Some(now);
            self.blink_count += 1;
            debug!("blink #{} detected", self.blink_count);
            self.listener.on_event(self.blink_count, EventKind::Blink);
        }

        self.overlay.update_eyes(&EyesUpdate {
            left_eye,
            right_eye,
            left_ear,
            right_ear,
            left_open,
            right_open,
        });
    }

    /// The face was not detected this frame.
    ///
    /// Counters, cooldowns and the proportion cache are untouched, so
    /// detection may resume seamlessly; only the visuals are hidden and any
    /// angle filter is reset across the gap.
    pub fn on_missing(&mut self) {
        if self.state == TrackerState::Done {
            return;
        }
        self.state = TrackerState::Missing;
        if let Some(filter) = self.angle_filter.as_mut() {
            filter.reset();
        }
        self.overlay.hide();
    }

    /// The face is presumed permanently gone. Terminal.
    pub fn on_done(&mut self) {
        if self.state == TrackerState::Done {
            return;
        }
        debug!("tracker done after {} blinks", self.blink_count);
        self.state = TrackerState::Done;
        self.overlay.clear();
    }

    fn evaluate_turns(&mut self, now: Instant, yaw: f32, roll: f32) {
        let upright = roll > -self.params.turn_roll_limit && roll < self.params.turn_roll_limit;

        if yaw < -self.params.turn_yaw_threshold
            && upright
            && self.cooldown_elapsed(now, self.last_left_turn)
        {
            self.last_left_turn = now;
            debug!("left turn at yaw {yaw:.1}");
            self.listener.on_event(self.blink_count, EventKind::LeftTurn);
        } else if yaw > self.params.turn_yaw_threshold
            && upright
            && self.cooldown_elapsed(now, self.last_right_turn)
        {
            self.last_right_turn = now;
            debug!("right turn at yaw {yaw:.1}");
            self.listener.on_event(self.blink_count, EventKind::RightTurn);
        }
    }

    fn cooldown_elapsed(&self, now: Instant, last: Instant) -> bool {
        now.duration_since(last) > self.params.event_cooldown
    }

    fn blink_cooldown_elapsed(&self, now: Instant) -> bool {
        match self.last_blink {
            None => true,
            Some(last) => self.cooldown_elapsed(now, last),
        }
    }

    fn update_previous_proportions(&mut self, face: &FaceObservation) {
        for landmark in &face.landmarks {
            let x_prop = (landmark.position.x - face.bbox.x) / face.bbox.width;
            let y_prop = (landmark.position.y - face.bbox.y) / face.bbox.height;
            self.previous_proportions
                .insert(landmark.kind, Point::new(x_prop, y_prop));
        }
    }

    /// Finds a landmark position, or approximates it from the cached
    /// proportions if it is not present this frame.
    fn landmark_position(&self, face: &FaceObservation, kind: LandmarkKind) -> Option<Point> {
        if let Some(position) = face.landmark(kind) {
            return Some(position);
        }

        let prop = self.previous_proportions.get(&kind)?;
        Some(Point::new(
            face.bbox.x + prop.x * face.bbox.width,
            face.bbox.y + prop.y * face.bbox.height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{FaceBox, Landmark};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        events: Rc<RefCell<Vec<(u32, EventKind)>>>,
    }

    impl EventListener for Recorder {
        fn on_event(&mut self, count: u32, kind: EventKind) {
            self.events.borrow_mut().push((count, kind));
        }
    }

    fn tracker_with_recorder(created_at: Instant) -> (FaceTracker, Rc<RefCell<Vec<(u32, EventKind)>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let tracker = FaceTracker::new(
            created_at,
            TrackerParams::default(),
            Box::new(Recorder {
                events: Rc::clone(&events),
            }),
            Box::new(NullOverlay),
        );
        (tracker, events)
    }

    fn neutral_face() -> FaceObservation {
        FaceObservation {
            id: 0,
            bbox: FaceBox::new(0.0, 0.0, 200.0, 200.0),
            landmarks: Vec::new(),
            left_eye_open: None,
            right_eye_open: None,
            yaw: 0.0,
            roll: 0.0,
        }
    }

    #[test]
    fn test_blink_on_closed_eye() {
        let start = Instant::now();
        let (mut tracker, events) = tracker_with_recorder(start);

        let mut face = neutral_face();
        face.left_eye_open = Some(0.1);
        face.right_eye_open = Some(0.9);

        tracker.on_update(start, &face);

        assert_eq!(tracker.blink_count(), 1);
        assert_eq!(events.borrow().as_slice(), &[(1, EventKind::Blink)]);
    }

    #[test]
    fn test_uncomputed_probability_holds_open_state() {
        let start = Instant::now();
        let (mut tracker, events) = tracker_with_recorder(start);

        // Eyes default to open; a run of frames with uncomputed
        // probabilities must never produce a blink.
        let face = neutral_face();
        for i in 0..10 {
            tracker.on_update(start + Duration::from_millis(i * 100), &face);
        }

        assert_eq!(tracker.blink_count(), 0);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_turn_events_respect_initial_cooldown() {
        let start = Instant::now();
        let (mut tracker, events) = tracker_with_recorder(start);

        let mut face = neutral_face();
        face.yaw = -45.0;

        // Turn cooldowns are seeded at construction time.
        tracker.on_update(start + Duration::from_millis(500), &face);
        assert!(events.borrow().is_empty());

        tracker.on_update(start + Duration::from_millis(2100), &face);
        assert_eq!(events.borrow().as_slice(), &[(0, EventKind::LeftTurn)]);
    }

    #[test]
    fn test_turn_rejected_when_tilted() {
        let start = Instant::now();
        let (mut tracker, events) = tracker_with_recorder(start);

        let mut face = neutral_face();
        face.yaw = 45.0;
        face.roll = 25.0;

        tracker.on_update(start + Duration::from_millis(3000), &face);
        assert!(events.borrow().is_empty());

        face.roll = 5.0;
        tracker.on_update(start + Duration::from_millis(3100), &face);
        assert_eq!(events.borrow().as_slice(), &[(0, EventKind::RightTurn)]);
    }

    #[test]
    fn test_landmark_interpolation_from_cached_proportion() {
        let start = Instant::now();
        let events = Rc::new(RefCell::new(Vec::new()));
        let updates = Rc::new(RefCell::new(Vec::new()));

        struct CapturingOverlay {
            updates: Rc<RefCell<Vec<EyesUpdate>>>,
        }
        impl FaceOverlay for CapturingOverlay {
            fn update_eyes(&mut self, eyes: &EyesUpdate) {
                self.updates.borrow_mut().push(*eyes);
            }
            fn hide(&mut self) {}
            fn clear(&mut self) {}
        }

        let mut tracker = FaceTracker::new(
            start,
            TrackerParams::default(),
            Box::new(Recorder {
                events: Rc::clone(&events),
            }),
            Box::new(CapturingOverlay {
                updates: Rc::clone(&updates),
            }),
        );

        let mut face = neutral_face();
        face.landmarks = vec![Landmark::new(
            LandmarkKind::LeftEye,
            Point::new(100.0, 50.0),
        )];
        tracker.on_update(start, &face);

        // Cached proportion is (0.5, 0.25); with the bbox unchanged, the
        // approximated position must match the last observed one.
        face.landmarks.clear();
        tracker.on_update(start + Duration::from_millis(33), &face);

        let updates = updates.borrow();
        assert_eq!(updates[1].left_eye, Some(Point::new(100.0, 50.0)));
        assert_eq!(updates[1].right_eye, None);
    }

    #[test]
    fn test_done_is_terminal() {
        let start = Instant::now();
        let (mut tracker, events) = tracker_with_recorder(start);

        tracker.on_done();
        assert_eq!(tracker.state(), TrackerState::Done);

        let mut face = neutral_face();
        face.left_eye_open = Some(0.0);
        face.right_eye_open = Some(0.0);
        tracker.on_update(start + Duration::from_millis(100), &face);

        assert_eq!(tracker.state(), TrackerState::Done);
        assert!(events.borrow().is_empty());
    }
}
