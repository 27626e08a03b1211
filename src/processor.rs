//! Routes per-frame detection results to per-face trackers.
//!
//! The detection engine reports faces with stable ids; this module owns the
//! tracker lifecycle on top of that: a new id gets a fresh [`FaceTracker`],
//! a present id gets `on_update`, an absent id gets `on_missing`, and an id
//! that stays absent long enough is retired with `on_done` and dropped.
//!
//! Two focus modes are supported. `Multi` tracks every reported face with
//! its own independently-owned tracker. `Prominent` binds to the largest
//! face in view and ignores the rest until that face is retired.

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, info};

use crate::detection::FrameObservation;
use crate::tracker::{FaceTracker, TrackerState};

/// Which faces in a frame get tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    /// Track only the largest face in view
    Prominent,
    /// Track every face, one tracker per face id
    Multi,
}

/// Builds a tracker for a newly appeared face id.
///
/// The factory supplies each tracker's listener, overlay and optional angle
/// filter; the processor never shares state between trackers.
pub type TrackerFactory = Box<dyn FnMut(u32, Instant) -> FaceTracker>;

struct TrackedFace {
    tracker: FaceTracker,
    missing_frames: u32,
}

/// Owns and drives all live [`FaceTracker`] instances for one session.
pub struct FrameProcessor {
    mode: FocusMode,
    retire_after_missing: u32,
    factory: TrackerFactory,
    trackers: HashMap<u32, TrackedFace>,
    // Face id the processor is bound to in Prominent mode.
    focused_id: Option<u32>,
}

impl FrameProcessor {
    /// Create a processor.
    ///
    /// `retire_after_missing` is the number of consecutive frames a face may
    /// be absent before its tracker is retired; it must be at least 1.
    #[must_use]
    pub fn new(mode: FocusMode, retire_after_missing: u32, factory: TrackerFactory) -> Self {
        Self {
            mode,
            retire_after_missing: retire_after_missing.max(1),
            factory,
            trackers: HashMap::new(),
            focused_id: None,
        }
    }

    /// Feed one frame of detection results through the trackers.
    pub fn process(&mut self, now: Instant, frame: &FrameObservation) {
        match self.mode {
            FocusMode::Multi => self.process_multi(now, frame),
            FocusMode::Prominent => self.process_prominent(now, frame),
        }
    }

    fn process_multi(&mut self, now: Instant, frame: &FrameObservation) {
        for face in &frame.faces {
            let tracked = self.trackers.entry(face.id).or_insert_with(|| {
                info!("tracking new face {}", face.id);
                TrackedFace {
                    tracker: (self.factory)(face.id, now),
                    missing_frames: 0,
                }
            });
            tracked.missing_frames = 0;
            tracked.tracker.on_update(now, face);
        }

        self.mark_absent(frame);
    }

    fn process_prominent(&mut self, now: Instant, frame: &FrameObservation) {
        if let Some(id) = self.focused_id {
            if let Some(face) = frame.faces.iter().find(|f| f.id == id) {
                if let Some(tracked) = self.trackers.get_mut(&id) {
                    tracked.missing_frames = 0;
                    tracked.tracker.on_update(now, face);
                }
                return;
            }

            self.mark_absent(frame);
            if !self.trackers.is_empty() {
                return;
            }
            self.focused_id = None;
        }

        // Unbound: focus on the most prominent face in view, if any.
        if let Some(face) = frame.largest_face() {
            info!("focusing on face {}", face.id);
            let mut tracker = (self.factory)(face.id, now);
            tracker.on_update(now, face);
            self.trackers.insert(
                face.id,
                TrackedFace {
                    tracker,
                    missing_frames: 0,
                },
            );
            self.focused_id = Some(face.id);
        }
    }

    /// Mark trackers whose face is not in this frame, retiring any that
    /// exceeded the missing-frame budget.
    fn mark_absent(&mut self, frame: &FrameObservation) {
        let retire_after = self.retire_after_missing;
        let mut retired = Vec::new();

        for (&id, tracked) in &mut self.trackers {
            if frame.faces.iter().any(|f| f.id == id) {
                continue;
            }

            tracked.missing_frames += 1;
            tracked.tracker.on_missing();
            debug!(
                "face {} missing for {} frame(s)",
                id, tracked.missing_frames
            );

            if tracked.missing_frames >= retire_after {
                tracked.tracker.on_done();
                retired.push(id);
            }
        }

        for id in retired {
            info!("retiring face {id}");
            self.trackers.remove(&id);
        }
    }

    /// Retire every live tracker. Called when the detection session ends.
    pub fn end_session(&mut self) {
        for (id, mut tracked) in self.trackers.drain() {
            debug!("session end, retiring face {id}");
            tracked.tracker.on_done();
        }
        self.focused_id = None;
    }

    /// Number of live trackers.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.trackers.len()
    }

    /// Access a live tracker by face id.
    #[must_use]
    pub fn tracker(&self, id: u32) -> Option<&FaceTracker> {
        self.trackers.get(&id).map(|t| &t.tracker)
    }

    /// Ids of faces currently in the `Missing` state.
    #[must_use]
    pub fn missing_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .trackers
            .iter()
            .filter(|(_, t)| t.tracker.state() == TrackerState::Missing)
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{FaceBox, FaceObservation};
    use crate::tracker::{NullOverlay, TrackerParams};

    fn face(id: u32, size: f32) -> FaceObservation {
        FaceObservation {
            id,
            bbox: FaceBox::new(0.0, 0.0, size, size),
            landmarks: Vec::new(),
            left_eye_open: None,
            right_eye_open: None,
            yaw: 0.0,
            roll: 0.0,
        }
    }

    struct SilentListener;
    impl crate::tracker::EventListener for SilentListener {
        fn on_event(&mut self, _count: u32, _kind: crate::tracker::EventKind) {}
    }

    fn factory() -> TrackerFactory {
        Box::new(|_id, created_at| {
            FaceTracker::new(
                created_at,
                TrackerParams::default(),
                Box::new(SilentListener),
                Box::new(NullOverlay),
            )
        })
    }

    #[test]
    fn test_multi_mode_tracks_each_face() {
        let mut processor = FrameProcessor::new(FocusMode::Multi, 3, factory());
        let now = Instant::now();

        processor.process(now, &FrameObservation::new(vec![face(1, 100.0), face(2, 50.0)]));
        assert_eq!(processor.active_count(), 2);
    }

    #[test]
    fn test_prominent_mode_tracks_largest_only() {
        let mut processor = FrameProcessor::new(FocusMode::Prominent, 3, factory());
        let now = Instant::now();

        processor.process(now, &FrameObservation::new(vec![face(1, 50.0), face(2, 100.0)]));
        assert_eq!(processor.active_count(), 1);
        assert!(processor.tracker(2).is_some());
    }

    #[test]
    fn test_missing_then_retired() {
        let mut processor = FrameProcessor::new(FocusMode::Multi, 2, factory());
        let now = Instant::now();

        processor.process(now, &FrameObservation::new(vec![face(1, 100.0)]));
        assert_eq!(processor.active_count(), 1);

        processor.process(now, &FrameObservation::default());
        assert_eq!(processor.missing_ids(), vec![1]);

        processor.process(now, &FrameObservation::default());
        assert_eq!(processor.active_count(), 0);
    }

    #[test]
    fn test_prominent_rebinds_after_retirement() {
        let mut processor = FrameProcessor::new(FocusMode::Prominent, 1, factory());
        let now = Instant::now();

        processor.process(now, &FrameObservation::new(vec![face(1, 100.0)]));
        assert!(processor.tracker(1).is_some());

        // Face 1 disappears and is retired after one missing frame; the
        // processor is free to focus on face 2 next.
        processor.process(now, &FrameObservation::default());
        assert_eq!(processor.active_count(), 0);

        processor.process(now, &FrameObservation::new(vec![face(2, 80.0)]));
        assert!(processor.tracker(2).is_some());
    }
}
