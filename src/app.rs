//! Main application module: replays recorded detection traces through the
//! tracking pipeline.
//!
//! The app owns the wiring the host platform would otherwise provide: it
//! builds a [`FrameProcessor`] from configuration, gives every tracked face
//! a capture-routing listener, maps recorded frame times onto a monotonic
//! timeline, and reports session totals at the end.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::info;

use crate::capture::{CaptureRouter, CaptureSink, LoggingCaptureSink};
use crate::config::Config;
use crate::detection::FrameObservation;
use crate::processor::{FrameProcessor, TrackerFactory};
use crate::tracker::{EventKind, EventListener, FaceTracker, NullOverlay};
use crate::trace::TraceFrame;
use crate::Result;

/// Totals accumulated over one replay session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: usize,
    pub blinks: u32,
    pub left_turns: u32,
    pub right_turns: u32,
    pub captures: usize,
}

#[derive(Default)]
struct SessionStats {
    blinks: u32,
    left_turns: u32,
    right_turns: u32,
}

/// Per-face listener: counts events for the session summary, then hands
/// them to the capture router.
struct AppListener {
    router: CaptureRouter,
    stats: Rc<RefCell<SessionStats>>,
}

impl EventListener for AppListener {
    fn on_event(&mut self, count: u32, kind: EventKind) {
        {
            let mut stats = self.stats.borrow_mut();
            match kind {
                EventKind::Blink => stats.blinks += 1,
                EventKind::LeftTurn => stats.left_turns += 1,
                EventKind::RightTurn => stats.right_turns += 1,
            }
        }
        self.router.on_event(count, kind);
    }
}

/// Trace replay application.
pub struct BlinkApp {
    processor: FrameProcessor,
    sink: Rc<RefCell<LoggingCaptureSink>>,
    stats: Rc<RefCell<SessionStats>>,
}

impl BlinkApp {
    /// Build the pipeline from a validated configuration.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let mode = config.focus_mode()?;
        let params = config.tracker.params();
        let capture = config.capture.clone();
        let filter_source = config.clone();

        let sink = Rc::new(RefCell::new(LoggingCaptureSink::new()));
        let stats = Rc::new(RefCell::new(SessionStats::default()));

        info!(
            "Initializing pipeline: mode {:?}, filter {}",
            mode, config.filter.default_filter
        );

        let factory: TrackerFactory = {
            let sink = Rc::clone(&sink);
            let stats = Rc::clone(&stats);
            Box::new(move |id, created_at| {
                info!("new tracker for face {id}");
                let dyn_sink: Rc<RefCell<dyn CaptureSink>> = sink.clone();
                let listener = AppListener {
                    router: CaptureRouter::new(
                        capture.blink_capture_count,
                        capture.capture_on_turn,
                        dyn_sink,
                    ),
                    stats: Rc::clone(&stats),
                };
                let tracker = FaceTracker::new(
                    created_at,
                    params.clone(),
                    Box::new(listener),
                    Box::new(NullOverlay),
                );
                // The filter name and parameters passed validate() above,
                // so this cannot fail here.
                match filter_source.create_filter().ok().flatten() {
                    Some(filter) => tracker.with_angle_filter(filter),
                    None => tracker,
                }
            })
        };

        let processor = FrameProcessor::new(mode, config.processor.retire_after_missing, factory);

        Ok(Self {
            processor,
            sink,
            stats,
        })
    }

    /// Replay recorded frames through the pipeline and summarize the session.
    pub fn run(&mut self, frames: &[TraceFrame]) -> Result<SessionSummary> {
        info!("Replaying {} frame(s)", frames.len());

        let start = Instant::now();
        for frame in frames {
            let now = start + Duration::from_millis(frame.elapsed_ms);
            let observation = FrameObservation::new(frame.faces.clone());
            self.processor.process(now, &observation);
        }
        self.processor.end_session();

        let stats = self.stats.borrow();
        let summary = SessionSummary {
            frames: frames.len(),
            blinks: stats.blinks,
            left_turns: stats.left_turns,
            right_turns: stats.right_turns,
            captures: self.sink.borrow().requests().len(),
        };

        info!(
            "Session complete: {} blink(s), {} left turn(s), {} right turn(s), {} capture(s)",
            summary.blinks, summary.left_turns, summary.right_turns, summary.captures
        );

        Ok(summary)
    }
}
