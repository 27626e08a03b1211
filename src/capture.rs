//! Routes tracker events to the host's still-capture facility.
//!
//! The surrounding application decides what an event is worth: every
//! qualifying head turn requests a capture, while blinks only trigger the
//! shutter once the blink count reaches a configured value. The capture
//! itself is an injected [`CaptureSink`] so the router stays independent of
//! any camera plumbing.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use crate::tracker::{EventKind, EventListener};

/// Non-blocking still-capture facility provided by the host.
pub trait CaptureSink {
    /// Request a still image for `kind`. Must return quickly.
    fn take_picture(&mut self, kind: EventKind);
}

/// Sink that logs capture requests and remembers them, for replay sessions
/// and tests.
#[derive(Default)]
pub struct LoggingCaptureSink {
    requests: Vec<EventKind>,
}

impl LoggingCaptureSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture requests seen so far, in order.
    #[must_use]
    pub fn requests(&self) -> &[EventKind] {
        &self.requests
    }
}

impl CaptureSink for LoggingCaptureSink {
    fn take_picture(&mut self, kind: EventKind) {
        info!("capture requested for {kind:?}");
        self.requests.push(kind);
    }
}

/// Listener that turns tracker events into capture requests.
///
/// The sink is shared (`Rc<RefCell<..>>`) because every tracked face gets
/// its own router instance while the host has a single capture pipeline.
/// Everything runs on the one detection thread.
pub struct CaptureRouter {
    blink_capture_count: u32,
    capture_on_turn: bool,
    sink: Rc<RefCell<dyn CaptureSink>>,
}

impl CaptureRouter {
    #[must_use]
    pub fn new(
        blink_capture_count: u32,
        capture_on_turn: bool,
        sink: Rc<RefCell<dyn CaptureSink>>,
    ) -> Self {
        Self {
            blink_capture_count,
            capture_on_turn,
            sink,
        }
    }
}

impl EventListener for CaptureRouter {
    fn on_event(&mut self, count: u32, kind: EventKind) {
        match kind {
            EventKind::Blink => {
                info!("blink count: {count}");
                if count == self.blink_capture_count {
                    self.sink.borrow_mut().take_picture(kind);
                } else {
                    debug!("blink {count} below capture count {}", self.blink_capture_count);
                }
            }
            EventKind::LeftTurn | EventKind::RightTurn => {
                if self.capture_on_turn {
                    self.sink.borrow_mut().take_picture(kind);
                }
            }
        }
    }
}
