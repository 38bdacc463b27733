//! Local stroke capture and outbound throttling.
//!
//! Rendering and publishing are deliberately decoupled: every pointer
//! move draws on the local surface immediately, but `painting` events go
//! out at most once per throttle interval. `start` and `stop` always
//! bypass the throttle.

use std::time::{Duration, Instant};

use jamboard_core::config::DEFAULT_THROTTLE_MS;
use jamboard_core::PaintEvent;

use crate::surface::{DrawSurface, Segment};

/// Per-surface local stroke state.
///
/// The clock is an explicit `Instant` argument read by the caller on each
/// input event; there are no hidden timers.
#[derive(Debug)]
pub struct StrokeCapture {
    painting: bool,
    anchor: Option<(f64, f64)>,
    last_sent: Option<Instant>,
    throttle: Duration,
}

impl Default for StrokeCapture {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_THROTTLE_MS))
    }
}

impl StrokeCapture {
    pub fn new(throttle: Duration) -> Self {
        Self {
            painting: false,
            anchor: None,
            last_sent: None,
            throttle,
        }
    }

    pub fn is_painting(&self) -> bool {
        self.painting
    }

    /// Begin a stroke. Returns the `start` event to publish immediately.
    pub fn pointer_down(&mut self, x: f64, y: f64, now: Instant) -> PaintEvent {
        self.painting = true;
        self.anchor = Some((x, y));
        self.last_sent = Some(now);
        PaintEvent::start(x, y)
    }

    /// Track the pointer. The local segment is always drawn; the returned
    /// `painting` event is `Some` only when the throttle interval has
    /// elapsed since the last publish.
    pub fn pointer_move(
        &mut self,
        x: f64,
        y: f64,
        now: Instant,
        surface: &mut dyn DrawSurface,
    ) -> Option<PaintEvent> {
        if !self.painting {
            return None;
        }

        if let Some((ax, ay)) = self.anchor {
            surface.draw_segment(Segment::new(ax, ay, x, y));
        }
        self.anchor = Some((x, y));

        let due = match self.last_sent {
            Some(at) => now.duration_since(at) >= self.throttle,
            None => true,
        };
        if due {
            self.last_sent = Some(now);
            Some(PaintEvent::painting(x, y))
        } else {
            None
        }
    }

    /// End a stroke. Always returns the `stop` event — never throttled,
    /// and published defensively even if no stroke was in progress.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> PaintEvent {
        self.painting = false;
        self.anchor = Some((x, y));
        PaintEvent::stop(x, y)
    }
}
