//! Drawing surface abstraction.
//!
//! Each client owns two independent surfaces: a local one that tracks the
//! pointer at full fidelity, and a remote layer fed by the replayer.

/// One rendered line segment in surface-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Anything strokes can be rendered onto.
pub trait DrawSurface {
    fn draw_segment(&mut self, segment: Segment);
}

/// Surface that records every segment. Used by the headless client and tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub segments: Vec<Segment>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DrawSurface for RecordingSurface {
    fn draw_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }
}

/// Surface that discards everything.
#[derive(Debug, Default)]
pub struct NullSurface;

impl DrawSurface for NullSurface {
    fn draw_segment(&mut self, _segment: Segment) {}
}
