//! Remote stroke reconstruction.
//!
//! Inbound events are discrete, irregularly spaced points with only the
//! `state` field linking them. The replayer rebuilds continuous polylines
//! by anchoring on `start`/`stop` and drawing anchor-to-point segments
//! for each `painting` event. Sessions are keyed by peer so concurrent
//! strokes from different publishers cannot corrupt each other.

use std::collections::HashMap;

use jamboard_core::{PaintEvent, StrokeState};

use crate::surface::{DrawSurface, Segment};

/// Session key used when the transport carries no publisher identity.
pub const ANON_PEER: &str = "anon";

#[derive(Debug, Default)]
struct RemoteSession {
    active: bool,
    anchor: Option<(f64, f64)>,
}

/// Reconstructs remote strokes, one session per peer.
///
/// Sessions are never destroyed, only overwritten: a peer that drops
/// mid-stroke leaves a stale active session whose anchor the next
/// `start` replaces.
#[derive(Debug, Default)]
pub struct StrokeReplayer {
    sessions: HashMap<String, RemoteSession>,
}

impl StrokeReplayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one inbound event for a peer, rendering onto the remote layer.
    pub fn apply(&mut self, peer: &str, event: &PaintEvent, surface: &mut dyn DrawSurface) {
        let session = self.sessions.entry(peer.to_string()).or_default();

        match event.state {
            StrokeState::Start => {
                // A start only anchors the first point; nothing to draw yet.
                session.active = true;
                session.anchor = Some((event.x, event.y));
            }
            StrokeState::Painting => {
                if session.active {
                    if let Some((ax, ay)) = session.anchor {
                        surface.draw_segment(Segment::new(ax, ay, event.x, event.y));
                    }
                    session.anchor = Some((event.x, event.y));
                } else {
                    // Missed the start, or mid-stroke desync: re-anchor
                    // without drawing and pick the stroke up from here.
                    session.active = true;
                    session.anchor = Some((event.x, event.y));
                }
            }
            StrokeState::Stop => {
                // Anchors the final point, matching start handling.
                session.active = false;
                session.anchor = Some((event.x, event.y));
            }
        }
    }

    /// Apply an event with no publisher identity attached.
    pub fn apply_anonymous(&mut self, event: &PaintEvent, surface: &mut dyn DrawSurface) {
        self.apply(ANON_PEER, event, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    #[test]
    fn test_stroke_reconstruction() {
        // start{5,5}, painting{5,8}, painting{5,12}, stop{5,15} yields
        // segments (5,5)-(5,8) and (5,8)-(5,12); the stop coordinate only
        // anchors, it is never the far end of a segment.
        let mut replayer = StrokeReplayer::new();
        let mut surface = RecordingSurface::new();

        replayer.apply_anonymous(&PaintEvent::start(5.0, 5.0), &mut surface);
        replayer.apply_anonymous(&PaintEvent::painting(5.0, 8.0), &mut surface);
        replayer.apply_anonymous(&PaintEvent::painting(5.0, 12.0), &mut surface);
        replayer.apply_anonymous(&PaintEvent::stop(5.0, 15.0), &mut surface);

        assert_eq!(
            surface.segments,
            vec![
                Segment::new(5.0, 5.0, 5.0, 8.0),
                Segment::new(5.0, 8.0, 5.0, 12.0),
            ]
        );
        assert!(surface.segments.iter().all(|s| (s.x2, s.y2) != (5.0, 15.0)));
    }

    #[test]
    fn test_segments_form_connected_polyline() {
        let mut replayer = StrokeReplayer::new();
        let mut surface = RecordingSurface::new();

        replayer.apply_anonymous(&PaintEvent::start(0.0, 0.0), &mut surface);
        for i in 1..=10 {
            replayer.apply_anonymous(&PaintEvent::painting(i as f64, i as f64 * 2.0), &mut surface);
        }
        replayer.apply_anonymous(&PaintEvent::stop(99.0, 99.0), &mut surface);

        assert_eq!(surface.segments.len(), 10);
        for pair in surface.segments.windows(2) {
            assert_eq!((pair[0].x2, pair[0].y2), (pair[1].x1, pair[1].y1));
        }
    }

    #[test]
    fn test_start_alone_draws_nothing() {
        let mut replayer = StrokeReplayer::new();
        let mut surface = RecordingSurface::new();
        replayer.apply_anonymous(&PaintEvent::start(1.0, 1.0), &mut surface);
        assert!(surface.segments.is_empty());
    }

    #[test]
    fn test_painting_while_idle_anchors_without_drawing() {
        // Missed start: the first painting only re-anchors; the next one
        // draws from there.
        let mut replayer = StrokeReplayer::new();
        let mut surface = RecordingSurface::new();

        replayer.apply_anonymous(&PaintEvent::painting(2.0, 2.0), &mut surface);
        assert!(surface.segments.is_empty());

        replayer.apply_anonymous(&PaintEvent::painting(3.0, 3.0), &mut surface);
        assert_eq!(surface.segments, vec![Segment::new(2.0, 2.0, 3.0, 3.0)]);
    }

    #[test]
    fn test_stop_while_idle_only_anchors() {
        let mut replayer = StrokeReplayer::new();
        let mut surface = RecordingSurface::new();

        replayer.apply_anonymous(&PaintEvent::stop(4.0, 4.0), &mut surface);
        assert!(surface.segments.is_empty());

        // Next stroke starts cleanly from its own anchor.
        replayer.apply_anonymous(&PaintEvent::start(10.0, 10.0), &mut surface);
        replayer.apply_anonymous(&PaintEvent::painting(11.0, 10.0), &mut surface);
        assert_eq!(surface.segments, vec![Segment::new(10.0, 10.0, 11.0, 10.0)]);
    }

    #[test]
    fn test_next_start_discards_stale_anchor() {
        // A peer that vanished mid-stroke leaves an active session; a new
        // start overwrites the anchor instead of joining the old stroke.
        let mut replayer = StrokeReplayer::new();
        let mut surface = RecordingSurface::new();

        replayer.apply_anonymous(&PaintEvent::start(0.0, 0.0), &mut surface);
        replayer.apply_anonymous(&PaintEvent::painting(1.0, 1.0), &mut surface);
        // No stop — disconnect.
        replayer.apply_anonymous(&PaintEvent::start(50.0, 50.0), &mut surface);
        replayer.apply_anonymous(&PaintEvent::painting(51.0, 50.0), &mut surface);

        assert_eq!(
            surface.segments,
            vec![
                Segment::new(0.0, 0.0, 1.0, 1.0),
                Segment::new(50.0, 50.0, 51.0, 50.0),
            ]
        );
    }

    #[test]
    fn test_concurrent_peers_do_not_cross_talk() {
        let mut replayer = StrokeReplayer::new();
        let mut surface = RecordingSurface::new();

        // Two publishers interleaved on the wire.
        replayer.apply("a", &PaintEvent::start(0.0, 0.0), &mut surface);
        replayer.apply("b", &PaintEvent::start(100.0, 100.0), &mut surface);
        replayer.apply("a", &PaintEvent::painting(1.0, 0.0), &mut surface);
        replayer.apply("b", &PaintEvent::painting(101.0, 100.0), &mut surface);
        replayer.apply("a", &PaintEvent::stop(2.0, 0.0), &mut surface);
        replayer.apply("b", &PaintEvent::stop(102.0, 100.0), &mut surface);

        assert_eq!(
            surface.segments,
            vec![
                Segment::new(0.0, 0.0, 1.0, 0.0),
                Segment::new(100.0, 100.0, 101.0, 100.0),
            ]
        );
    }
}
