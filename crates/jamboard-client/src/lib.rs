//! Stroke client — the edge half of the paint relay.
//!
//! One `StrokeClient` runs per connected drawing surface. It turns local
//! pointer interaction into throttled [`jamboard_core::PaintEvent`]s,
//! renders local strokes at full fidelity, and replays inbound remote
//! events onto a separate surface layer.

pub mod capture;
pub mod client;
pub mod replay;
pub mod surface;
pub mod transport;

pub use capture::StrokeCapture;
pub use client::{PointerInput, StrokeClient};
pub use replay::StrokeReplayer;
pub use surface::{DrawSurface, NullSurface, RecordingSurface, Segment};
pub use transport::{PaintTransport, WsInbound, WsPublisher};
