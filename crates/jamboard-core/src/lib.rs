//! Core types, config, and errors for Jamboard.

pub mod config;
pub mod error;
pub mod event;

pub use error::{JamboardError, Result};
pub use event::{PaintEvent, StrokeState};
