//! Paint event wire types.
//!
//! A stroke travels as a flat sequence of `PaintEvent`s: one `start`,
//! zero or more `painting`, one `stop`. Coordinates are surface-local
//! pixels; the relay forwards events verbatim, so sender and receiver
//! surfaces are assumed to share dimensions.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Stroke lifecycle marker carried on every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeState {
    Start,
    Painting,
    Stop,
}

/// The only wire entity — one pointer sample within a stroke.
///
/// Wire shape: `{"x": 10.0, "y": 10.0, "state": "start"}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintEvent {
    pub x: f64,
    pub y: f64,
    pub state: StrokeState,
}

impl PaintEvent {
    pub fn start(x: f64, y: f64) -> Self {
        Self { x, y, state: StrokeState::Start }
    }

    pub fn painting(x: f64, y: f64) -> Self {
        Self { x, y, state: StrokeState::Painting }
    }

    pub fn stop(x: f64, y: f64) -> Self {
        Self { x, y, state: StrokeState::Stop }
    }

    /// Parse a wire frame. Callers drop-and-log on failure rather than
    /// tearing down the connection.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
