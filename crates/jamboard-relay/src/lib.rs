//! WebSocket relay server for the shared paint topic.
//!
//! The relay is a pure fan-out primitive: every paint event published by
//! a connected client is re-broadcast verbatim to all current subscribers
//! of the topic, the publisher included. Trust and correctness live at the
//! edges — the relay performs no validation, auth, or rate limiting.

pub mod connection;
pub mod server;
pub mod state;
pub mod topic;

pub use server::start_relay;
pub use state::RelayState;
pub use topic::{PaintTopic, Subscription};
