//! Relay shared state.

use std::sync::Arc;

use jamboard_core::config::Config;

use crate::topic::PaintTopic;

/// Shared relay state accessible from all connections and handlers.
pub struct RelayState {
    pub config: Arc<Config>,
    pub topic: PaintTopic,
}

impl RelayState {
    pub fn new(config: Arc<Config>) -> Self {
        let topic = PaintTopic::new(config.topic());
        Self { config, topic }
    }
}
