//! Configuration loading and accessors.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level Jamboard configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relay: Option<RelayConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,

    /// Name of the shared paint topic. There is exactly one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    /// Minimum interval between outbound `painting` publishes, in ms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throttle_ms: Option<u64>,
}

pub const DEFAULT_PORT: u16 = 9230;
pub const DEFAULT_TOPIC: &str = "paint_channel";
pub const DEFAULT_THROTTLE_MS: u64 = 8;

impl Config {
    /// Load configuration from a JSON5 file. A missing file yields defaults.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(crate::error::JamboardError::Io)?;

        let config: Config = json5::from_str(&raw)
            .map_err(|e| crate::error::JamboardError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Resolve the default config file path.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".jamboard")
            .join("jamboard.json")
    }

    /// Relay listen port.
    pub fn relay_port(&self) -> u16 {
        self.relay
            .as_ref()
            .and_then(|r| r.port)
            .unwrap_or(DEFAULT_PORT)
    }

    /// Relay bind address.
    pub fn relay_bind(&self) -> String {
        self.relay
            .as_ref()
            .and_then(|r| r.bind.clone())
            .unwrap_or_else(|| "0.0.0.0".to_string())
    }

    /// Name of the shared paint topic.
    pub fn topic(&self) -> String {
        self.relay
            .as_ref()
            .and_then(|r| r.topic.clone())
            .unwrap_or_else(|| DEFAULT_TOPIC.to_string())
    }

    /// Outbound publish throttle interval.
    pub fn throttle(&self) -> Duration {
        let ms = self
            .client
            .as_ref()
            .and_then(|c| c.throttle_ms)
            .unwrap_or(DEFAULT_THROTTLE_MS);
        Duration::from_millis(ms)
    }

    /// WebSocket URL for the client to connect to.
    pub fn server_url(&self) -> String {
        self.client
            .as_ref()
            .and_then(|c| c.server_url.clone())
            .unwrap_or_else(|| format!("ws://127.0.0.1:{}/ws", self.relay_port()))
    }
}
