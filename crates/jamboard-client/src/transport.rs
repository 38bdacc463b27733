//! WebSocket transport glue.
//!
//! The core only needs a publish primitive and the three lifecycle
//! callbacks; everything about connection upgrade, auth, and retry stays
//! with the transport. No automatic reconnect is attempted here.

use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use jamboard_core::{JamboardError, PaintEvent, Result};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Upstream half of a paint connection.
#[async_trait]
pub trait PaintTransport: Send {
    async fn publish(&mut self, event: &PaintEvent) -> Result<()>;
}

/// Lifecycle callbacks consumed from the transport.
pub trait TransportEvents {
    fn on_connected(&mut self) {}
    fn on_disconnected(&mut self) {}
    fn on_message_received(&mut self, text: &str);
}

/// Sending half of a relay WebSocket connection.
pub struct WsPublisher {
    sink: SplitSink<WsStream, Message>,
}

/// Receiving half of a relay WebSocket connection.
pub struct WsInbound {
    stream: SplitStream<WsStream>,
}

/// Connect to the relay and split the socket into its two halves.
pub async fn connect(url: &str) -> Result<(WsPublisher, WsInbound)> {
    let (ws, _) = connect_async(url)
        .await
        .map_err(|e| JamboardError::Transport(e.to_string()))?;
    debug!(url, "Connected to relay");

    let (sink, stream) = ws.split();
    Ok((WsPublisher { sink }, WsInbound { stream }))
}

#[async_trait]
impl PaintTransport for WsPublisher {
    async fn publish(&mut self, event: &PaintEvent) -> Result<()> {
        let msg = event.to_json()?;
        self.sink
            .send(Message::Text(msg.into()))
            .await
            .map_err(|e| JamboardError::Transport(e.to_string()))
    }
}

impl WsInbound {
    /// Receive the next text frame. `None` means the connection is gone.
    pub async fn recv(&mut self) -> Option<String> {
        while let Some(msg_result) = self.stream.next().await {
            match msg_result {
                Ok(Message::Text(text)) => return Some(text.to_string()),
                Ok(Message::Close(_)) => return None,
                Ok(_) => continue,
                Err(e) => {
                    warn!(%e, "WebSocket error");
                    return None;
                }
            }
        }
        None
    }

    /// Drive a [`TransportEvents`] handler until the connection closes.
    pub async fn drive(&mut self, handler: &mut impl TransportEvents) {
        handler.on_connected();
        while let Some(text) = self.recv().await {
            handler.on_message_received(&text);
        }
        handler.on_disconnected();
    }
}
