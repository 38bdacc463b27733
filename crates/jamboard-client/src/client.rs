//! The stroke client event loop.
//!
//! Pointer input and inbound network messages are handled on one task as
//! they arrive; all stroke session state lives here, so no locking is
//! needed.

use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use jamboard_core::PaintEvent;

use crate::capture::StrokeCapture;
use crate::replay::StrokeReplayer;
use crate::surface::DrawSurface;
use crate::transport::{PaintTransport, TransportEvents, WsInbound};

/// Raw pointer interaction on the local surface.
#[derive(Debug, Clone, Copy)]
pub enum PointerInput {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
}

/// One client per drawing surface: local capture on one layer, remote
/// replay on the other.
pub struct StrokeClient<L: DrawSurface, R: DrawSurface> {
    capture: StrokeCapture,
    replayer: StrokeReplayer,
    pub local: L,
    pub remote: R,
}

impl<L: DrawSurface, R: DrawSurface> StrokeClient<L, R> {
    pub fn new(capture: StrokeCapture, local: L, remote: R) -> Self {
        Self {
            capture,
            replayer: StrokeReplayer::new(),
            local,
            remote,
        }
    }

    /// Feed one pointer event through capture. Returns the event to
    /// publish upstream, if any survived the throttle.
    pub fn handle_pointer(&mut self, input: PointerInput, now: Instant) -> Option<PaintEvent> {
        match input {
            PointerInput::Down { x, y } => Some(self.capture.pointer_down(x, y, now)),
            PointerInput::Move { x, y } => self.capture.pointer_move(x, y, now, &mut self.local),
            PointerInput::Up { x, y } => Some(self.capture.pointer_up(x, y)),
        }
    }

    /// Replay one inbound wire frame onto the remote layer. Malformed
    /// frames are dropped and logged, never fatal.
    pub fn handle_inbound(&mut self, text: &str) {
        match PaintEvent::from_json(text) {
            Ok(event) => self.replayer.apply_anonymous(&event, &mut self.remote),
            Err(e) => warn!(%e, "Dropping malformed inbound event"),
        }
    }

    /// Run the client loop: pointer input on one side, relay broadcasts
    /// on the other, until either end closes.
    pub async fn run<P: PaintTransport>(
        &mut self,
        publisher: &mut P,
        inbound: &mut WsInbound,
        mut pointer_rx: mpsc::UnboundedReceiver<PointerInput>,
    ) -> jamboard_core::Result<()> {
        self.on_connected();
        loop {
            tokio::select! {
                input = pointer_rx.recv() => match input {
                    Some(input) => {
                        if let Some(event) = self.handle_pointer(input, Instant::now()) {
                            publisher.publish(&event).await?;
                        }
                    }
                    None => {
                        debug!("Pointer input closed");
                        break;
                    }
                },
                msg = inbound.recv() => match msg {
                    Some(text) => self.on_message_received(&text),
                    None => {
                        self.on_disconnected();
                        break;
                    }
                },
            }
        }
        Ok(())
    }
}

impl<L: DrawSurface, R: DrawSurface> TransportEvents for StrokeClient<L, R> {
    fn on_connected(&mut self) {
        info!("Paint subscription ready");
    }

    fn on_disconnected(&mut self) {
        // In-flight strokes are abandoned, not rolled back.
        info!("Paint subscription terminated");
    }

    fn on_message_received(&mut self, text: &str) {
        self.handle_inbound(text);
    }
}
