//! WebSocket connection lifecycle — subscribe, forward, read loop.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use jamboard_core::PaintEvent;

use crate::state::RelayState;

/// Handle a new WebSocket connection.
///
/// Every connection is both a publisher and a subscriber of the paint
/// topic: inbound text frames are parsed and published, and everything
/// the topic broadcasts is forwarded back down the socket.
pub async fn handle_ws_connection(state: Arc<RelayState>, ws: WebSocket) {
    let conn_id = Uuid::new_v4();
    info!(conn_id = %conn_id, "New paint connection");

    let (mut ws_tx, mut ws_rx) = ws.split();

    let mut subscription = state.topic.subscribe().await;
    let subscription_id = subscription.id;

    // Forward topic broadcasts to this client.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = subscription.rx.recv().await {
            if ws_tx.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Main read loop.
    while let Some(msg_result) = ws_rx.next().await {
        match msg_result {
            Ok(Message::Text(text)) => {
                match PaintEvent::from_json(&text) {
                    Ok(_) => {
                        // Validated; forward the original bytes untouched.
                        state.topic.broadcast_text(&text).await;
                    }
                    Err(e) => {
                        // Drop-and-log. A malformed frame never closes
                        // the connection.
                        warn!(conn_id = %conn_id, %e, "Dropping malformed paint event");
                    }
                }
            }
            Ok(Message::Ping(_)) => {
                // Axum handles ping/pong automatically
            }
            Ok(Message::Close(_)) => {
                debug!(conn_id = %conn_id, "Client requested close");
                break;
            }
            Err(e) => {
                warn!(conn_id = %conn_id, %e, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    // A disconnect mid-stroke abandons the stroke; no synthetic stop is
    // broadcast on the drawer's behalf.
    send_task.abort();
    state.topic.unsubscribe(subscription_id).await;
    info!(conn_id = %conn_id, "Paint connection closed");
}
