//! The broadcast topic — subscriber bookkeeping and fan-out.

use std::collections::HashMap;

use jamboard_core::PaintEvent;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;
use uuid::Uuid;

/// A single named broadcast topic.
///
/// Subscribers are held as unbounded senders keyed by subscription id;
/// per-subscriber FIFO order is the mpsc channel's own ordering. Dead
/// subscribers are pruned on the next publish.
pub struct PaintTopic {
    name: String,
    subscribers: RwLock<HashMap<Uuid, mpsc::UnboundedSender<String>>>,
}

/// Handle returned by [`PaintTopic::subscribe`]. Dropping the receiver
/// without unsubscribing is fine; the sender is pruned on the next publish.
pub struct Subscription {
    pub id: Uuid,
    pub rx: mpsc::UnboundedReceiver<String>,
}

impl PaintTopic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subscribers: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a new subscriber. Each call yields an independent handle
    /// that receives events from this point forward — no backfill.
    pub async fn subscribe(&self) -> Subscription {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.write().await.insert(id, tx);
        debug!(topic = %self.name, subscription = %id, "Subscribed");
        Subscription { id, rx }
    }

    /// Remove a subscriber. Messages already queued on its channel are
    /// best-effort.
    pub async fn unsubscribe(&self, id: Uuid) {
        self.subscribers.write().await.remove(&id);
        debug!(topic = %self.name, subscription = %id, "Unsubscribed");
    }

    /// Broadcast an event to every current subscriber, the publisher's
    /// own subscription included. Returns the number of subscribers the
    /// event was delivered to.
    pub async fn publish(&self, event: &PaintEvent) -> usize {
        let msg = match event.to_json() {
            Ok(m) => m,
            Err(e) => {
                tracing::error!(%e, "Failed to serialize paint event");
                return 0;
            }
        };
        self.broadcast_text(&msg).await
    }

    /// Fan a pre-serialized frame out verbatim. The relay never rewrites
    /// a payload, so subscribers see the publisher's exact bytes.
    pub async fn broadcast_text(&self, msg: &str) -> usize {
        let mut subscribers = self.subscribers.write().await;
        subscribers.retain(|_, tx| tx.send(msg.to_string()).is_ok());
        let sent = subscribers.len();
        debug!(topic = %self.name, sent, "Broadcast paint event");
        sent
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_two_subscribers_each_receive_one_copy() {
        let topic = PaintTopic::new("paint_channel");
        let mut a = topic.subscribe().await;
        let mut b = topic.subscribe().await;

        let sent = topic.publish(&PaintEvent::start(1.0, 1.0)).await;
        assert_eq!(sent, 2);

        let msg_a = a.rx.recv().await.unwrap();
        let msg_b = b.rx.recv().await.unwrap();
        assert_eq!(msg_a, msg_b);
        assert_eq!(
            PaintEvent::from_json(&msg_a).unwrap(),
            PaintEvent::start(1.0, 1.0)
        );

        // Exactly one copy each.
        assert!(a.rx.try_recv().is_err());
        assert!(b.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publisher_receives_own_events() {
        // Broadcast, not unicast-to-others: the publishing connection's
        // subscription gets a copy too.
        let topic = PaintTopic::new("paint_channel");
        let mut sub = topic.subscribe().await;

        topic.publish(&PaintEvent::painting(3.0, 4.0)).await;
        let msg = sub.rx.recv().await.unwrap();
        assert_eq!(
            PaintEvent::from_json(&msg).unwrap(),
            PaintEvent::painting(3.0, 4.0)
        );
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery() {
        let topic = PaintTopic::new("paint_channel");
        let mut sub = topic.subscribe().await;
        topic.unsubscribe(sub.id).await;

        let sent = topic.publish(&PaintEvent::stop(0.0, 0.0)).await;
        assert_eq!(sent, 0);
        assert!(sub.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dropped_receiver_pruned_on_publish() {
        let topic = PaintTopic::new("paint_channel");
        let sub = topic.subscribe().await;
        drop(sub.rx);

        assert_eq!(topic.subscriber_count().await, 1);
        let sent = topic.publish(&PaintEvent::start(0.0, 0.0)).await;
        assert_eq!(sent, 0);
        assert_eq!(topic.subscriber_count().await, 0);
    }

    #[tokio::test]
    async fn test_publish_with_no_subscribers() {
        let topic = PaintTopic::new("paint_channel");
        assert_eq!(topic.publish(&PaintEvent::start(0.0, 0.0)).await, 0);
    }

    #[tokio::test]
    async fn test_broadcast_text_is_verbatim() {
        let topic = PaintTopic::new("paint_channel");
        let mut sub = topic.subscribe().await;

        // Odd formatting survives untouched.
        let raw = r#"{ "x": 1, "y": 1,  "state": "start" }"#;
        topic.broadcast_text(raw).await;
        assert_eq!(sub.rx.recv().await.unwrap(), raw);
    }

    #[tokio::test]
    async fn test_relay_does_not_mutate_payload() {
        let topic = PaintTopic::new("paint_channel");
        let mut sub = topic.subscribe().await;

        let event = PaintEvent::painting(123.456, -7.5);
        topic.publish(&event).await;

        let msg = sub.rx.recv().await.unwrap();
        assert_eq!(msg, event.to_json().unwrap());
    }
}
