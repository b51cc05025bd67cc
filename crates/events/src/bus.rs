//! In-process notification bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`NotificationBus`] fans every dispatched [`NotificationEvent`] out to any
//! number of consumers. It is the attachment point for delivery channels;
//! the only consumer shipped here is [`NotificationLogger`](crate::NotificationLogger).

use airwatch_core::notification::NotificationEvent;
use tokio::sync::broadcast;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Fan-out bus for notification events.
///
/// # Usage
///
/// ```rust
/// use airwatch_events::NotificationBus;
///
/// let bus = NotificationBus::default();
/// let mut rx = bus.subscribe();
/// assert!(rx.try_recv().is_err());
/// ```
pub struct NotificationBus {
    sender: broadcast::Sender<NotificationEvent>,
}

impl NotificationBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed events are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current receivers.
    ///
    /// With no receivers the event is silently dropped; history recording
    /// does not depend on the bus.
    pub fn publish(&self, event: NotificationEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.sender.subscribe()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_event;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = NotificationBus::default();
        let mut rx = bus.subscribe();

        bus.publish(sample_event("u1", 180.0));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.subscriber_id, "u1");
        assert_eq!(received.aqi, 180.0);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = NotificationBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(sample_event("u2", 120.0));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(e1, e2);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = NotificationBus::default();
        bus.publish(sample_event("orphan", 10.0));
    }
}
