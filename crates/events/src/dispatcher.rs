//! Notification dispatcher: the terminal sink of the alert engine.
//!
//! [`NotificationDispatcher`] turns a threshold breach into a
//! [`NotificationEvent`], records it in [`AlertHistory`] and publishes it on
//! the [`NotificationBus`]. Delivery to phones, browsers or inboxes would
//! subscribe to the bus; none is wired in here.

use std::sync::Arc;

use airwatch_core::alert::{AlertLevel, PolicyAlert};
use airwatch_core::notification::NotificationEvent;
use airwatch_core::subscription::Subscription;
use chrono::Utc;

use crate::bus::NotificationBus;
use crate::history::AlertHistory;

/// Formats, records and publishes notification events.
pub struct NotificationDispatcher {
    history: Arc<AlertHistory>,
    bus: Arc<NotificationBus>,
}

impl NotificationDispatcher {
    pub fn new(history: Arc<AlertHistory>, bus: Arc<NotificationBus>) -> Self {
        Self { history, bus }
    }

    /// Build and record a monitor-triggered alert.
    ///
    /// Uses the policy's level and message; without one the event is a plain
    /// ALERT saying the threshold was exceeded.
    pub async fn dispatch(
        &self,
        subscription: &Subscription,
        current_aqi: f64,
        policy: Option<PolicyAlert>,
    ) -> NotificationEvent {
        let (level, message) = match policy {
            Some(alert) => (alert.level, alert.message),
            None => (
                AlertLevel::Alert,
                format!("AQI threshold exceeded: {current_aqi}"),
            ),
        };

        let event =
            NotificationEvent::for_subscription(subscription, current_aqi, level, message, Utc::now());

        tracing::info!(
            subscriber_id = %event.subscriber_id,
            location = %event.location,
            aqi = event.aqi,
            threshold = event.threshold,
            level = ?event.level,
            "Dispatching AQI alert"
        );

        self.record(event.clone()).await;
        event
    }

    /// Record an already-built event (used for simulated checks).
    pub async fn record(&self, event: NotificationEvent) {
        self.history.record(event.clone()).await;
        self.bus.publish(event);
    }

    pub fn history(&self) -> &Arc<AlertHistory> {
        &self.history
    }
}
