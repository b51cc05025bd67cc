//! Log-only notification consumer.
//!
//! [`NotificationLogger`] subscribes to the [`NotificationBus`](crate::bus::NotificationBus)
//! and writes every event to the tracing log. It stands in for a real push
//! channel and shuts down when the bus sender is dropped.

use airwatch_core::notification::NotificationEvent;
use tokio::sync::broadcast;

/// Background consumer that logs each notification.
pub struct NotificationLogger;

impl NotificationLogger {
    /// Run the logging loop until the bus closes.
    ///
    /// Returns the number of events logged.
    pub async fn run(mut receiver: broadcast::Receiver<NotificationEvent>) -> u64 {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    Self::log(&event);
                    logged += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification logger lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Notification bus closed, logger shutting down");
                    break;
                }
            }
        }
        logged
    }

    fn log(event: &NotificationEvent) {
        tracing::info!(
            target: "airwatch::push",
            subscriber_id = %event.subscriber_id,
            location = %event.location,
            aqi = event.aqi,
            threshold = event.threshold,
            level = ?event.level,
            is_test = event.is_test,
            message = %event.message,
            "PUSH NOTIFICATION"
        );
    }
}
