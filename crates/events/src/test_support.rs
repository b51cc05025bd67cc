//! Fixtures shared by this crate's unit tests.

use std::collections::BTreeSet;

use airwatch_core::alert::AlertLevel;
use airwatch_core::notification::NotificationEvent;
use airwatch_core::subscription::Subscription;
use chrono::Utc;

pub fn sample_subscription(id: &str, location: &str, threshold: f64) -> Subscription {
    Subscription {
        subscriber_id: id.to_string(),
        location: location.to_string(),
        threshold,
        age_group: None,
        health_conditions: BTreeSet::new(),
        created_at: Utc::now(),
        last_alert: None,
    }
}

pub fn sample_event(id: &str, aqi: f64) -> NotificationEvent {
    NotificationEvent::for_subscription(
        &sample_subscription(id, "Delhi", 100.0),
        aqi,
        AlertLevel::Alert,
        format!("AQI threshold exceeded: {aqi}"),
        Utc::now(),
    )
}
