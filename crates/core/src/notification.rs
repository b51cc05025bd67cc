//! Notification records produced by the alert engine.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::alert::AlertLevel;
use crate::subscription::{AgeGroup, HealthCondition, Subscription};
use crate::types::{SubscriberId, Timestamp};

/// An immutable record of one alert (real or simulated) for a subscriber.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationEvent {
    pub subscriber_id: SubscriberId,
    pub location: String,
    pub aqi: f64,
    /// The subscription's threshold at evaluation time.
    pub threshold: f64,
    pub level: AlertLevel,
    pub message: String,
    pub timestamp: Timestamp,
    pub age_group: Option<AgeGroup>,
    pub health_conditions: BTreeSet<HealthCondition>,
    /// `true` for immediate-check simulations, `false` for monitor alerts.
    pub is_test: bool,
}

impl NotificationEvent {
    /// Start an event for `subscription`, copying its location, threshold
    /// and profile.
    pub fn for_subscription(
        subscription: &Subscription,
        aqi: f64,
        level: AlertLevel,
        message: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            subscriber_id: subscription.subscriber_id.clone(),
            location: subscription.location.clone(),
            aqi,
            threshold: subscription.threshold,
            level,
            message: message.into(),
            timestamp,
            age_group: subscription.age_group,
            health_conditions: subscription.health_conditions.clone(),
            is_test: false,
        }
    }

    /// Flag the event as a simulation.
    pub fn as_test(mut self) -> Self {
        self.is_test = true;
        self
    }
}
