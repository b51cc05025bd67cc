//! On-demand threshold checks.
//!
//! An immediate check compares the current AQI with a threshold right away,
//! ignoring the monitor schedule and the cooldown. Checks for a subscriber
//! are personalized and recorded in that subscriber's history as test
//! events; checks for an ad-hoc `(location, threshold)` pair are neither.

use std::collections::BTreeSet;
use std::sync::Arc;

use airwatch_core::alert::{AlertLevel, Comparison};
use airwatch_core::aqi::AqiSource;
use airwatch_core::error::CoreError;
use airwatch_core::notification::NotificationEvent;
use airwatch_core::precaution::{precaution_message, SAFE_PRECAUTION, WARNING_PRECAUTION};
use airwatch_core::subscription::{validate_threshold, AgeGroup, HealthCondition, Subscription};
use airwatch_core::types::{SubscriberId, Timestamp};
use airwatch_events::NotificationDispatcher;
use chrono::Utc;
use serde::Serialize;

use crate::store::SubscriptionStore;

/// Parameters of an immediate check.
///
/// A `subscriber_id` with an active subscription takes precedence; the
/// explicit `location` and `threshold` are only used when it does not match.
#[derive(Debug, Clone, Default)]
pub struct CheckRequest {
    pub subscriber_id: Option<SubscriberId>,
    pub location: Option<String>,
    pub threshold: Option<f64>,
}

impl CheckRequest {
    pub fn for_subscriber(subscriber_id: impl Into<SubscriberId>) -> Self {
        Self {
            subscriber_id: Some(subscriber_id.into()),
            ..Self::default()
        }
    }

    pub fn for_location(location: impl Into<String>, threshold: f64) -> Self {
        Self {
            location: Some(location.into()),
            threshold: Some(threshold),
            ..Self::default()
        }
    }
}

/// A successful immediate check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    /// Set when the check ran against a stored subscription.
    pub subscriber_id: Option<SubscriberId>,
    pub location: String,
    pub aqi: f64,
    pub threshold: f64,
    pub level: AlertLevel,
    pub comparison: Comparison,
    pub message: String,
    pub timestamp: Timestamp,
    pub is_test: bool,
}

/// Why an immediate check produced no result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckFailure {
    #[error("Unable to get AQI data for {location}")]
    DataUnavailable { location: String },

    #[error("User subscription not found")]
    SubscriptionNotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Evaluated(CheckReport),
    Failed(CheckFailure),
}

impl CheckOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CheckOutcome::Evaluated(_))
    }
}

/// Runs immediate checks against the shared store and data source.
pub struct CheckEvaluator {
    store: Arc<SubscriptionStore>,
    source: Arc<dyn AqiSource>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl CheckEvaluator {
    pub fn new(
        store: Arc<SubscriptionStore>,
        source: Arc<dyn AqiSource>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            store,
            source,
            dispatcher,
        }
    }

    /// Evaluate `request` now.
    ///
    /// Only malformed input (a negative or non-finite explicit threshold on
    /// the `(location, threshold)` path) is an error. Missing data and
    /// unknown subscribers are reported through [`CheckOutcome::Failed`].
    pub async fn evaluate(&self, request: CheckRequest) -> Result<CheckOutcome, CoreError> {
        if let Some(id) = request.subscriber_id.as_deref() {
            if let Some(subscription) = self.store.get(id).await {
                return Ok(self.check_subscription(&subscription).await);
            }
        }

        let location = request
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty());

        match (location, request.threshold) {
            (Some(location), Some(threshold)) => {
                validate_threshold(threshold)?;
                Ok(self.check_location(location, threshold).await)
            }
            _ => Ok(CheckOutcome::Failed(CheckFailure::SubscriptionNotFound)),
        }
    }

    async fn check_subscription(&self, subscription: &Subscription) -> CheckOutcome {
        let aqi = match self.fetch(&subscription.location).await {
            Ok(aqi) => aqi,
            Err(failure) => return CheckOutcome::Failed(failure),
        };

        let (comparison, message) = describe(
            &subscription.location,
            aqi,
            subscription.threshold,
            subscription.age_group,
            &subscription.health_conditions,
        );
        let now = Utc::now();
        let event = NotificationEvent::for_subscription(
            subscription,
            aqi,
            comparison.level(),
            message.clone(),
            now,
        )
        .as_test();

        tracing::info!(
            subscriber_id = %subscription.subscriber_id,
            location = %subscription.location,
            aqi,
            threshold = subscription.threshold,
            level = ?event.level,
            "Immediate check recorded"
        );
        self.dispatcher.record(event).await;

        CheckOutcome::Evaluated(CheckReport {
            subscriber_id: Some(subscription.subscriber_id.clone()),
            location: subscription.location.clone(),
            aqi,
            threshold: subscription.threshold,
            level: comparison.level(),
            comparison,
            message,
            timestamp: now,
            is_test: true,
        })
    }

    async fn check_location(&self, location: &str, threshold: f64) -> CheckOutcome {
        let aqi = match self.fetch(location).await {
            Ok(aqi) => aqi,
            Err(failure) => return CheckOutcome::Failed(failure),
        };

        let (comparison, message) = describe(location, aqi, threshold, None, &BTreeSet::new());
        CheckOutcome::Evaluated(CheckReport {
            subscriber_id: None,
            location: location.to_string(),
            aqi,
            threshold,
            level: comparison.level(),
            comparison,
            message,
            timestamp: Utc::now(),
            is_test: true,
        })
    }

    async fn fetch(&self, location: &str) -> Result<f64, CheckFailure> {
        self.source.current_aqi(location).await.map_err(|e| {
            if e.is_data_unavailable() {
                tracing::debug!(location, reason = %e, "Immediate check has no AQI data");
            } else {
                tracing::warn!(location, error = %e, "AQI source failed during immediate check");
            }
            CheckFailure::DataUnavailable {
                location: location.to_string(),
            }
        })
    }
}

fn describe(
    location: &str,
    aqi: f64,
    threshold: f64,
    age_group: Option<AgeGroup>,
    conditions: &BTreeSet<HealthCondition>,
) -> (Comparison, String) {
    let comparison = Comparison::of(aqi, threshold);
    let precaution = match comparison {
        Comparison::Higher => precaution_message(aqi, age_group, conditions),
        Comparison::Equal => WARNING_PRECAUTION.to_string(),
        Comparison::Lower => SAFE_PRECAUTION.to_string(),
    };
    let message = format!(
        "The current AQI of {location} is {aqi}, which is {} your threshold of {threshold}. {precaution}",
        comparison.phrase()
    );
    (comparison, message)
}
