//! The alert service: subscriptions, monitor lifecycle and immediate checks
//! behind one explicitly constructed handle.

use std::sync::Arc;

use airwatch_core::alert::{AlertPolicy, TieredAlertPolicy};
use airwatch_core::aqi::AqiSource;
use airwatch_core::error::CoreError;
use airwatch_core::notification::NotificationEvent;
use airwatch_core::subscription::{NewSubscription, Subscription};
use airwatch_events::{AlertHistory, NotificationBus, NotificationDispatcher};
use chrono::Utc;

use crate::config::MonitorConfig;
use crate::evaluator::{CheckEvaluator, CheckOutcome, CheckRequest};
use crate::monitor::{MonitorHandle, ThresholdMonitor};
use crate::store::SubscriptionStore;

/// Owns every piece of alerting state for one process.
///
/// Construct once at startup and share via `Arc`.
pub struct AlertService {
    store: Arc<SubscriptionStore>,
    history: Arc<AlertHistory>,
    evaluator: CheckEvaluator,
    monitor: MonitorHandle,
}

impl AlertService {
    /// Create a service using the default three-tier alert policy.
    pub fn new(source: Arc<dyn AqiSource>, bus: Arc<NotificationBus>, config: MonitorConfig) -> Self {
        Self::with_policy(source, Arc::new(TieredAlertPolicy), bus, config)
    }

    pub fn with_policy(
        source: Arc<dyn AqiSource>,
        policy: Arc<dyn AlertPolicy>,
        bus: Arc<NotificationBus>,
        config: MonitorConfig,
    ) -> Self {
        let store = Arc::new(SubscriptionStore::new());
        let history = Arc::new(AlertHistory::new());
        let dispatcher = Arc::new(NotificationDispatcher::new(Arc::clone(&history), bus));

        let evaluator = CheckEvaluator::new(
            Arc::clone(&store),
            Arc::clone(&source),
            Arc::clone(&dispatcher),
        );
        let monitor = MonitorHandle::new(Arc::new(ThresholdMonitor::new(
            Arc::clone(&store),
            source,
            policy,
            dispatcher,
            config,
        )));

        Self {
            store,
            history,
            evaluator,
            monitor,
        }
    }

    /// Register (or replace) a subscription and make sure the monitor runs.
    ///
    /// A subscriber id is generated when the request carries none. Invalid
    /// input is rejected before anything is stored.
    pub async fn subscribe(&self, request: NewSubscription) -> Result<Subscription, CoreError> {
        request.validate()?;

        let subscriber_id = request
            .subscriber_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let subscription = request.into_subscription(subscriber_id, Utc::now());

        let replaced = self.store.insert(subscription.clone()).await;
        tracing::info!(
            subscriber_id = %subscription.subscriber_id,
            location = %subscription.location,
            threshold = subscription.threshold,
            replaced = replaced.is_some(),
            "Subscription registered"
        );

        if self.monitor.start().await {
            tracing::debug!("Threshold monitor launched by subscription");
        }
        Ok(subscription)
    }

    /// Remove a subscription. Returns `false` for an unknown id.
    ///
    /// The monitor keeps running even when no subscriptions remain.
    pub async fn unsubscribe(&self, subscriber_id: &str) -> bool {
        let removed = self.store.remove(subscriber_id).await.is_some();
        if removed {
            tracing::info!(subscriber_id, "Subscription removed");
        }
        removed
    }

    /// All subscriptions in the order they were first registered.
    pub async fn list_subscriptions(&self) -> Vec<Subscription> {
        self.store.snapshot().await
    }

    pub async fn subscription(&self, subscriber_id: &str) -> Option<Subscription> {
        self.store.get(subscriber_id).await
    }

    /// Run a threshold check now. See [`CheckEvaluator::evaluate`].
    pub async fn immediate_check(&self, request: CheckRequest) -> Result<CheckOutcome, CoreError> {
        self.evaluator.evaluate(request).await
    }

    /// Up to the last ten events for `subscriber_id`, oldest first.
    pub async fn alert_history(&self, subscriber_id: &str) -> Vec<NotificationEvent> {
        self.history.for_subscriber(subscriber_id).await
    }

    /// Start the background monitor. Returns `false` if it was already running.
    pub async fn start_monitor(&self) -> bool {
        self.monitor.start().await
    }

    /// Stop the background monitor and wait for it to exit.
    ///
    /// Returns `false` if it was not running.
    pub async fn stop_monitor(&self) -> bool {
        self.monitor.stop().await
    }

    pub async fn monitor_active(&self) -> bool {
        self.monitor.is_active().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeSource;
    use airwatch_core::alert::AlertLevel;
    use airwatch_core::subscription::AgeGroup;
    use assert_matches::assert_matches;

    fn service() -> (AlertService, Arc<FakeSource>) {
        let source = Arc::new(FakeSource::default());
        let service = AlertService::new(
            Arc::clone(&source) as Arc<dyn AqiSource>,
            Arc::new(NotificationBus::default()),
            MonitorConfig::default(),
        );
        (service, source)
    }

    #[tokio::test]
    async fn subscribe_generates_id_and_starts_monitor() {
        let (service, _) = service();
        assert!(!service.monitor_active().await);

        let sub = service.subscribe(NewSubscription::new("Delhi")).await.unwrap();

        assert!(uuid::Uuid::parse_str(&sub.subscriber_id).is_ok());
        assert_eq!(sub.threshold, 100.0);
        assert!(service.monitor_active().await);
        service.stop_monitor().await;
    }

    #[tokio::test]
    async fn invalid_subscription_is_not_stored() {
        let (service, _) = service();

        let err = service
            .subscribe(NewSubscription::new("").with_subscriber_id("u1"))
            .await;

        assert_matches!(err, Err(CoreError::Validation(_)));
        assert!(service.list_subscriptions().await.is_empty());
        assert!(!service.monitor_active().await);
    }

    #[tokio::test]
    async fn resubscribe_overwrites() {
        let (service, _) = service();
        service
            .subscribe(NewSubscription::new("Delhi").with_subscriber_id("u1"))
            .await
            .unwrap();
        service
            .subscribe(
                NewSubscription::new("Mumbai")
                    .with_subscriber_id("u1")
                    .with_threshold(150.0)
                    .with_age_group(AgeGroup::Elderly),
            )
            .await
            .unwrap();

        let all = service.list_subscriptions().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].location, "Mumbai");
        assert_eq!(all[0].threshold, 150.0);
        assert_eq!(all[0].age_group, Some(AgeGroup::Elderly));
        service.stop_monitor().await;
    }

    #[tokio::test]
    async fn unsubscribe_unknown_leaves_store_alone() {
        let (service, _) = service();
        service
            .subscribe(NewSubscription::new("Delhi").with_subscriber_id("u1"))
            .await
            .unwrap();

        assert!(!service.unsubscribe("ghost").await);
        assert_eq!(service.list_subscriptions().await.len(), 1);

        assert!(service.unsubscribe("u1").await);
        assert!(service.subscription("u1").await.is_none());
        assert!(service.monitor_active().await, "monitor outlives the last subscription");
        service.stop_monitor().await;
    }

    #[tokio::test]
    async fn immediate_check_lands_in_history() {
        let (service, source) = service();
        service
            .subscribe(NewSubscription::new("Delhi").with_subscriber_id("u1"))
            .await
            .unwrap();
        service.stop_monitor().await;
        source.set("Delhi", 180.0);

        let outcome = service
            .immediate_check(CheckRequest::for_subscriber("u1"))
            .await
            .unwrap();

        assert_matches!(outcome, CheckOutcome::Evaluated(r) if r.level == AlertLevel::Alert);
        let history = service.alert_history("u1").await;
        assert_eq!(history.len(), 1);
        assert!(history[0].is_test);
    }

    #[tokio::test]
    async fn monitor_controls_are_idempotent() {
        let (service, _) = service();
        assert!(service.start_monitor().await);
        assert!(!service.start_monitor().await);
        assert!(service.stop_monitor().await);
        assert!(!service.stop_monitor().await);
        assert!(!service.monitor_active().await);
    }
}
