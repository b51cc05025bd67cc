//! In-memory subscription store.

use airwatch_core::subscription::Subscription;
use airwatch_core::types::{SubscriberId, Timestamp};
use indexmap::IndexMap;
use tokio::sync::RwLock;

/// Subscriptions keyed by subscriber id, in insertion order.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared between request handlers and the monitor. Readers get owned
/// snapshots, so iteration never observes concurrent structural changes.
pub struct SubscriptionStore {
    subscriptions: RwLock<IndexMap<SubscriberId, Subscription>>,
}

impl SubscriptionStore {
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(IndexMap::new()),
        }
    }

    /// Insert or replace the subscription for its subscriber id.
    ///
    /// Returns the subscription it replaced, if any.
    pub async fn insert(&self, subscription: Subscription) -> Option<Subscription> {
        self.subscriptions
            .write()
            .await
            .insert(subscription.subscriber_id.clone(), subscription)
    }

    /// Remove a subscription, preserving the order of the rest.
    pub async fn remove(&self, subscriber_id: &str) -> Option<Subscription> {
        self.subscriptions.write().await.shift_remove(subscriber_id)
    }

    pub async fn get(&self, subscriber_id: &str) -> Option<Subscription> {
        self.subscriptions.read().await.get(subscriber_id).cloned()
    }

    /// Owned copy of every subscription, in insertion order.
    pub async fn snapshot(&self) -> Vec<Subscription> {
        self.subscriptions.read().await.values().cloned().collect()
    }

    /// Stamp `last_alert` on the stored subscription `evaluated` was taken from.
    ///
    /// Does nothing if the subscriber unsubscribed or re-subscribed since the
    /// snapshot (detected by a changed `created_at`). Returns whether the
    /// stamp was applied.
    pub async fn mark_alerted(&self, evaluated: &Subscription, at: Timestamp) -> bool {
        let mut subscriptions = self.subscriptions.write().await;
        match subscriptions.get_mut(&evaluated.subscriber_id) {
            Some(current) if current.created_at == evaluated.created_at => {
                current.last_alert = Some(at);
                true
            }
            _ => false,
        }
    }
}

impl Default for SubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}
