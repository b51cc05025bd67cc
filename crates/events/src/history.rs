//! Bounded per-subscriber alert history.

use std::collections::{HashMap, VecDeque};

use airwatch_core::notification::NotificationEvent;
use tokio::sync::RwLock;

/// Number of events retained per subscriber.
pub const HISTORY_LIMIT: usize = 10;

/// Most recent notification events per subscriber, oldest first.
///
/// Appends for all subscribers go through one write lock, so concurrent
/// monitor alerts and immediate checks for the same subscriber never
/// interleave. Designed to be wrapped in `Arc` and shared.
pub struct AlertHistory {
    limit: usize,
    entries: RwLock<HashMap<String, VecDeque<NotificationEvent>>>,
}

impl AlertHistory {
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    /// Create a history that keeps `limit` events per subscriber.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Append an event, evicting the oldest entries beyond the limit.
    pub async fn record(&self, event: NotificationEvent) {
        let mut entries = self.entries.write().await;
        let queue = entries.entry(event.subscriber_id.clone()).or_default();
        queue.push_back(event);
        while queue.len() > self.limit {
            queue.pop_front();
        }
    }

    /// Events for `subscriber_id`, oldest first. Empty when none exist.
    pub async fn for_subscriber(&self, subscriber_id: &str) -> Vec<NotificationEvent> {
        self.entries
            .read()
            .await
            .get(subscriber_id)
            .map(|q| q.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn len(&self, subscriber_id: &str) -> usize {
        self.entries
            .read()
            .await
            .get(subscriber_id)
            .map_or(0, VecDeque::len)
    }
}

impl Default for AlertHistory {
    fn default() -> Self {
        Self::new()
    }
}
