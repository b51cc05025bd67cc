//! Background threshold monitor.
//!
//! [`ThresholdMonitor`] evaluates every subscription against the current AQI
//! once per cycle. [`MonitorHandle`] owns the lifecycle of the background
//! task: at most one loop runs, and stopping cancels the pending sleep and
//! waits for the task to exit.

use std::sync::Arc;
use std::time::Duration;

use airwatch_core::alert::AlertPolicy;
use airwatch_core::aqi::{AqiSource, AqiSourceError};
use airwatch_core::notification::NotificationEvent;
use airwatch_core::subscription::Subscription;
use airwatch_core::types::{SubscriberId, Timestamp};
use airwatch_events::NotificationDispatcher;
use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::MonitorConfig;
use crate::store::SubscriptionStore;

// ---------------------------------------------------------------------------
// Cycle outcome types
// ---------------------------------------------------------------------------

/// A fault that aborts the current monitor cycle.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("AQI lookup for {location} (subscriber {subscriber_id}) failed: {source}")]
    Source {
        subscriber_id: SubscriberId,
        location: String,
        #[source]
        source: AqiSourceError,
    },
}

/// What happened to one subscription during a cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckResult {
    /// No numeric AQI for the location; skipped quietly.
    NoData,
    /// AQI at or below the threshold.
    WithinThreshold,
    /// Threshold exceeded, but an alert went out within the cooldown window.
    CoolingDown,
    Dispatched(NotificationEvent),
}

/// Per-cycle counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub checked: usize,
    pub no_data: usize,
    pub within_threshold: usize,
    pub suppressed: usize,
    pub dispatched: usize,
}

impl CycleReport {
    fn tally(&mut self, result: &CheckResult) {
        self.checked += 1;
        match result {
            CheckResult::NoData => self.no_data += 1,
            CheckResult::WithinThreshold => self.within_threshold += 1,
            CheckResult::CoolingDown => self.suppressed += 1,
            CheckResult::Dispatched(_) => self.dispatched += 1,
        }
    }
}

/// Whether an alert sent at `last_alert` still blocks a new one at `now`.
///
/// A `last_alert` in the future (clock skew) counts as within the window.
pub fn within_cooldown(last_alert: Option<Timestamp>, now: Timestamp, cooldown: Duration) -> bool {
    match last_alert {
        None => false,
        Some(last) => now
            .signed_duration_since(last)
            .to_std()
            .map_or(true, |elapsed| elapsed < cooldown),
    }
}

// ---------------------------------------------------------------------------
// ThresholdMonitor
// ---------------------------------------------------------------------------

/// Periodic evaluator of subscriptions against current AQI.
pub struct ThresholdMonitor {
    store: Arc<SubscriptionStore>,
    source: Arc<dyn AqiSource>,
    policy: Arc<dyn AlertPolicy>,
    dispatcher: Arc<NotificationDispatcher>,
    config: MonitorConfig,
}

impl ThresholdMonitor {
    pub fn new(
        store: Arc<SubscriptionStore>,
        source: Arc<dyn AqiSource>,
        policy: Arc<dyn AlertPolicy>,
        dispatcher: Arc<NotificationDispatcher>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            store,
            source,
            policy,
            dispatcher,
            config,
        }
    }

    /// Evaluate every subscription once.
    ///
    /// Works on a snapshot taken at the start of the cycle. Missing data for
    /// a location skips that subscriber; a failing data source aborts the
    /// whole cycle.
    pub async fn run_cycle(&self) -> Result<CycleReport, MonitorError> {
        let mut report = CycleReport::default();

        for subscription in self.store.snapshot().await {
            let result = self.check(&subscription).await?;
            report.tally(&result);
        }

        Ok(report)
    }

    /// Evaluate one subscription and dispatch an alert if due.
    pub async fn check(&self, subscription: &Subscription) -> Result<CheckResult, MonitorError> {
        let current_aqi = match self.source.current_aqi(&subscription.location).await {
            Ok(aqi) => aqi,
            Err(e) if e.is_data_unavailable() => {
                tracing::debug!(
                    subscriber_id = %subscription.subscriber_id,
                    location = %subscription.location,
                    reason = %e,
                    "No AQI data, skipping subscriber this cycle"
                );
                return Ok(CheckResult::NoData);
            }
            Err(source) => {
                return Err(MonitorError::Source {
                    subscriber_id: subscription.subscriber_id.clone(),
                    location: subscription.location.clone(),
                    source,
                });
            }
        };

        if current_aqi <= subscription.threshold {
            return Ok(CheckResult::WithinThreshold);
        }

        let now = Utc::now();
        if within_cooldown(subscription.last_alert, now, self.config.cooldown) {
            tracing::debug!(
                subscriber_id = %subscription.subscriber_id,
                aqi = current_aqi,
                "Threshold exceeded within cooldown, alert suppressed"
            );
            return Ok(CheckResult::CoolingDown);
        }

        let policy = self.policy.classify(current_aqi);
        let event = self
            .dispatcher
            .dispatch(subscription, current_aqi, policy)
            .await;
        self.store.mark_alerted(subscription, now).await;

        Ok(CheckResult::Dispatched(event))
    }

    /// Run cycles until `cancel` fires.
    ///
    /// Sleeps `poll_interval` after a clean cycle and `retry_delay` after a
    /// failed one. The sleep is raced against the token so stop is prompt.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) {
        tracing::info!(
            poll_interval_secs = self.config.poll_interval.as_secs(),
            retry_delay_secs = self.config.retry_delay.as_secs(),
            cooldown_secs = self.config.cooldown.as_secs(),
            "Threshold monitor started"
        );

        while !cancel.is_cancelled() {
            let delay = match self.run_cycle().await {
                Ok(report) => {
                    tracing::debug!(
                        checked = report.checked,
                        dispatched = report.dispatched,
                        suppressed = report.suppressed,
                        no_data = report.no_data,
                        "Monitor cycle complete"
                    );
                    self.config.poll_interval
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        retry_in_secs = self.config.retry_delay.as_secs(),
                        "Monitor cycle failed"
                    );
                    self.config.retry_delay
                }
            };

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        tracing::info!("Threshold monitor stopped");
    }
}

// ---------------------------------------------------------------------------
// MonitorHandle
// ---------------------------------------------------------------------------

struct RunningMonitor {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Start/stop control for the single background monitor task.
pub struct MonitorHandle {
    monitor: Arc<ThresholdMonitor>,
    running: Mutex<Option<RunningMonitor>>,
}

impl MonitorHandle {
    pub fn new(monitor: Arc<ThresholdMonitor>) -> Self {
        Self {
            monitor,
            running: Mutex::new(None),
        }
    }

    /// Spawn the monitor loop unless one is already running.
    ///
    /// Returns `true` if a new loop was started. A loop whose task has
    /// exited on its own (e.g. after a panic) is replaced.
    pub async fn start(&self) -> bool {
        let mut running = self.running.lock().await;
        if running.as_ref().is_some_and(|r| !r.handle.is_finished()) {
            return false;
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(Arc::clone(&self.monitor).run(cancel.clone()));
        *running = Some(RunningMonitor { cancel, handle });
        true
    }

    /// Cancel the loop and wait for its task to exit.
    ///
    /// The lock is held until the task has exited, so a concurrent `start`
    /// cannot spawn a second loop next to one still finishing its cycle.
    /// Returns `true` if a loop was running.
    pub async fn stop(&self) -> bool {
        let mut running = self.running.lock().await;
        let Some(RunningMonitor { cancel, handle }) = running.take() else {
            return false;
        };

        cancel.cancel();
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Threshold monitor task ended abnormally");
        }
        true
    }

    pub async fn is_active(&self) -> bool {
        self.running
            .lock()
            .await
            .as_ref()
            .is_some_and(|r| !r.handle.is_finished())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
