//! AirWatch alert engine.
//!
//! [`AlertService`] ties together the subscription store, the background
//! [`ThresholdMonitor`] and the on-demand [`CheckEvaluator`]. Everything is
//! in memory; nothing survives a restart.

pub mod config;
pub mod evaluator;
pub mod monitor;
pub mod service;
pub mod store;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, MonitorConfig};
pub use evaluator::{CheckEvaluator, CheckFailure, CheckOutcome, CheckReport, CheckRequest};
pub use monitor::{CycleReport, MonitorError, MonitorHandle, ThresholdMonitor};
pub use service::AlertService;
pub use store::SubscriptionStore;
