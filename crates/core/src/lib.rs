//! Domain types and pure policy logic for the AirWatch alert engine.
//!
//! - [`subscription`]: subscriber profiles and validation.
//! - [`aqi`]: AQI readings and the [`aqi::AqiSource`] contract.
//! - [`alert`]: severity levels, the alert policy, and threshold comparison.
//! - [`precaution`] / [`recommendations`]: health guidance text.
//! - [`notification`]: the notification event record.

pub mod alert;
pub mod aqi;
pub mod error;
pub mod notification;
pub mod precaution;
pub mod recommendations;
pub mod subscription;
pub mod types;
