//! Subscriber profiles and threshold subscriptions.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{SubscriberId, Timestamp};

/// Threshold applied when a subscriber does not choose one.
pub const DEFAULT_THRESHOLD: f64 = 100.0;

// ---------------------------------------------------------------------------
// Profile tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Child,
    Elderly,
    Pregnant,
}

impl AgeGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            AgeGroup::Child => "child",
            AgeGroup::Elderly => "elderly",
            AgeGroup::Pregnant => "pregnant",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeGroup {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "child" => Ok(AgeGroup::Child),
            "elderly" => Ok(AgeGroup::Elderly),
            "pregnant" => Ok(AgeGroup::Pregnant),
            other => Err(CoreError::Validation(format!(
                "Invalid age group '{other}'. Must be one of: child, elderly, pregnant"
            ))),
        }
    }
}

/// Health conditions that add precautions. Variant order is the order in
/// which their advice is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthCondition {
    Asthma,
    HeartDisease,
    Copd,
}

impl HealthCondition {
    pub fn as_str(self) -> &'static str {
        match self {
            HealthCondition::Asthma => "asthma",
            HealthCondition::HeartDisease => "heart_disease",
            HealthCondition::Copd => "copd",
        }
    }
}

impl fmt::Display for HealthCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthCondition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asthma" => Ok(HealthCondition::Asthma),
            "heart_disease" => Ok(HealthCondition::HeartDisease),
            "copd" => Ok(HealthCondition::Copd),
            other => Err(CoreError::Validation(format!(
                "Invalid health condition '{other}'. Must be one of: asthma, heart_disease, copd"
            ))),
        }
    }
}

/// Parse an optional age group, treating an empty string as unset.
pub fn parse_age_group(raw: Option<&str>) -> Result<Option<AgeGroup>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some),
    }
}

/// Parse a list of condition names into a deduplicated set.
pub fn parse_health_conditions<S: AsRef<str>>(
    raw: &[S],
) -> Result<BTreeSet<HealthCondition>, CoreError> {
    raw.iter().map(|s| s.as_ref().trim().parse()).collect()
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// A subscriber's standing request to be alerted about one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subscription {
    pub subscriber_id: SubscriberId,
    pub location: String,
    pub threshold: f64,
    pub age_group: Option<AgeGroup>,
    pub health_conditions: BTreeSet<HealthCondition>,
    pub created_at: Timestamp,
    pub last_alert: Option<Timestamp>,
}

/// Input for creating or replacing a subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    /// Generated when absent.
    pub subscriber_id: Option<SubscriberId>,
    pub location: String,
    pub threshold: f64,
    pub age_group: Option<AgeGroup>,
    pub health_conditions: BTreeSet<HealthCondition>,
}

impl NewSubscription {
    /// A subscription for `location` with the default threshold and no profile.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            subscriber_id: None,
            location: location.into(),
            threshold: DEFAULT_THRESHOLD,
            age_group: None,
            health_conditions: BTreeSet::new(),
        }
    }

    pub fn with_subscriber_id(mut self, id: impl Into<SubscriberId>) -> Self {
        self.subscriber_id = Some(id.into());
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_age_group(mut self, age_group: AgeGroup) -> Self {
        self.age_group = Some(age_group);
        self
    }

    /// Reject input that would violate subscription invariants.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.location.trim().is_empty() {
            return Err(CoreError::Validation("Location is required".to_string()));
        }
        if let Some(id) = &self.subscriber_id {
            if id.trim().is_empty() {
                return Err(CoreError::Validation(
                    "subscriber id must not be empty".to_string(),
                ));
            }
        }
        validate_threshold(self.threshold)
    }

    /// Build the stored record, stamping `created_at` and clearing `last_alert`.
    pub fn into_subscription(self, subscriber_id: SubscriberId, now: Timestamp) -> Subscription {
        Subscription {
            subscriber_id,
            location: self.location.trim().to_string(),
            threshold: self.threshold,
            age_group: self.age_group,
            health_conditions: self.health_conditions,
            created_at: now,
            last_alert: None,
        }
    }
}

/// A threshold must be a finite, non-negative AQI value.
pub fn validate_threshold(threshold: f64) -> Result<(), CoreError> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(CoreError::Validation(format!(
            "threshold must be a finite non-negative number, got {threshold}"
        )));
    }
    Ok(())
}
