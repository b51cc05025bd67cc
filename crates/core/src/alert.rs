//! Alert severity levels and the AQI alert policy.

use serde::{Deserialize, Serialize};

/// Severity attached to a notification.
///
/// `Alert`, `Warning` and `Safe` come from comparing an AQI against a
/// personal threshold. `Moderate`, `High` and `Critical` come from the
/// [`AlertPolicy`] tiering of the raw AQI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    Safe,
    Warning,
    Alert,
    Moderate,
    High,
    Critical,
}

/// The severity and message an [`AlertPolicy`] assigns to an AQI value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyAlert {
    pub level: AlertLevel,
    pub message: String,
}

/// Maps an AQI value to an alert, or `None` below the lowest alerting tier.
pub trait AlertPolicy: Send + Sync {
    fn classify(&self, aqi: f64) -> Option<PolicyAlert>;
}

/// AQI above which [`TieredAlertPolicy`] starts alerting.
pub const MODERATE_ALERT_AQI: f64 = 100.0;
const HIGH_ALERT_AQI: f64 = 150.0;
const CRITICAL_ALERT_AQI: f64 = 200.0;

/// Three-tier policy: MODERATE above 100, HIGH above 150, CRITICAL above 200.
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredAlertPolicy;

impl AlertPolicy for TieredAlertPolicy {
    fn classify(&self, aqi: f64) -> Option<PolicyAlert> {
        let (level, message) = if aqi > CRITICAL_ALERT_AQI {
            (
                AlertLevel::Critical,
                format!(
                    "CRITICAL AIR QUALITY ALERT: AQI is {aqi}. Avoid all outdoor activities immediately!"
                ),
            )
        } else if aqi > HIGH_ALERT_AQI {
            (
                AlertLevel::High,
                format!("HIGH AIR QUALITY ALERT: AQI is {aqi}. Sensitive groups should stay indoors."),
            )
        } else if aqi > MODERATE_ALERT_AQI {
            (
                AlertLevel::Moderate,
                format!(
                    "MODERATE AIR QUALITY ALERT: AQI is {aqi}. Sensitive individuals should limit outdoor activities."
                ),
            )
        } else {
            return None;
        };

        Some(PolicyAlert { level, message })
    }
}

// ---------------------------------------------------------------------------
// Threshold comparison
// ---------------------------------------------------------------------------

/// How an observed AQI relates to a subscriber's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Higher,
    Equal,
    Lower,
}

impl Comparison {
    pub fn of(aqi: f64, threshold: f64) -> Self {
        if aqi > threshold {
            Comparison::Higher
        } else if aqi == threshold {
            Comparison::Equal
        } else {
            Comparison::Lower
        }
    }

    /// ALERT above the threshold, WARNING on it, SAFE below.
    pub fn level(self) -> AlertLevel {
        match self {
            Comparison::Higher => AlertLevel::Alert,
            Comparison::Equal => AlertLevel::Warning,
            Comparison::Lower => AlertLevel::Safe,
        }
    }

    /// Wording used in "..., which is {phrase} your threshold".
    pub fn phrase(self) -> &'static str {
        match self {
            Comparison::Higher => "higher than",
            Comparison::Equal => "equal to",
            Comparison::Lower => "lower than",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_is_silent_at_or_below_100() {
        let policy = TieredAlertPolicy;
        assert!(policy.classify(42.0).is_none());
        assert!(policy.classify(100.0).is_none());
    }

    #[test]
    fn policy_tiers() {
        let policy = TieredAlertPolicy;
        assert_eq!(policy.classify(101.0).unwrap().level, AlertLevel::Moderate);
        assert_eq!(policy.classify(150.0).unwrap().level, AlertLevel::Moderate);
        assert_eq!(policy.classify(151.0).unwrap().level, AlertLevel::High);
        assert_eq!(policy.classify(200.0).unwrap().level, AlertLevel::High);
        assert_eq!(policy.classify(201.0).unwrap().level, AlertLevel::Critical);
    }

    #[test]
    fn policy_message_mentions_value() {
        let alert = TieredAlertPolicy.classify(180.0).unwrap();
        assert!(alert.message.contains("AQI is 180"));
        assert!(alert.message.starts_with("HIGH"));
    }

    #[test]
    fn comparison_levels_follow_threshold() {
        for threshold in [0.0, 50.0, 100.0, 250.5] {
            assert_eq!(Comparison::of(threshold + 1.0, threshold).level(), AlertLevel::Alert);
            assert_eq!(Comparison::of(threshold, threshold).level(), AlertLevel::Warning);
            assert_eq!(Comparison::of(threshold - 0.5, threshold).level(), AlertLevel::Safe);
        }
    }

    #[test]
    fn comparison_phrases_read_as_sentences() {
        assert_eq!(Comparison::of(5.0, 1.0).phrase(), "higher than");
        assert_eq!(Comparison::of(1.0, 1.0).phrase(), "equal to");
        assert_eq!(Comparison::of(0.0, 1.0).phrase(), "lower than");
    }

    #[test]
    fn level_serializes_screaming() {
        let json = serde_json::to_string(&AlertLevel::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
    }
}
