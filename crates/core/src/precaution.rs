//! Personalized precaution text attached to threshold checks.

use std::collections::BTreeSet;

use crate::subscription::{AgeGroup, HealthCondition};

/// Precaution used when the AQI sits exactly on the threshold.
pub const WARNING_PRECAUTION: &str =
    "Monitor air quality closely and be prepared to take precautions if levels rise.";

/// Precaution used when the AQI is below the threshold.
pub const SAFE_PRECAUTION: &str = "Air quality is acceptable. Continue with normal activities.";

/// Build the precaution for an exceeded threshold.
///
/// The base sentence depends on the AQI tier (≤50, ≤100, ≤150, ≤200, ≤300,
/// above). At most one age clause follows, then one clause per applicable
/// health condition.
pub fn precaution_message(
    aqi: f64,
    age_group: Option<AgeGroup>,
    health_conditions: &BTreeSet<HealthCondition>,
) -> String {
    let mut message = String::from(base_message(aqi));

    match age_group {
        Some(AgeGroup::Child) if aqi > 100.0 => {
            message.push_str(" Children should avoid outdoor play and sports.");
        }
        Some(AgeGroup::Elderly) if aqi > 80.0 => {
            message.push_str(" Elderly individuals should minimize outdoor exposure.");
        }
        _ => {}
    }

    for condition in health_conditions {
        let clause = match condition {
            HealthCondition::Asthma if aqi > 100.0 => " Keep rescue inhaler readily available.",
            HealthCondition::HeartDisease if aqi > 100.0 => {
                " Avoid strenuous activities and monitor symptoms."
            }
            HealthCondition::Copd if aqi > 80.0 => " Use supplemental oxygen as prescribed.",
            _ => continue,
        };
        message.push_str(clause);
    }

    message
}

fn base_message(aqi: f64) -> &'static str {
    if aqi <= 50.0 {
        "Air quality is good. Perfect for outdoor activities."
    } else if aqi <= 100.0 {
        "Air quality is acceptable. Sensitive individuals should monitor symptoms."
    } else if aqi <= 150.0 {
        "Sensitive groups should limit outdoor activities. Consider wearing masks outdoors."
    } else if aqi <= 200.0 {
        "Everyone should limit outdoor activities. Wear masks when going outside."
    } else if aqi <= 300.0 {
        "Avoid outdoor activities entirely. Keep windows closed and use air purifiers."
    } else {
        "Emergency conditions. Stay indoors and avoid all outdoor activities."
    }
}
