//! Health recommendations by AQI category.
//!
//! Pure logic. Used by the AQI lookup endpoints; the alert engine only needs
//! the shorter [`crate::precaution`] text.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::subscription::{AgeGroup, HealthCondition};

const GOOD: &[&str] = &[
    "Air quality is good - perfect for outdoor activities",
    "Great day for exercising outdoors",
    "All outdoor activities are safe for everyone",
];

const MODERATE: &[&str] = &[
    "Air quality is acceptable for most people",
    "Sensitive individuals may experience minor symptoms",
    "Outdoor activities are generally safe",
];

const SENSITIVE: &[&str] = &[
    "Sensitive groups should limit outdoor activities",
    "Consider wearing a mask if you have respiratory conditions",
    "Keep windows closed and use air purifiers indoors",
];

const UNHEALTHY: &[&str] = &[
    "Everyone should limit outdoor activities",
    "Wear N95 masks when going outside",
    "Avoid strenuous outdoor exercise",
    "Stay indoors with air purifiers running",
];

const VERY_UNHEALTHY: &[&str] = &[
    "Avoid outdoor activities entirely",
    "Wear high-quality masks (N95/N99) if you must go outside",
    "Keep all windows and doors closed",
    "Use air purifiers and avoid cooking that creates smoke",
];

const HAZARDOUS: &[&str] = &[
    "Emergency conditions - avoid all outdoor activities",
    "Wear N99 masks if you must go outside",
    "Seal your home and use multiple air purifiers",
    "Consider relocating temporarily if possible",
];

/// AQI category with display colour and a list of recommendations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthAdvice {
    pub category: &'static str,
    pub color: &'static str,
    pub aqi_value: f64,
    pub recommendations: Vec<&'static str>,
}

/// Build recommendations for `aqi`, personalized by age group and conditions.
pub fn recommendations(
    aqi: f64,
    age_group: Option<AgeGroup>,
    health_conditions: &BTreeSet<HealthCondition>,
) -> HealthAdvice {
    let (category, color, base) = if aqi <= 50.0 {
        ("Good", "green", GOOD)
    } else if aqi <= 100.0 {
        ("Moderate", "yellow", MODERATE)
    } else if aqi <= 150.0 {
        ("Unhealthy for Sensitive Groups", "orange", SENSITIVE)
    } else if aqi <= 200.0 {
        ("Unhealthy", "red", UNHEALTHY)
    } else if aqi <= 300.0 {
        ("Very Unhealthy", "purple", VERY_UNHEALTHY)
    } else {
        ("Hazardous", "maroon", HAZARDOUS)
    };

    let mut recommendations = base.to_vec();

    match age_group {
        Some(AgeGroup::Child) if aqi > 100.0 => recommendations.extend([
            "Children should avoid outdoor play",
            "Schools should consider indoor recess",
            "Monitor children for coughing or breathing difficulties",
        ]),
        Some(AgeGroup::Elderly) if aqi > 80.0 => recommendations.extend([
            "Elderly individuals should minimize outdoor exposure",
            "Take medications as prescribed for respiratory conditions",
            "Consider visiting air-conditioned public spaces",
        ]),
        Some(AgeGroup::Pregnant) if aqi > 100.0 => recommendations.extend([
            "Pregnant women should avoid outdoor activities",
            "Consult your doctor about air quality concerns",
            "Consider using air purifiers in the bedroom",
        ]),
        _ => {}
    }

    if health_conditions.contains(&HealthCondition::Asthma) && aqi > 80.0 {
        recommendations.extend([
            "Keep rescue inhaler readily available",
            "Monitor symptoms closely",
            "Consider pre-medicating before going outside",
        ]);
    }
    if health_conditions.contains(&HealthCondition::HeartDisease) && aqi > 100.0 {
        recommendations.extend([
            "Avoid strenuous activities",
            "Monitor heart rate and blood pressure",
            "Consult your cardiologist if symptoms worsen",
        ]);
    }
    if health_conditions.contains(&HealthCondition::Copd) && aqi > 80.0 {
        recommendations.extend([
            "Use supplemental oxygen as prescribed",
            "Avoid all outdoor activities",
            "Have emergency medications ready",
        ]);
    }

    HealthAdvice {
        category,
        color,
        aqi_value: aqi,
        recommendations,
    }
}
