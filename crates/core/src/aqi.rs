//! AQI readings and the data-source contract consumed by the alert engine.
//!
//! The engine never loads data itself. Anything that can answer "what is
//! the latest AQI for this city?" implements [`AqiSource`].

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated AQI observation for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqiReading {
    pub city: String,
    pub date: NaiveDate,
    /// `None` when the row exists but carries no numeric value.
    pub aqi: Option<f64>,
    pub aqi_bucket: Option<String>,
    pub main_pollutant: String,
}

/// Failure modes of an AQI lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AqiSourceError {
    /// The city has no rows at all.
    #[error("City \"{0}\" not found in dataset")]
    UnknownLocation(String),

    /// The city is known but its latest row has no numeric AQI.
    #[error("No AQI reading available for {0}")]
    MissingReading(String),

    /// The source itself failed (I/O, upstream outage, poisoned state).
    #[error("AQI source unavailable: {0}")]
    Unavailable(String),
}

impl AqiSourceError {
    /// Whether this is the ordinary "no data for that city" case.
    ///
    /// Callers skip such locations quietly; anything else is a fault of the
    /// source itself.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            AqiSourceError::UnknownLocation(_) | AqiSourceError::MissingReading(_)
        )
    }
}

/// Provider of current AQI values. Location matching is case-insensitive.
#[async_trait]
pub trait AqiSource: Send + Sync {
    /// Return the most recent reading for `location`.
    async fn latest_reading(&self, location: &str) -> Result<AqiReading, AqiSourceError>;

    /// Return the numeric AQI of the most recent reading for `location`.
    async fn current_aqi(&self, location: &str) -> Result<f64, AqiSourceError> {
        let reading = self.latest_reading(location).await?;
        reading
            .aqi
            .filter(|v| v.is_finite())
            .ok_or_else(|| AqiSourceError::MissingReading(location.to_string()))
    }
}
