//! In-memory AQI reading store.
//!
//! [`ReadingStore`] indexes readings by lower-cased city name and answers
//! "latest reading" queries for the alert engine. It is immutable after
//! construction and is meant to be shared via `Arc<ReadingStore>`.

use std::collections::HashMap;

use airwatch_core::aqi::{AqiReading, AqiSource, AqiSourceError};
use async_trait::async_trait;

/// Read-only index of AQI readings keyed by city.
#[derive(Debug, Default)]
pub struct ReadingStore {
    /// Lower-cased city name -> readings sorted by date ascending.
    by_city: HashMap<String, Vec<AqiReading>>,
}

impl ReadingStore {
    /// Build a store from an unordered list of readings.
    pub fn from_readings(readings: impl IntoIterator<Item = AqiReading>) -> Self {
        let mut by_city: HashMap<String, Vec<AqiReading>> = HashMap::new();
        for reading in readings {
            by_city
                .entry(city_key(&reading.city))
                .or_default()
                .push(reading);
        }
        for rows in by_city.values_mut() {
            rows.sort_by_key(|r| r.date);
        }
        Self { by_city }
    }

    /// The most recent reading for `city` (case-insensitive).
    pub fn latest(&self, city: &str) -> Option<&AqiReading> {
        self.by_city.get(&city_key(city)).and_then(|rows| rows.last())
    }

    /// All readings for `city`, oldest first.
    pub fn history(&self, city: &str) -> &[AqiReading] {
        self.by_city
            .get(&city_key(city))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Sorted, deduplicated display names of all known cities.
    pub fn cities(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .by_city
            .values()
            .filter_map(|rows| rows.last().map(|r| r.city.clone()))
            .collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.by_city.is_empty()
    }
}

#[async_trait]
impl AqiSource for ReadingStore {
    async fn latest_reading(&self, location: &str) -> Result<AqiReading, AqiSourceError> {
        self.latest(location)
            .cloned()
            .ok_or_else(|| AqiSourceError::UnknownLocation(location.to_string()))
    }
}

fn city_key(city: &str) -> String {
    city.trim().to_lowercase()
}
