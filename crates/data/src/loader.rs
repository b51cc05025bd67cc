//! Seed-file loading for the reading store.
//!
//! The seed file is a JSON array of daily city records using the column
//! names of the public city-day AQI dataset:
//!
//! ```json
//! [{ "City": "Delhi", "Date": "2020-07-01", "AQI": 180.0, "AQI_Bucket": "Moderate" }]
//! ```
//!
//! Rows with a blank city, an unparsable date or no numeric AQI are dropped.

use std::path::Path;

use airwatch_core::aqi::AqiReading;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::store::ReadingStore;

/// Pollutant reported for every row; the dataset does not carry one.
const DEFAULT_POLLUTANT: &str = "PM2.5";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read AQI data file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse AQI data file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(alias = "City")]
    city: Option<String>,
    #[serde(alias = "Date")]
    date: Option<String>,
    #[serde(alias = "AQI")]
    aqi: Option<f64>,
    #[serde(alias = "AQI_Bucket", default)]
    aqi_bucket: Option<String>,
}

/// Load and normalize a seed file into a [`ReadingStore`].
pub fn load_store(path: impl AsRef<Path>) -> Result<ReadingStore, LoadError> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: shown.clone(),
        source,
    })?;
    let records: Vec<RawRecord> =
        serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
            path: shown.clone(),
            source,
        })?;

    let total = records.len();
    let readings: Vec<AqiReading> = records.into_iter().filter_map(normalize).collect();

    tracing::info!(
        path = %shown,
        total,
        kept = readings.len(),
        "Loaded AQI readings"
    );

    Ok(ReadingStore::from_readings(readings))
}

fn normalize(record: RawRecord) -> Option<AqiReading> {
    let city = record.city?.trim().to_string();
    if city.is_empty() {
        return None;
    }
    let date = parse_date(record.date?.trim())?;
    let aqi = record.aqi.filter(|v| v.is_finite())?;

    Some(AqiReading {
        city,
        date,
        aqi: Some(aqi),
        aqi_bucket: record.aqi_bucket.filter(|b| !b.trim().is_empty()),
        main_pollutant: DEFAULT_POLLUTANT.to_string(),
    })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .ok()
}
