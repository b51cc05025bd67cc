//! Fixtures shared by this crate's unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use airwatch_core::aqi::{AqiReading, AqiSource, AqiSourceError};
use airwatch_core::subscription::{NewSubscription, Subscription};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

pub fn subscription(id: &str, location: &str, threshold: f64) -> Subscription {
    NewSubscription::new(location)
        .with_threshold(threshold)
        .into_subscription(id.to_string(), Utc::now())
}

/// Scriptable AQI source. Cities are matched case-insensitively.
#[derive(Default)]
pub struct FakeSource {
    readings: Mutex<HashMap<String, Option<f64>>>,
    lookups: AtomicUsize,
    failures: AtomicUsize,
    latency: Mutex<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeSource {
    pub fn set(&self, city: &str, aqi: f64) {
        self.readings
            .lock()
            .unwrap()
            .insert(city.to_lowercase(), Some(aqi));
    }

    /// Known city whose latest row has no AQI.
    pub fn set_missing(&self, city: &str) {
        self.readings.lock().unwrap().insert(city.to_lowercase(), None);
    }

    /// Make the next `n` lookups fail as a source outage.
    pub fn fail_next(&self, n: usize) {
        self.failures.store(n, Ordering::SeqCst);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Make every lookup take `latency` (tokio time) before answering.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    /// Highest number of lookups that were ever in progress at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AqiSource for FakeSource {
    async fn latest_reading(&self, location: &str) -> Result<AqiReading, AqiSourceError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(latency).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }

        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(AqiSourceError::Unavailable("scripted outage".to_string()));
        }

        let aqi = self
            .readings
            .lock()
            .unwrap()
            .get(&location.to_lowercase())
            .copied()
            .ok_or_else(|| AqiSourceError::UnknownLocation(location.to_string()))?;

        Ok(AqiReading {
            city: location.to_string(),
            date: NaiveDate::from_ymd_opt(2020, 7, 1).unwrap(),
            aqi,
            aqi_bucket: None,
            main_pollutant: "PM2.5".to_string(),
        })
    }
}
