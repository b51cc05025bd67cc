#![allow(dead_code)]

use std::sync::Arc;

use airwatch_api::config::ServerConfig;
use airwatch_api::router::build_app_router;
use airwatch_api::state::AppState;
use airwatch_core::aqi::{AqiReading, AqiSource};
use airwatch_data::ReadingStore;
use airwatch_events::NotificationBus;
use airwatch_monitor::{AlertService, MonitorConfig};
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        aqi_data_path: None,
        monitor: MonitorConfig::default(),
    }
}

fn reading(city: &str, day: u32, aqi: Option<f64>) -> AqiReading {
    AqiReading {
        city: city.to_string(),
        date: NaiveDate::from_ymd_opt(2020, 7, day).unwrap(),
        aqi,
        aqi_bucket: None,
        main_pollutant: "PM2.5".to_string(),
    }
}

/// Readings used by every API test.
///
/// Delhi: 180 (latest). Mumbai: 42. Patna: known but latest AQI missing.
pub fn test_readings() -> ReadingStore {
    ReadingStore::from_readings([
        reading("Delhi", 1, Some(95.0)),
        reading("Delhi", 2, Some(180.0)),
        reading("Mumbai", 2, Some(42.0)),
        reading("Patna", 1, Some(130.0)),
        reading("Patna", 2, None),
    ])
}

/// Application state over [`test_readings`].
pub fn test_state() -> AppState {
    let readings = Arc::new(test_readings());
    let alerts = Arc::new(AlertService::new(
        Arc::clone(&readings) as Arc<dyn AqiSource>,
        Arc::new(NotificationBus::default()),
        MonitorConfig::default(),
    ));
    AppState {
        alerts,
        readings,
    }
}

/// Build the full application router with all middleware layers.
///
/// Uses the same builder as `main.rs` so tests exercise the production
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery).
pub fn build_test_app(state: AppState) -> Router {
    let config = test_config();
    build_app_router(state, &config).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
