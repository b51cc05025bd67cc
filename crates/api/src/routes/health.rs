use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the threshold monitor loop is running.
    pub monitor_active: bool,
    /// Number of cities with AQI readings.
    pub cities: usize,
}

/// GET /health -- returns service status.
///
/// Reports `degraded` when no AQI data is loaded.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let cities = state.readings.cities().len();
    let status = if cities > 0 { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        monitor_active: state.alerts.monitor_active().await,
        cities,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
