//! Route definitions for AQI lookups.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::aqi;
use crate::state::AppState;

/// ```text
/// POST   /aqi             -> get_aqi
/// POST   /health-alerts   -> health_alerts
/// GET    /cities          -> list_cities
/// GET    /cities/{city}/history -> city_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/aqi", post(aqi::get_aqi))
        .route("/health-alerts", post(aqi::health_alerts))
        .route("/cities", get(aqi::list_cities))
        .route("/cities/{city}/history", get(aqi::city_history))
}
