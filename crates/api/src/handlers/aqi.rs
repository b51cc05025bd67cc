//! Handlers for AQI lookups and health recommendations.

use airwatch_core::alert::{AlertPolicy, PolicyAlert, TieredAlertPolicy};
use airwatch_core::aqi::AqiReading;
use airwatch_core::recommendations::{recommendations, HealthAdvice};
use airwatch_core::subscription::{parse_age_group, parse_health_conditions};
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /aqi`.
#[derive(Debug, Deserialize, Validate)]
pub struct AqiRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
}

/// Body of `POST /health-alerts`.
#[derive(Debug, Deserialize, Validate)]
pub struct HealthAlertRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub age_group: Option<String>,
    #[serde(default)]
    pub health_conditions: Vec<String>,
}

/// Latest reading with advice derived from it.
///
/// `recommendations` and `alert` are absent when the reading has no AQI.
#[derive(Debug, Serialize)]
pub struct AqiReport {
    pub reading: AqiReading,
    pub recommendations: Option<HealthAdvice>,
    pub alert: Option<PolicyAlert>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/aqi
///
/// Latest reading for a city with generic recommendations and the alert tier.
pub async fn get_aqi(
    State(state): State<AppState>,
    Json(input): Json<AqiRequest>,
) -> AppResult<Json<DataResponse<AqiReport>>> {
    input.validate()?;

    let reading = latest_reading(&state, &input.location)?;
    let report = AqiReport {
        recommendations: reading
            .aqi
            .map(|aqi| recommendations(aqi, None, &Default::default())),
        alert: reading.aqi.and_then(|aqi| TieredAlertPolicy.classify(aqi)),
        reading,
    };

    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/health-alerts
///
/// Like [`get_aqi`] with recommendations personalized by age group and
/// health conditions. Unknown profile values are rejected with 400.
pub async fn health_alerts(
    State(state): State<AppState>,
    Json(input): Json<HealthAlertRequest>,
) -> AppResult<Json<DataResponse<AqiReport>>> {
    input.validate()?;
    let age_group = parse_age_group(input.age_group.as_deref())?;
    let conditions = parse_health_conditions(&input.health_conditions)?;

    let reading = latest_reading(&state, &input.location)?;
    let report = AqiReport {
        recommendations: reading
            .aqi
            .map(|aqi| recommendations(aqi, age_group, &conditions)),
        alert: reading.aqi.and_then(|aqi| TieredAlertPolicy.classify(aqi)),
        reading,
    };

    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/cities
pub async fn list_cities(State(state): State<AppState>) -> Json<DataResponse<Vec<String>>> {
    Json(DataResponse {
        data: state.readings.cities(),
    })
}

/// GET /api/v1/cities/{city}/history
///
/// Every stored reading for a city, oldest first.
pub async fn city_history(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> AppResult<Json<DataResponse<Vec<AqiReading>>>> {
    let history = state.readings.history(city.trim());
    if history.is_empty() {
        return Err(AppError::NotFound("Location not found".to_string()));
    }

    Ok(Json(DataResponse {
        data: history.to_vec(),
    }))
}

fn latest_reading(state: &AppState, location: &str) -> AppResult<AqiReading> {
    state
        .readings
        .latest(location.trim())
        .cloned()
        .ok_or_else(|| AppError::NotFound("Location not found".to_string()))
}
