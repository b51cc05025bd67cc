//! Handlers for the `/notifications` resource.

use airwatch_core::notification::NotificationEvent;
use airwatch_core::subscription::{
    parse_age_group, parse_health_conditions, NewSubscription, Subscription, DEFAULT_THRESHOLD,
};
use airwatch_monitor::{CheckOutcome, CheckReport, CheckRequest};
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /notifications/subscribe`.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    /// Generated when omitted.
    pub user_id: Option<String>,
    #[serde(default)]
    pub location: String,
    pub threshold: Option<f64>,
    pub age_group: Option<String>,
    #[serde(default)]
    pub health_conditions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub subscriber_id: String,
    pub accepted: bool,
    pub message: String,
    pub subscription: Subscription,
}

/// Body of `POST /notifications/unsubscribe`.
#[derive(Debug, Deserialize, Validate)]
pub struct UnsubscribeRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct UnsubscribeResponse {
    pub subscriber_id: String,
    pub accepted: bool,
}

/// Body of `POST /notifications/test`.
#[derive(Debug, Default, Deserialize)]
pub struct TestRequest {
    pub user_id: Option<String>,
    pub location: Option<String>,
    pub threshold: Option<f64>,
}

/// Result of an immediate check. `report` is absent when `success` is false.
#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub success: bool,
    pub message: String,
    pub report: Option<CheckReport>,
}

impl From<CheckOutcome> for TestResponse {
    fn from(outcome: CheckOutcome) -> Self {
        match outcome {
            CheckOutcome::Evaluated(report) => Self {
                success: true,
                message: report.message.clone(),
                report: Some(report),
            },
            CheckOutcome::Failed(failure) => Self {
                success: false,
                message: failure.to_string(),
                report: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MonitorStatus {
    pub active: bool,
    /// Whether the request changed the monitor state.
    pub changed: bool,
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications
pub async fn list_subscriptions(
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<Subscription>>> {
    Json(DataResponse {
        data: state.alerts.list_subscriptions().await,
    })
}

/// POST /api/v1/notifications/subscribe
///
/// Subscribing an existing `user_id` replaces that subscription.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(input): Json<SubscribeRequest>,
) -> AppResult<Json<DataResponse<SubscribeResponse>>> {
    let mut request = NewSubscription::new(input.location)
        .with_threshold(input.threshold.unwrap_or(DEFAULT_THRESHOLD));
    request.subscriber_id = input.user_id.filter(|id| !id.trim().is_empty());
    request.age_group = parse_age_group(input.age_group.as_deref())?;
    request.health_conditions = parse_health_conditions(&input.health_conditions)?;

    let subscription = state.alerts.subscribe(request).await?;

    Ok(Json(DataResponse {
        data: SubscribeResponse {
            subscriber_id: subscription.subscriber_id.clone(),
            accepted: true,
            message: format!("Subscribed to alerts for {}", subscription.location),
            subscription,
        },
    }))
}

/// POST /api/v1/notifications/unsubscribe
///
/// An unknown `user_id` is not an error: it yields `accepted: false`.
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(input): Json<UnsubscribeRequest>,
) -> AppResult<Json<DataResponse<UnsubscribeResponse>>> {
    input.validate()?;

    let accepted = state.alerts.unsubscribe(&input.user_id).await;

    Ok(Json(DataResponse {
        data: UnsubscribeResponse {
            subscriber_id: input.user_id,
            accepted,
        },
    }))
}

/// POST /api/v1/notifications/test
///
/// Runs an immediate check. Missing data or an unknown subscriber is a
/// normal `success: false` result, not an HTTP error.
pub async fn test_notification(
    State(state): State<AppState>,
    Json(input): Json<TestRequest>,
) -> AppResult<Json<DataResponse<TestResponse>>> {
    let outcome = state
        .alerts
        .immediate_check(CheckRequest {
            subscriber_id: input.user_id,
            location: input.location,
            threshold: input.threshold,
        })
        .await?;

    Ok(Json(DataResponse {
        data: outcome.into(),
    }))
}

/// GET /api/v1/notifications/{user_id}/history
///
/// Oldest first, at most ten events. Unknown ids yield an empty list.
pub async fn alert_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<DataResponse<Vec<NotificationEvent>>> {
    Json(DataResponse {
        data: state.alerts.alert_history(&user_id).await,
    })
}

// ---------------------------------------------------------------------------
// Monitor lifecycle
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications/monitor
pub async fn monitor_status(State(state): State<AppState>) -> Json<DataResponse<MonitorStatus>> {
    Json(DataResponse {
        data: MonitorStatus {
            active: state.alerts.monitor_active().await,
            changed: false,
        },
    })
}

/// POST /api/v1/notifications/monitor/start
pub async fn start_monitor(State(state): State<AppState>) -> Json<DataResponse<MonitorStatus>> {
    let changed = state.alerts.start_monitor().await;
    Json(DataResponse {
        data: MonitorStatus {
            active: state.alerts.monitor_active().await,
            changed,
        },
    })
}

/// POST /api/v1/notifications/monitor/stop
pub async fn stop_monitor(State(state): State<AppState>) -> Json<DataResponse<MonitorStatus>> {
    let changed = state.alerts.stop_monitor().await;
    Json(DataResponse {
        data: MonitorStatus {
            active: state.alerts.monitor_active().await,
            changed,
        },
    })
}
