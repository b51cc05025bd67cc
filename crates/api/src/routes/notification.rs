//! Route definitions for the `/notifications` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /                    -> list_subscriptions
/// POST   /subscribe           -> subscribe
/// POST   /unsubscribe         -> unsubscribe
/// POST   /test                -> test_notification
/// GET    /{user_id}/history   -> alert_history
///
/// GET    /monitor             -> monitor_status
/// POST   /monitor/start       -> start_monitor
/// POST   /monitor/stop        -> stop_monitor
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list_subscriptions))
        .route("/subscribe", post(notification::subscribe))
        .route("/unsubscribe", post(notification::unsubscribe))
        .route("/test", post(notification::test_notification))
        .route("/{user_id}/history", get(notification::alert_history))
        // Monitor lifecycle
        .route("/monitor", get(notification::monitor_status))
        .route("/monitor/start", post(notification::start_monitor))
        .route("/monitor/stop", post(notification::stop_monitor))
}
