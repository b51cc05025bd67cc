pub mod aqi;
pub mod health;
pub mod notification;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /aqi                                      AQI lookup
/// /health-alerts                            personalized recommendations
/// /cities                                   known cities
///     /{city}/history                       readings for one city
///
/// /notifications                            list subscriptions
///     /subscribe                            subscribe
///     /unsubscribe                          unsubscribe
///     /test                                 immediate check
///     /{user_id}/history                    alert history
///     /monitor                              monitor status
///     /monitor/start                        start monitor
///     /monitor/stop                         stop monitor
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(aqi::router())
        .nest("/notifications", notification::router())
}
