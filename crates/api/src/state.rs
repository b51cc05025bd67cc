use std::sync::Arc;

use airwatch_data::ReadingStore;
use airwatch_monitor::AlertService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Subscriptions, monitor lifecycle and immediate checks.
    pub alerts: Arc<AlertService>,
    /// AQI readings used by the lookup endpoints and as the alert data source.
    pub readings: Arc<ReadingStore>,
}
