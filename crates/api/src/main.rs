use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use airwatch_core::aqi::AqiSource;
use airwatch_data::ReadingStore;
use airwatch_events::{NotificationBus, NotificationLogger};
use airwatch_monitor::AlertService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use airwatch_api::config::ServerConfig;
use airwatch_api::router::build_app_router;
use airwatch_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "airwatch_api=debug,airwatch_monitor=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let readings = match &config.aqi_data_path {
        Some(path) => {
            let store = airwatch_data::load_store(path).expect("Failed to load AQI data");
            if store.is_empty() {
                tracing::warn!(path = %path.display(), "AQI data file has no usable readings");
            } else {
                tracing::info!(path = %path.display(), cities = store.cities().len(), "AQI data loaded");
            }
            store
        }
        None => {
            tracing::warn!("AQI_DATA_PATH not set, starting with no AQI data");
            ReadingStore::default()
        }
    };
    let readings = Arc::new(readings);

    let bus = Arc::new(NotificationBus::default());
    let logger_handle = tokio::spawn(NotificationLogger::run(bus.subscribe()));

    let alerts = Arc::new(AlertService::new(
        Arc::clone(&readings) as Arc<dyn AqiSource>,
        Arc::clone(&bus),
        config.monitor,
    ));
    tracing::info!("Alert service created");

    let state = AppState {
        alerts: Arc::clone(&alerts),
        readings,
    };

    let app = build_app_router(state, &config).expect("Invalid CORS configuration");

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped accepting connections, cleaning up");

    alerts.stop_monitor().await;
    tracing::info!("Threshold monitor stopped");

    // The logger exits once every bus sender is gone.
    drop(alerts);
    drop(bus);
    match tokio::time::timeout(Duration::from_secs(5), logger_handle).await {
        Ok(Ok(logged)) => tracing::info!(logged, "Notification logger shut down"),
        _ => tracing::warn!("Notification logger did not shut down cleanly"),
    }

    tracing::info!("Graceful shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
