//! Hawaiian Weather API Server
//!
//! Read-only JSON API over station metadata and daily precipitation and
//! temperature observations.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod error;
pub mod routes;

pub use self::config::Settings;
pub use self::error::{ApiError, ServerError};

use weather_storage::Repository;

/// Application state shared across handlers
///
/// The repository is read-only, so handlers share it without locking.
pub struct AppState {
    /// Storage repository
    pub repository: Repository,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create application state around an opened repository
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub station_count: Option<i64>,
    pub measurement_count: Option<i64>,
    pub earliest_date: Option<String>,
    pub latest_date: Option<String>,
}

/// Create the application router
///
/// Static segments take precedence over the `:start` capture, so
/// `/api/v1.0/stations` never reaches the date handler.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::home::list_routes))
        .route(
            "/api/v1.0/precipitation",
            get(routes::observations::get_precipitation),
        )
        .route("/api/v1.0/stations", get(routes::stations::list_stations))
        .route(
            "/api/v1.0/tobs",
            get(routes::observations::get_temperature_observations),
        )
        .route("/api/v1.0/:start", get(routes::temperature::stats_for_date))
        .route(
            "/api/v1.0/:start/:end",
            get(routes::temperature::stats_for_range),
        )
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let repo = &state.repository;
    let (stations, measurements, bounds) = tokio::join!(
        repo.station_count(),
        repo.measurement_count(),
        repo.date_bounds()
    );

    let healthy = stations.is_ok() && measurements.is_ok() && bounds.is_ok();
    if !healthy {
        warn!("Health check could not query the weather database");
    }
    let bounds = bounds.unwrap_or_default();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        station_count: stations.ok(),
        measurement_count: measurements.ok(),
        earliest_date: bounds.earliest,
        latest_date: bounds.latest,
    };

    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(response))
}

/// Parse a textual log level
pub fn parse_level(level: &str) -> Result<Level, ServerError> {
    level
        .parse::<Level>()
        .map_err(|_| ServerError::LogLevel(level.to_string()))
}

/// Initialize logging
pub fn init_logging(level: Level) -> Result<(), ServerError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Run the server until interrupted
pub async fn run_server(settings: &Settings) -> Result<(), ServerError> {
    if settings.metrics.enabled {
        let addr: SocketAddr = settings.metrics.listen.parse().map_err(|_| {
            ServerError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid metrics address {}", settings.metrics.listen),
            ))
        })?;
        PrometheusBuilder::new().with_http_listener(addr).install()?;
        info!("Prometheus exporter listening on {}", addr);
    }

    let repository =
        Repository::open(&settings.database.path, settings.database.max_connections).await?;
    let bounds = repository.date_bounds().await?;
    info!(
        "Serving {} stations and {} measurements ({} to {})",
        repository.station_count().await?,
        repository.measurement_count().await?,
        bounds.earliest.as_deref().unwrap_or("-"),
        bounds.latest.as_deref().unwrap_or("-"),
    );

    let state = Arc::new(AppState::new(repository.clone()));
    let app = create_router(state);

    let addr = settings.server.address();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repository.close().await;
    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
