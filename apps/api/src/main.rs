//! CivicDesk API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware::from_fn;
use axum::routing::{get, post, put};
use civicdesk_application::{NotificationDispatcher, ReportService};
use civicdesk_core::AppError;
use civicdesk_infrastructure::{
    ConsoleNotificationDispatcher, PostgresReportRepository, PostgresStaffDirectory,
    WebhookNotificationDispatcher,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api_config::ApiConfig;
use crate::state::AppState;

const NOTIFY_MAX_ATTEMPTS: u8 = 3;
const NOTIFY_RETRY_BACKOFF_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let report_repository = Arc::new(PostgresReportRepository::new(pool.clone()));
    let staff_directory = Arc::new(PostgresStaffDirectory::new(pool.clone()));

    let notifications: Arc<dyn NotificationDispatcher> = match &config.notify_webhook_url {
        Some(endpoint) => Arc::new(WebhookNotificationDispatcher::new(
            reqwest::Client::new(),
            endpoint.clone(),
            NOTIFY_MAX_ATTEMPTS,
            NOTIFY_RETRY_BACKOFF_MS,
        )),
        None => Arc::new(ConsoleNotificationDispatcher::new()),
    };

    let report_service = ReportService::new(report_repository, staff_directory, notifications)
        .with_geofence_policy(config.geofence_policy);

    let app_state = AppState { report_service };

    let report_routes = Router::new()
        .route("/api/reports", post(handlers::reports::file_report_handler))
        .route(
            "/api/reports/{report_id}",
            get(handlers::reports::get_report_handler),
        )
        .route(
            "/api/reports/{report_id}/updates",
            get(handlers::reports::list_report_updates_handler),
        )
        .route(
            "/api/reports/{report_id}/assign",
            put(handlers::reports::assign_report_handler),
        )
        .route(
            "/api/reports/{report_id}/resolve",
            put(handlers::reports::resolve_report_handler),
        )
        .route(
            "/api/reports/{report_id}/verify",
            post(handlers::reports::verify_report_handler),
        )
        .route(
            "/api/reports/{report_id}/reject",
            post(handlers::reports::reject_report_handler),
        )
        .route(
            "/api/reports/{report_id}/close",
            put(handlers::reports::close_report_handler),
        )
        .route_layer(from_fn(middleware::require_actor));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&config.frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static("x-actor-subject"),
            HeaderName::from_static("x-actor-role"),
            HeaderName::from_static("x-actor-name"),
        ]);

    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(report_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state);

    let host = IpAddr::from_str(&config.api_host).map_err(|error| {
        AppError::Internal(format!("invalid API_HOST '{}': {error}", config.api_host))
    })?;
    let address = SocketAddr::from((host, config.api_port));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "civicdesk-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
