use std::env;

use civicdesk_core::{AppError, AppResult};
use civicdesk_domain::GeofencePolicy;
use url::Url;

/// Runtime configuration resolved from the process environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub notify_webhook_url: Option<String>,
    pub geofence_policy: GeofencePolicy,
}

impl ApiConfig {
    /// Loads configuration from environment variables.
    pub fn load() -> AppResult<Self> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        let notify_webhook_url = env::var("NOTIFY_WEBHOOK_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| {
                Url::parse(value.as_str())
                    .map(|_| value)
                    .map_err(|error| {
                        AppError::Validation(format!("invalid NOTIFY_WEBHOOK_URL: {error}"))
                    })
            })
            .transpose()?;

        let geofence_policy = GeofencePolicy::new(
            optional_f64_env("GEOFENCE_MAX_ACCURACY_METERS")?
                .unwrap_or(GeofencePolicy::default().max_accuracy_meters()),
            optional_f64_env("GEOFENCE_MAX_RADIUS_METERS")?
                .unwrap_or(GeofencePolicy::default().max_radius_meters()),
        )?;

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            api_host,
            api_port,
            notify_webhook_url,
            geofence_policy,
        })
    }
}

fn required_env(name: &str) -> AppResult<String> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn optional_f64_env(name: &str) -> AppResult<Option<f64>> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|error| AppError::Validation(format!("invalid {name}: {error}")))
        })
        .transpose()
}
