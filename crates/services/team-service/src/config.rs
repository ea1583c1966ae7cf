//! Team service configuration.

use std::env;

use common::{DatabaseConfig, ServiceConfig};

/// Team service configuration.
#[derive(Debug, Clone)]
pub struct TeamServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
}

impl TeamServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = DatabaseConfig::default();

        Self {
            service: ServiceConfig {
                service_name: "team-service".to_string(),
                log_level: env::var("TEAM_SERVICE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig {
                url: env::var("TEAM_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.url),
                max_connections: parsed("DATABASE_MAX_CONNECTIONS").unwrap_or(defaults.max_connections),
                min_connections: parsed("DATABASE_MIN_CONNECTIONS").unwrap_or(defaults.min_connections),
                connect_timeout_secs: parsed("DATABASE_CONNECT_TIMEOUT_SECS")
                    .unwrap_or(defaults.connect_timeout_secs),
                acquire_timeout_secs: parsed("DATABASE_ACQUIRE_TIMEOUT_SECS")
                    .unwrap_or(defaults.acquire_timeout_secs),
                sqlx_logging: parsed("DATABASE_SQLX_LOGGING").unwrap_or(defaults.sqlx_logging),
            },
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
