use serde::Deserialize;
use std::env;

use crate::core::{AppError, ReportTimezone, Result};

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    /// Report timezone offset, e.g. "+05:30". Every calendar bucket
    /// (day/week/month/year) is computed in this timezone.
    pub report_tz_offset: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Allowed browser origins. Empty means any origin (development).
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                report_tz_offset: env::var("REPORT_TZ_OFFSET")
                    .unwrap_or_else(|_| "+05:30".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            cors: CorsConfig {
                allowed_origins: env::var("ALLOWED_ORIGINS")
                    .map(|raw| {
                        raw.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        };

        Ok(config)
    }

    /// Validate configuration before the server binds
    pub fn validate(&self) -> Result<()> {
        ReportTimezone::parse(&self.app.report_tz_offset)?;

        if self.database.pool_size == 0 {
            return Err(AppError::Configuration(
                "Database pool size must be greater than 0".to_string(),
            ));
        }

        if self.database.max_connections < self.database.pool_size {
            return Err(AppError::Configuration(
                "DATABASE_MAX_CONNECTIONS must be >= DATABASE_POOL_SIZE".to_string(),
            ));
        }

        Ok(())
    }

    /// Parsed report timezone. Call after `validate()`.
    pub fn report_timezone(&self) -> Result<ReportTimezone> {
        ReportTimezone::parse(&self.app.report_tz_offset)
    }
}
