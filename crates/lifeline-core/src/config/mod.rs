//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod database;
pub mod logging;
pub mod monitor;
pub mod notify;
pub mod schedule;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::{DatabaseConfig, DatabaseProvider};
pub use self::logging::LoggingConfig;
pub use self::monitor::{ContactsConfig, MonitorConfig, SuppressionBackend};
pub use self::notify::{EmailConfig, EmailProvider, SmsConfig, SmsProvider};
pub use self::schedule::ScheduleConfig;

use crate::error::AppError;
use crate::types::LocalCalendar;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Persistence settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Escalation engine thresholds and limits.
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// Emergency contact policy.
    #[serde(default)]
    pub contacts: ContactsConfig,
    /// Evaluation schedule.
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// Email delivery settings.
    #[serde(default)]
    pub email: EmailConfig,
    /// SMS delivery settings.
    #[serde(default)]
    pub sms: SmsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `LIFELINE__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("LIFELINE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.monitor.email_after_days < 1 {
            return Err(AppError::configuration(
                "monitor.email_after_days must be at least 1",
            ));
        }
        if self.monitor.sms_after_days < 1 {
            return Err(AppError::configuration(
                "monitor.sms_after_days must be at least 1",
            ));
        }
        if self.monitor.user_concurrency == 0 || self.monitor.contact_concurrency == 0 {
            return Err(AppError::configuration(
                "monitor concurrency limits must be greater than zero",
            ));
        }
        if self.database.provider == DatabaseProvider::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required for the postgres provider",
            ));
        }
        if self.monitor.suppression_backend == SuppressionBackend::Database
            && self.database.provider != DatabaseProvider::Postgres
        {
            return Err(AppError::configuration(
                "monitor.suppression_backend = \"database\" requires the postgres provider",
            ));
        }
        LocalCalendar::from_config(
            self.monitor.timezone.as_deref(),
            self.monitor.utc_offset_minutes,
        )?;
        self.schedule.parsed_daily_times()?;
        self.schedule.parsed_next_expected_time()?;
        Ok(())
    }
}
