//! Settings repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use lifeline_core::error::{AppError, ErrorKind};
use lifeline_core::result::AppResult;
use lifeline_core::types::UserId;
use lifeline_entity::settings::UserSettings;

use crate::traits::SettingsStore;

/// Repository for per-user settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Create a new settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for SettingsRepository {
    async fn find_by_user(&self, user_id: &UserId) -> AppResult<Option<UserSettings>> {
        sqlx::query_as::<_, UserSettings>("SELECT * FROM user_settings WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find settings", e))
    }

    async fn get_or_create(&self, user_id: &UserId, now: DateTime<Utc>) -> AppResult<UserSettings> {
        let defaults = UserSettings::defaults_for(user_id.clone(), now);
        sqlx::query(
            "INSERT INTO user_settings \
             (id, user_id, email_notify, sms_notify, auto_alarm, alarm_threshold_hours, email, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(defaults.id)
        .bind(&defaults.user_id)
        .bind(defaults.email_notify)
        .bind(defaults.sms_notify)
        .bind(defaults.auto_alarm)
        .bind(defaults.alarm_threshold_hours)
        .bind(&defaults.email)
        .bind(defaults.created_at)
        .bind(defaults.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create default settings", e)
        })?;

        self.find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::database(format!("Settings for {user_id} vanished")))
    }

    async fn save(&self, settings: &UserSettings) -> AppResult<UserSettings> {
        sqlx::query_as::<_, UserSettings>(
            "UPDATE user_settings SET email_notify = $2, sms_notify = $3, auto_alarm = $4, \
             alarm_threshold_hours = $5, email = $6, updated_at = $7 \
             WHERE user_id = $1 RETURNING *",
        )
        .bind(&settings.user_id)
        .bind(settings.email_notify)
        .bind(settings.sms_notify)
        .bind(settings.auto_alarm)
        .bind(settings.alarm_threshold_hours)
        .bind(&settings.email)
        .bind(settings.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update settings", e))?
        .ok_or_else(|| AppError::not_found(format!("Settings for {} not found", settings.user_id)))
    }
}
