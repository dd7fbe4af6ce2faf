//! Persistent suppression record.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use lifeline_core::error::{AppError, ErrorKind};
use lifeline_core::result::AppResult;
use lifeline_entity::notification::SuppressionKey;

use crate::traits::SuppressionStore;

/// Suppression entries kept in `suppression_records` so restarts do not
/// re-arm windows that were already filled.
#[derive(Debug, Clone)]
pub struct SuppressionRepository {
    pool: PgPool,
}

impl SuppressionRepository {
    /// Create a new suppression repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SuppressionStore for SuppressionRepository {
    async fn last_sent(&self, key: &SuppressionKey) -> AppResult<Option<DateTime<Utc>>> {
        sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT last_sent_at FROM suppression_records \
             WHERE user_id = $1 AND channel = $2 AND window_key = $3",
        )
        .bind(&key.user_id)
        .bind(key.channel.as_str())
        .bind(&key.window)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read suppression record", e)
        })
    }

    async fn record_sent(&self, key: &SuppressionKey, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO suppression_records (user_id, channel, window_key, last_sent_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, channel, window_key) \
             DO UPDATE SET last_sent_at = EXCLUDED.last_sent_at",
        )
        .bind(&key.user_id)
        .bind(key.channel.as_str())
        .bind(&key.window)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to write suppression record", e)
        })?;
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM suppression_records WHERE last_sent_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge suppression records", e)
            })?;
        Ok(result.rows_affected())
    }
}
