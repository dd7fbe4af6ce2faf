//! Check-in repository implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use lifeline_core::error::{AppError, ErrorKind};
use lifeline_core::result::AppResult;
use lifeline_core::types::UserId;
use lifeline_entity::checkin::{CheckIn, NewCheckIn};

use crate::traits::CheckInStore;

/// Repository for the check-in log.
#[derive(Debug, Clone)]
pub struct CheckInRepository {
    pool: PgPool,
}

impl CheckInRepository {
    /// Create a new check-in repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckInStore for CheckInRepository {
    async fn insert_if_absent(&self, check_in: NewCheckIn) -> AppResult<Option<CheckIn>> {
        let row = check_in.into_check_in();
        sqlx::query_as::<_, CheckIn>(
            "INSERT INTO checkins (id, user_id, checkin_time, checkin_date, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id, checkin_date) DO NOTHING RETURNING *",
        )
        .bind(row.id)
        .bind(&row.user_id)
        .bind(row.checkin_time)
        .bind(row.checkin_date)
        .bind(row.created_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record check-in", e))
    }

    async fn find_last(&self, user_id: &UserId) -> AppResult<Option<CheckIn>> {
        sqlx::query_as::<_, CheckIn>(
            "SELECT * FROM checkins WHERE user_id = $1 ORDER BY checkin_time DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find last check-in", e)
        })
    }

    async fn list_by_user(&self, user_id: &UserId, limit: Option<i64>) -> AppResult<Vec<CheckIn>> {
        // LIMIT NULL means no limit in PostgreSQL.
        sqlx::query_as::<_, CheckIn>(
            "SELECT * FROM checkins WHERE user_id = $1 ORDER BY checkin_time DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list check-ins", e))
    }

    async fn exists_on(&self, user_id: &UserId, date: NaiveDate) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM checkins WHERE user_id = $1 AND checkin_date = $2)",
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check today's check-in", e)
        })
    }
}
