//! Emergency contact repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use lifeline_core::error::{AppError, ErrorKind};
use lifeline_core::result::AppResult;
use lifeline_core::types::{ContactId, UserId};
use lifeline_entity::contact::EmergencyContact;

use crate::traits::ContactStore;

/// Repository for emergency contacts.
#[derive(Debug, Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    /// Create a new contact repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for ContactRepository {
    async fn list_by_user(&self, user_id: &UserId) -> AppResult<Vec<EmergencyContact>> {
        sqlx::query_as::<_, EmergencyContact>(
            "SELECT * FROM emergency_contacts WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list contacts", e))
    }

    async fn find_by_id(
        &self,
        id: &ContactId,
        user_id: &UserId,
    ) -> AppResult<Option<EmergencyContact>> {
        sqlx::query_as::<_, EmergencyContact>(
            "SELECT * FROM emergency_contacts WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find contact", e))
    }

    async fn count_by_user(&self, user_id: &UserId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM emergency_contacts WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count contacts", e))
    }

    async fn insert_capped(
        &self,
        contact: EmergencyContact,
        max: i64,
    ) -> AppResult<Option<EmergencyContact>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // Serializes concurrent inserts for the same owner.
        sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(&contact.user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock user row", e))?;

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM emergency_contacts WHERE user_id = $1")
                .bind(&contact.user_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count contacts", e)
                })?;

        if count >= max {
            return Ok(None);
        }

        let created = sqlx::query_as::<_, EmergencyContact>(
            "INSERT INTO emergency_contacts (id, user_id, name, phone, type, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(contact.id)
        .bind(&contact.user_id)
        .bind(&contact.name)
        .bind(&contact.phone)
        .bind(contact.contact_type)
        .bind(contact.created_at)
        .bind(contact.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create contact", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit contact", e)
        })?;

        Ok(Some(created))
    }

    async fn save(&self, contact: &EmergencyContact) -> AppResult<Option<EmergencyContact>> {
        sqlx::query_as::<_, EmergencyContact>(
            "UPDATE emergency_contacts SET name = $3, phone = $4, type = $5, updated_at = $6 \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(contact.id)
        .bind(&contact.user_id)
        .bind(&contact.name)
        .bind(&contact.phone)
        .bind(contact.contact_type)
        .bind(contact.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update contact", e))
    }

    async fn delete(&self, id: &ContactId, user_id: &UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM emergency_contacts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete contact", e))?;
        Ok(result.rows_affected() > 0)
    }
}
