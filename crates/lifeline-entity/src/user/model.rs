//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lifeline_core::types::UserId;

/// A person identified by device token or client address.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Opaque identity.
    pub id: UserId,
    /// Email address (optional).
    pub email: Option<String>,
    /// When the user was first seen.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A fresh user record stamped at `now`.
    pub fn new(id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email: None,
            created_at: now,
            updated_at: now,
        }
    }
}
