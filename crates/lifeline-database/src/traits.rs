//! Store traits.
//!
//! Each trait is the query surface one part of the system needs. The
//! escalation engine only reads users, settings, check-ins and contacts; it
//! reads and writes the suppression store.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use lifeline_core::result::AppResult;
use lifeline_core::types::{ContactId, UserId};
use lifeline_entity::checkin::{CheckIn, NewCheckIn};
use lifeline_entity::contact::EmergencyContact;
use lifeline_entity::notification::SuppressionKey;
use lifeline_entity::settings::UserSettings;
use lifeline_entity::user::User;

/// User lookup and lazy creation.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by id.
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>>;

    /// Return the user, creating it at `now` if absent. The flag is `true`
    /// when this call created the row.
    async fn get_or_create(&self, id: &UserId, now: DateTime<Utc>) -> AppResult<(User, bool)>;

    /// Every known user.
    async fn list_all(&self) -> AppResult<Vec<User>>;
}

/// Append-only check-in log.
#[async_trait]
pub trait CheckInStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert unless the user already has a check-in on the same date.
    /// Returns `None` when a row for that date exists.
    async fn insert_if_absent(&self, check_in: NewCheckIn) -> AppResult<Option<CheckIn>>;

    /// Most recent check-in.
    async fn find_last(&self, user_id: &UserId) -> AppResult<Option<CheckIn>>;

    /// Check-ins newest first, optionally limited.
    async fn list_by_user(&self, user_id: &UserId, limit: Option<i64>) -> AppResult<Vec<CheckIn>>;

    /// Whether a check-in exists for `date`.
    async fn exists_on(&self, user_id: &UserId, date: NaiveDate) -> AppResult<bool>;
}

/// One settings row per user.
#[async_trait]
pub trait SettingsStore: Send + Sync + std::fmt::Debug + 'static {
    /// Settings, if they were ever created.
    async fn find_by_user(&self, user_id: &UserId) -> AppResult<Option<UserSettings>>;

    /// Settings, created with defaults at `now` if absent.
    async fn get_or_create(&self, user_id: &UserId, now: DateTime<Utc>) -> AppResult<UserSettings>;

    /// Persist the full row.
    async fn save(&self, settings: &UserSettings) -> AppResult<UserSettings>;
}

/// Emergency contacts, scoped to their owner.
#[async_trait]
pub trait ContactStore: Send + Sync + std::fmt::Debug + 'static {
    /// Contacts newest first.
    async fn list_by_user(&self, user_id: &UserId) -> AppResult<Vec<EmergencyContact>>;

    /// A contact owned by `user_id`.
    async fn find_by_id(
        &self,
        id: &ContactId,
        user_id: &UserId,
    ) -> AppResult<Option<EmergencyContact>>;

    /// Number of contacts the user has.
    async fn count_by_user(&self, user_id: &UserId) -> AppResult<i64>;

    /// Insert only while the owner has fewer than `max` contacts. The check
    /// and the insert are atomic; `None` means the cap was reached.
    async fn insert_capped(
        &self,
        contact: EmergencyContact,
        max: i64,
    ) -> AppResult<Option<EmergencyContact>>;

    /// Persist an updated contact. `None` if it no longer exists.
    async fn save(&self, contact: &EmergencyContact) -> AppResult<Option<EmergencyContact>>;

    /// Delete a contact owned by `user_id`. Returns whether a row was removed.
    async fn delete(&self, id: &ContactId, user_id: &UserId) -> AppResult<bool>;
}

/// Record of successful sends, one timestamp per eligibility window.
///
/// Writes are last-write-wins per key.
#[async_trait]
pub trait SuppressionStore: Send + Sync + std::fmt::Debug + 'static {
    /// When the window was last filled.
    async fn last_sent(&self, key: &SuppressionKey) -> AppResult<Option<DateTime<Utc>>>;

    /// Mark the window as filled at `at`.
    async fn record_sent(&self, key: &SuppressionKey, at: DateTime<Utc>) -> AppResult<()>;

    /// Drop every entry recorded before `cutoff`. Returns how many were dropped.
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}
