//! Check-in event model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lifeline_core::types::{CheckInId, UserId};

/// An immutable wellbeing confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CheckIn {
    /// Unique check-in identifier.
    pub id: CheckInId,
    /// The user who checked in.
    pub user_id: UserId,
    /// Instant of the check-in.
    pub checkin_time: DateTime<Utc>,
    /// Local calendar date of `checkin_time`; one row per user per date.
    pub checkin_date: NaiveDate,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
}

/// Data required to record a check-in.
#[derive(Debug, Clone)]
pub struct NewCheckIn {
    /// The user checking in.
    pub user_id: UserId,
    /// Instant of the check-in.
    pub checkin_time: DateTime<Utc>,
    /// Local calendar date of the check-in.
    pub checkin_date: NaiveDate,
}

impl NewCheckIn {
    /// Materialize the row that will be stored.
    pub fn into_check_in(self) -> CheckIn {
        CheckIn {
            id: CheckInId::new(),
            user_id: self.user_id,
            checkin_time: self.checkin_time,
            checkin_date: self.checkin_date,
            created_at: self.checkin_time,
        }
    }
}
