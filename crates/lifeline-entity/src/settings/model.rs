//! User settings entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lifeline_core::types::{SettingsId, UserId};

/// Default value of the informational alarm threshold.
pub const DEFAULT_ALARM_THRESHOLD_HOURS: i32 = 12;

/// Notification preferences, one row per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSettings {
    /// Row identifier.
    pub id: SettingsId,
    /// Owning user.
    pub user_id: UserId,
    /// Send reminder emails to the user.
    pub email_notify: bool,
    /// Stored for the client; the engine gates SMS on `auto_alarm`.
    pub sms_notify: bool,
    /// Text emergency contacts after a long lapse.
    pub auto_alarm: bool,
    /// Stored for the client; not used by the engine.
    pub alarm_threshold_hours: i32,
    /// Reminder destination.
    pub email: Option<String>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl UserSettings {
    /// Settings for a user seen for the first time.
    pub fn defaults_for(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: SettingsId::new(),
            user_id,
            email_notify: true,
            sms_notify: true,
            auto_alarm: false,
            alarm_threshold_hours: DEFAULT_ALARM_THRESHOLD_HOURS,
            email: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The reminder address, if one is set and non-blank.
    pub fn reminder_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = UserSettings::defaults_for(UserId::from_ip("10.0.0.1"), Utc::now());
        assert!(s.email_notify);
        assert!(s.sms_notify);
        assert!(!s.auto_alarm);
        assert_eq!(s.alarm_threshold_hours, 12);
        assert!(s.reminder_email().is_none());
    }

    #[test]
    fn test_blank_email_is_not_a_target() {
        let mut s = UserSettings::defaults_for(UserId::from_ip("10.0.0.1"), Utc::now());
        s.email = Some("   ".to_string());
        assert!(s.reminder_email().is_none());
        s.email = Some("a@b.c".to_string());
        assert_eq!(s.reminder_email(), Some("a@b.c"));
    }
}
