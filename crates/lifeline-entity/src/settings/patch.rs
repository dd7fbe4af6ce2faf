//! Partial update of user settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::UserSettings;

/// One optional slot per mutable settings field.
///
/// `email: Some("")` clears the address; `email: None` leaves it unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPatch {
    /// New `email_notify`.
    #[serde(default)]
    pub email_notify: Option<bool>,
    /// New `sms_notify`.
    #[serde(default)]
    pub sms_notify: Option<bool>,
    /// New `auto_alarm`.
    #[serde(default)]
    pub auto_alarm: Option<bool>,
    /// New `alarm_threshold_hours`.
    #[serde(default)]
    pub alarm_threshold_hours: Option<i32>,
    /// New email address.
    #[serde(default)]
    pub email: Option<String>,
}

impl SettingsPatch {
    /// Whether the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self.email_notify.is_none()
            && self.sms_notify.is_none()
            && self.auto_alarm.is_none()
            && self.alarm_threshold_hours.is_none()
            && self.email.is_none()
    }

    /// Merge into `settings`, touching `updated_at` only when something was
    /// supplied. Returns whether the row changed.
    pub fn apply(&self, settings: &mut UserSettings, now: DateTime<Utc>) -> bool {
        if self.is_empty() {
            return false;
        }
        if let Some(v) = self.email_notify {
            settings.email_notify = v;
        }
        if let Some(v) = self.sms_notify {
            settings.sms_notify = v;
        }
        if let Some(v) = self.auto_alarm {
            settings.auto_alarm = v;
        }
        if let Some(v) = self.alarm_threshold_hours {
            settings.alarm_threshold_hours = v;
        }
        if let Some(email) = &self.email {
            let trimmed = email.trim();
            settings.email = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
        settings.updated_at = now;
        true
    }
}
