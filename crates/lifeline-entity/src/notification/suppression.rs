//! Keys and entries of the sent-notification record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use lifeline_core::types::UserId;

use super::channel::NotificationChannel;

/// Identifies one eligibility window: at most one successful send per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SuppressionKey {
    /// The user the notification is about.
    pub user_id: UserId,
    /// Delivery channel.
    pub channel: NotificationChannel,
    /// Window identifier within the channel.
    pub window: String,
}

impl SuppressionKey {
    /// Email reminders: one window per local calendar date.
    pub fn email(user_id: UserId, date: NaiveDate) -> Self {
        Self {
            user_id,
            channel: NotificationChannel::Email,
            window: date.format("%Y-%m-%d").to_string(),
        }
    }

    /// SMS escalations: one window per missed-day count.
    pub fn sms(user_id: UserId, days_missed: i64) -> Self {
        Self {
            user_id,
            channel: NotificationChannel::Sms,
            window: format!("days-{days_missed}"),
        }
    }
}

/// A recorded successful send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionEntry {
    /// The window that was filled.
    pub key: SuppressionKey,
    /// When the send succeeded.
    pub last_sent_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_identifiers() {
        let user = UserId::from_ip("10.0.0.1");
        let date = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        assert_eq!(SuppressionKey::email(user.clone(), date).window, "2024-03-06");
        let sms = SuppressionKey::sms(user, 4);
        assert_eq!(sms.window, "days-4");
        assert_eq!(sms.channel, NotificationChannel::Sms);
    }
}
