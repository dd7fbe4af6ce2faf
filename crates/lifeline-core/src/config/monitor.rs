//! Escalation engine and contact policy configuration.

use serde::{Deserialize, Serialize};

/// Where the engine keeps its record of already-sent notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SuppressionBackend {
    /// Process-local map; a restart re-arms every window.
    #[default]
    Memory,
    /// The `suppression_records` table.
    Database,
}

/// Escalation engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Missed days before the user gets an email reminder.
    #[serde(default = "default_email_after_days")]
    pub email_after_days: i64,
    /// Missed days before emergency contacts get an SMS.
    #[serde(default = "default_sms_after_days")]
    pub sms_after_days: i64,
    /// Suppression entries older than this are garbage collected.
    #[serde(default = "default_suppression_retention_days")]
    pub suppression_retention_days: i64,
    /// Upper bound on a single outbound send.
    #[serde(default = "default_send_timeout_seconds")]
    pub send_timeout_seconds: u64,
    /// Users evaluated in parallel during a batch.
    #[serde(default = "default_user_concurrency")]
    pub user_concurrency: usize,
    /// Contacts messaged in parallel for one user.
    #[serde(default = "default_contact_concurrency")]
    pub contact_concurrency: usize,
    /// Suppression store selection.
    #[serde(default)]
    pub suppression_backend: SuppressionBackend,
    /// IANA zone for calendar dates, e.g. `"Asia/Shanghai"`.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Fixed offset used when no `timezone` is set. The host zone is used
    /// when both are unset.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
    /// Name used in SMS text.
    #[serde(default = "default_alert_user_name")]
    pub alert_user_name: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            email_after_days: default_email_after_days(),
            sms_after_days: default_sms_after_days(),
            suppression_retention_days: default_suppression_retention_days(),
            send_timeout_seconds: default_send_timeout_seconds(),
            user_concurrency: default_user_concurrency(),
            contact_concurrency: default_contact_concurrency(),
            suppression_backend: SuppressionBackend::default(),
            timezone: None,
            utc_offset_minutes: None,
            alert_user_name: default_alert_user_name(),
        }
    }
}

/// Emergency contact policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactsConfig {
    /// Maximum contacts a single user may register.
    #[serde(default = "default_max_per_user")]
    pub max_per_user: i64,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            max_per_user: default_max_per_user(),
        }
    }
}

fn default_email_after_days() -> i64 {
    1
}

fn default_sms_after_days() -> i64 {
    3
}

fn default_suppression_retention_days() -> i64 {
    7
}

fn default_send_timeout_seconds() -> u64 {
    15
}

fn default_user_concurrency() -> usize {
    16
}

fn default_contact_concurrency() -> usize {
    5
}

fn default_alert_user_name() -> String {
    "User".to_string()
}

fn default_max_per_user() -> i64 {
    5
}
