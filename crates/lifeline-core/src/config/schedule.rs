//! Evaluation schedule configuration.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// When the scheduler drives a full evaluation batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Whether the scheduler runs at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Six-field cron expression for the periodic run (UTC).
    #[serde(default = "default_hourly_cron")]
    pub hourly_cron: String,
    /// Local `HH:MM` times for the fixed daily runs.
    #[serde(default = "default_daily_times")]
    pub daily_times: Vec<String>,
    /// Delay before the one-off run after startup.
    #[serde(default = "default_startup_delay_seconds")]
    pub startup_delay_seconds: u64,
    /// Local `HH:MM` shown to users as the next expected check-in.
    #[serde(default = "default_next_expected_time")]
    pub next_expected_time: String,
}

impl ScheduleConfig {
    /// Parse `daily_times` into times of day.
    pub fn parsed_daily_times(&self) -> Result<Vec<NaiveTime>, AppError> {
        self.daily_times.iter().map(|t| parse_time(t)).collect()
    }

    /// Parse `next_expected_time`.
    pub fn parsed_next_expected_time(&self) -> Result<NaiveTime, AppError> {
        parse_time(&self.next_expected_time)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            hourly_cron: default_hourly_cron(),
            daily_times: default_daily_times(),
            startup_delay_seconds: default_startup_delay_seconds(),
            next_expected_time: default_next_expected_time(),
        }
    }
}

fn parse_time(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| AppError::configuration(format!("Invalid time of day '{value}': {e}")))
}

fn default_enabled() -> bool {
    true
}

fn default_hourly_cron() -> String {
    "0 0 * * * *".to_string()
}

fn default_daily_times() -> Vec<String> {
    vec!["09:00".to_string(), "20:00".to_string()]
}

fn default_startup_delay_seconds() -> u64 {
    5
}

fn default_next_expected_time() -> String {
    "20:00".to_string()
}
