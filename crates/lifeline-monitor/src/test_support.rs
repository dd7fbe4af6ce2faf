//! Sender and store doubles for engine tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use lifeline_core::error::AppError;
use lifeline_core::result::AppResult;
use lifeline_core::types::UserId;
use lifeline_database::MemoryStore;
use lifeline_database::traits::SettingsStore;
use lifeline_entity::settings::UserSettings;
use lifeline_notify::{EmailSender, SmsSender};

/// Records reminder emails; can be switched to fail.
#[derive(Debug, Default)]
pub struct RecordingEmailSender {
    pub sent: Mutex<Vec<(String, i64)>>,
    pub failing: AtomicBool,
}

impl RecordingEmailSender {
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_reminder(&self, email: &str, days_missed: i64) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::external_service("mail down"));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((email.to_string(), days_missed));
        Ok(())
    }

    async fn send_emergency_alert(&self, _: &str, _: &str, _: i64) -> AppResult<()> {
        Ok(())
    }
}

/// Records texts; numbers in `failing_numbers` error out.
#[derive(Debug, Default)]
pub struct RecordingSmsSender {
    pub sent: Mutex<Vec<(String, i64)>>,
    pub failing_numbers: Mutex<HashSet<String>>,
}

impl RecordingSmsSender {
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn numbers(&self) -> Vec<String> {
        let mut numbers: Vec<String> = self
            .sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(n, _)| n.clone())
            .collect();
        numbers.sort();
        numbers
    }
}

#[async_trait]
impl SmsSender for RecordingSmsSender {
    async fn send_emergency(&self, phone: &str, _user_name: &str, days_missed: i64) -> AppResult<()> {
        if self
            .failing_numbers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(phone)
        {
            return Err(AppError::external_service("carrier rejected"));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((phone.to_string(), days_missed));
        Ok(())
    }
}

/// An SMS provider that never answers.
#[derive(Debug, Default)]
pub struct HangingSmsSender;

#[async_trait]
impl SmsSender for HangingSmsSender {
    async fn send_emergency(&self, _: &str, _: &str, _: i64) -> AppResult<()> {
        std::future::pending::<()>().await;
        Ok(())
    }
}

/// Settings store that fails for one user and delegates otherwise.
#[derive(Debug)]
pub struct FlakySettingsStore {
    pub inner: MemoryStore,
    pub broken_user: UserId,
}

#[async_trait]
impl SettingsStore for FlakySettingsStore {
    async fn find_by_user(&self, user_id: &UserId) -> AppResult<Option<UserSettings>> {
        if *user_id == self.broken_user {
            return Err(AppError::database("connection reset"));
        }
        self.inner.find_by_user(user_id).await
    }

    async fn get_or_create(&self, user_id: &UserId, now: DateTime<Utc>) -> AppResult<UserSettings> {
        SettingsStore::get_or_create(&self.inner, user_id, now).await
    }

    async fn save(&self, settings: &UserSettings) -> AppResult<UserSettings> {
        SettingsStore::save(&self.inner, settings).await
    }
}
