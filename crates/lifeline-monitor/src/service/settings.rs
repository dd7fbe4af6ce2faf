//! Settings retrieval and updates.

use std::sync::Arc;

use tracing::info;

use lifeline_core::error::AppError;
use lifeline_core::result::AppResult;
use lifeline_core::types::{Clock, UserId};
use lifeline_database::traits::SettingsStore;
use lifeline_entity::settings::{SettingsPatch, UserSettings};

/// Reads and updates per-user settings, creating defaults on first access.
#[derive(Debug, Clone)]
pub struct SettingsService {
    settings: Arc<dyn SettingsStore>,
    clock: Arc<dyn Clock>,
}

impl SettingsService {
    /// Creates a new settings service.
    pub fn new(settings: Arc<dyn SettingsStore>, clock: Arc<dyn Clock>) -> Self {
        Self { settings, clock }
    }

    /// The user's settings.
    pub async fn get(&self, user_id: &UserId) -> AppResult<UserSettings> {
        self.settings.get_or_create(user_id, self.clock.now()).await
    }

    /// Apply a partial update.
    pub async fn update(&self, user_id: &UserId, patch: SettingsPatch) -> AppResult<UserSettings> {
        if let Some(hours) = patch.alarm_threshold_hours {
            if hours <= 0 {
                return Err(AppError::validation(
                    "alarm_threshold_hours must be greater than zero",
                ));
            }
        }

        let now = self.clock.now();
        let mut current = self.settings.get_or_create(user_id, now).await?;
        if !patch.apply(&mut current, now) {
            return Ok(current);
        }

        let saved = self.settings.save(&current).await?;
        info!(
            user_id = %user_id,
            email_notify = saved.email_notify,
            auto_alarm = saved.auto_alarm,
            "Settings updated"
        );
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeline_core::error::ErrorKind;
    use lifeline_core::types::SystemClock;
    use lifeline_database::MemoryStore;

    fn service() -> SettingsService {
        SettingsService::new(Arc::new(MemoryStore::new()), Arc::new(SystemClock))
    }

    #[tokio::test]
    async fn test_get_creates_defaults() {
        let svc = service();
        let user = UserId::parse("device-1").unwrap();
        let settings = svc.get(&user).await.unwrap();
        assert!(settings.email_notify);
        assert!(!settings.auto_alarm);
        assert_eq!(svc.get(&user).await.unwrap().id, settings.id);
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let svc = service();
        let user = UserId::parse("device-1").unwrap();
        let updated = svc
            .update(
                &user,
                SettingsPatch {
                    auto_alarm: Some(true),
                    email: Some("me@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.auto_alarm);
        assert!(updated.sms_notify);
        assert_eq!(updated.email.as_deref(), Some("me@example.com"));

        let cleared = svc
            .update(
                &user,
                SettingsPatch {
                    email: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(cleared.email.is_none());
        assert!(cleared.auto_alarm);
    }

    #[tokio::test]
    async fn test_rejects_non_positive_threshold() {
        let svc = service();
        let user = UserId::parse("device-1").unwrap();
        let err = svc
            .update(
                &user,
                SettingsPatch {
                    alarm_threshold_hours: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
