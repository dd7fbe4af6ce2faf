//! User identification.

use std::sync::Arc;

use tracing::info;

use lifeline_core::result::AppResult;
use lifeline_core::types::{Clock, UserId};
use lifeline_database::traits::{SettingsStore, UserStore};
use lifeline_entity::user::User;

/// Resolves users on first sight and gives them default settings.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    settings: Arc<dyn SettingsStore>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        settings: Arc<dyn SettingsStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            settings,
            clock,
        }
    }

    /// Return the user, creating it and its default settings if unknown.
    pub async fn identify(&self, user_id: &UserId) -> AppResult<User> {
        let now = self.clock.now();
        let (user, created) = self.users.get_or_create(user_id, now).await?;
        if created {
            self.settings.get_or_create(user_id, now).await?;
            info!(user_id = %user_id, "New user registered");
        }
        Ok(user)
    }
}
