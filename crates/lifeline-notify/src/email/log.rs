//! Email provider that only logs.

use async_trait::async_trait;
use tracing::{info, warn};

use lifeline_core::config::EmailConfig;
use lifeline_core::error::AppError;
use lifeline_core::result::AppResult;

use super::template::{self, RenderedEmail};
use crate::sender::EmailSender;

/// Logs each message. Reports success only when `simulate_success` is set.
#[derive(Debug, Clone)]
pub struct LogEmailSender {
    app_url: String,
    simulate_success: bool,
}

impl LogEmailSender {
    /// Create a sender from configuration.
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            app_url: config.app_url.clone(),
            simulate_success: config.simulate_success,
        }
    }

    fn emit(&self, to: &str, email: &RenderedEmail) -> AppResult<()> {
        info!(to = %to, subject = %email.subject, "[simulated email]");
        if self.simulate_success {
            Ok(())
        } else {
            warn!("No email provider configured; message not delivered");
            Err(AppError::external_service("No email provider configured"))
        }
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_reminder(&self, email: &str, days_missed: i64) -> AppResult<()> {
        self.emit(email, &template::reminder(days_missed, &self.app_url))
    }

    async fn send_emergency_alert(
        &self,
        email: &str,
        user_name: &str,
        days_missed: i64,
    ) -> AppResult<()> {
        self.emit(email, &template::emergency_alert(user_name, days_missed))
    }
}
