//! SMS provider that only logs.

use async_trait::async_trait;
use tracing::{info, warn};

use lifeline_core::config::SmsConfig;
use lifeline_core::error::AppError;
use lifeline_core::result::AppResult;

use super::message;
use crate::sender::SmsSender;

/// Logs each text. Reports success only when `simulate_success` is set.
#[derive(Debug, Clone)]
pub struct LogSmsSender {
    simulate_success: bool,
}

impl LogSmsSender {
    /// Create a sender from configuration.
    pub fn new(config: &SmsConfig) -> Self {
        Self {
            simulate_success: config.simulate_success,
        }
    }
}

#[async_trait]
impl SmsSender for LogSmsSender {
    async fn send_emergency(&self, phone: &str, user_name: &str, days_missed: i64) -> AppResult<()> {
        let body = message::emergency(user_name, days_missed);
        info!(to = %phone, body = %body, "[simulated sms]");
        if self.simulate_success {
            Ok(())
        } else {
            warn!("No SMS provider configured; message not delivered");
            Err(AppError::external_service("No SMS provider configured"))
        }
    }
}
