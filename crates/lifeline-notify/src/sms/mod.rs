//! SMS delivery.

pub mod log;
pub mod message;
pub mod twilio;

use std::sync::Arc;

use lifeline_core::config::{SmsConfig, SmsProvider};
use lifeline_core::result::AppResult;

use crate::sender::SmsSender;

pub use self::log::LogSmsSender;
pub use self::twilio::TwilioSmsSender;

/// Build the configured SMS sender.
pub fn build_sms_sender(config: &SmsConfig) -> AppResult<Arc<dyn SmsSender>> {
    match config.provider {
        SmsProvider::Log => Ok(Arc::new(LogSmsSender::new(config))),
        SmsProvider::Twilio => Ok(Arc::new(TwilioSmsSender::new(config)?)),
    }
}
