//! Email delivery.

pub mod http;
pub mod log;
pub mod template;

use std::sync::Arc;

use lifeline_core::config::{EmailConfig, EmailProvider};
use lifeline_core::result::AppResult;

use crate::sender::EmailSender;

pub use self::http::HttpEmailSender;
pub use self::log::LogEmailSender;

/// Build the configured email sender.
pub fn build_email_sender(config: &EmailConfig) -> AppResult<Arc<dyn EmailSender>> {
    match config.provider {
        EmailProvider::Log => Ok(Arc::new(LogEmailSender::new(config))),
        EmailProvider::Http => Ok(Arc::new(HttpEmailSender::new(config)?)),
    }
}
