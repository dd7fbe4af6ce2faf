//! Sender traits.
//!
//! A send either succeeds or returns an `ExternalService` error. Callers
//! treat any error as an unsuccessful delivery.

use async_trait::async_trait;

use lifeline_core::result::AppResult;

use crate::phone;

/// Delivers email.
#[async_trait]
pub trait EmailSender: Send + Sync + std::fmt::Debug + 'static {
    /// Remind a user that they have missed `days_missed` check-ins.
    async fn send_reminder(&self, email: &str, days_missed: i64) -> AppResult<()>;

    /// Warn an emergency contact by email.
    async fn send_emergency_alert(
        &self,
        email: &str,
        user_name: &str,
        days_missed: i64,
    ) -> AppResult<()>;
}

/// Delivers text messages.
#[async_trait]
pub trait SmsSender: Send + Sync + std::fmt::Debug + 'static {
    /// Tell an emergency contact the user has gone quiet.
    async fn send_emergency(&self, phone: &str, user_name: &str, days_missed: i64) -> AppResult<()>;

    /// Whether `phone` can be dialled.
    fn is_valid_phone(&self, phone: &str) -> bool {
        phone::is_valid(phone)
    }

    /// Normalize `phone` for the provider.
    fn format_phone(&self, phone: &str) -> String {
        phone::format(phone)
    }
}
