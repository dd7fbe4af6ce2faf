//! Twilio Messages API provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use lifeline_core::config::SmsConfig;
use lifeline_core::error::{AppError, ErrorKind};
use lifeline_core::result::AppResult;

use super::message;
use crate::sender::SmsSender;

/// Sends texts through Twilio.
#[derive(Debug, Clone)]
pub struct TwilioSmsSender {
    client: Client,
    messages_url: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl TwilioSmsSender {
    /// Create a sender from configuration.
    pub fn new(config: &SmsConfig) -> AppResult<Self> {
        if config.account_sid.is_empty()
            || config.auth_token.is_empty()
            || config.from_number.is_empty()
        {
            return Err(AppError::configuration(
                "sms.account_sid, sms.auth_token and sms.from_number are required for twilio",
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self {
            client,
            messages_url: format!(
                "{}/2010-04-01/Accounts/{}/Messages.json",
                config.base_url.trim_end_matches('/'),
                config.account_sid
            ),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
        })
    }
}

#[async_trait]
impl SmsSender for TwilioSmsSender {
    async fn send_emergency(&self, phone: &str, user_name: &str, days_missed: i64) -> AppResult<()> {
        let body = message::emergency(user_name, days_missed);
        let params = [
            ("To", phone),
            ("From", self.from_number.as_str()),
            ("Body", body.as_str()),
        ];

        let resp = self
            .client
            .post(&self.messages_url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Twilio request failed", e)
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(AppError::external_service(format!(
                "Twilio error: HTTP {status}"
            )));
        }

        info!(to = %phone, "SMS sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_messages_url() {
        let config = SmsConfig {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            from_number: "+15550000000".to_string(),
            base_url: "https://api.twilio.com/".to_string(),
            ..Default::default()
        };
        let sender = TwilioSmsSender::new(&config).unwrap();
        assert_eq!(
            sender.messages_url,
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn test_requires_credentials() {
        assert!(TwilioSmsSender::new(&SmsConfig::default()).is_err());
    }
}
