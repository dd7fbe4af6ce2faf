//! Email delivery through a JSON mail API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use lifeline_core::config::EmailConfig;
use lifeline_core::error::{AppError, ErrorKind};
use lifeline_core::result::AppResult;

use super::template::{self, RenderedEmail};
use crate::sender::EmailSender;

#[derive(Debug, Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// POSTs `{ from, to, subject, html }` with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpEmailSender {
    client: Client,
    endpoint: String,
    api_key: String,
    from: String,
    app_url: String,
}

impl HttpEmailSender {
    /// Create a sender from configuration.
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        if config.endpoint.is_empty() {
            return Err(AppError::configuration(
                "email.endpoint is required for the http provider",
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
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
            app_url: config.app_url.clone(),
        })
    }

    async fn deliver(&self, to: &str, email: &RenderedEmail) -> AppResult<()> {
        let body = MailRequest {
            from: &self.from,
            to,
            subject: &email.subject,
            html: &email.html,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Mail API request failed", e)
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(AppError::external_service(format!(
                "Mail API error: HTTP {status}"
            )));
        }

        info!(to = %to, subject = %email.subject, "Email sent");
        Ok(())
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send_reminder(&self, email: &str, days_missed: i64) -> AppResult<()> {
        let rendered = template::reminder(days_missed, &self.app_url);
        self.deliver(email, &rendered).await
    }

    async fn send_emergency_alert(
        &self,
        email: &str,
        user_name: &str,
        days_missed: i64,
    ) -> AppResult<()> {
        let rendered = template::emergency_alert(user_name, days_missed);
        self.deliver(email, &rendered).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_endpoint() {
        let config = EmailConfig::default();
        let err = HttpEmailSender::new(&config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
