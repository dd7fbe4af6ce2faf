//! Email and SMS provider configuration.

use serde::{Deserialize, Serialize};

/// Email delivery backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Write the message to the log instead of sending it.
    #[default]
    Log,
    /// POST the message as JSON to an HTTP mail API.
    Http,
}

/// Email sender configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Backend selection.
    #[serde(default)]
    pub provider: EmailProvider,
    /// Mail API endpoint (http provider).
    #[serde(default)]
    pub endpoint: String,
    /// Bearer token for the mail API.
    #[serde(default)]
    pub api_key: String,
    /// Sender address.
    #[serde(default = "default_from")]
    pub from: String,
    /// Link target for the "check in now" button.
    #[serde(default = "default_app_url")]
    pub app_url: String,
    /// Whether the log provider reports success.
    #[serde(default = "default_simulate_success")]
    pub simulate_success: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::default(),
            endpoint: String::new(),
            api_key: String::new(),
            from: default_from(),
            app_url: default_app_url(),
            simulate_success: default_simulate_success(),
        }
    }
}

/// SMS delivery backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Write the message to the log instead of sending it.
    #[default]
    Log,
    /// Twilio Messages API.
    Twilio,
}

/// SMS sender configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    /// Backend selection.
    #[serde(default)]
    pub provider: SmsProvider,
    /// Twilio account SID.
    #[serde(default)]
    pub account_sid: String,
    /// Twilio auth token.
    #[serde(default)]
    pub auth_token: String,
    /// Sending phone number.
    #[serde(default)]
    pub from_number: String,
    /// API base URL.
    #[serde(default = "default_twilio_base_url")]
    pub base_url: String,
    /// Whether the log provider reports success.
    #[serde(default = "default_simulate_success")]
    pub simulate_success: bool,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::default(),
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            base_url: default_twilio_base_url(),
            simulate_success: default_simulate_success(),
        }
    }
}

fn default_from() -> String {
    "Lifeline <noreply@lifeline.local>".to_string()
}

fn default_app_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_twilio_base_url() -> String {
    "https://api.twilio.com".to_string()
}

fn default_simulate_success() -> bool {
    true
}
