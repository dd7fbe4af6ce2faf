//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use lifeline_core::error::AppError;
use lifeline_entity::contact::{ContactPatch, ContactType, NewContact};
use lifeline_entity::settings::SettingsPatch;

use crate::error::ApiError;

/// Validate a request body, mapping failures to a 400.
pub fn validated<T: Validate>(req: T) -> Result<T, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))?;
    Ok(req)
}

/// Query string for `GET /api/checkin/history`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of entries (1..=365, default 30).
    pub limit: Option<i64>,
}

/// Body of `PUT /api/settings`. Absent fields are left unchanged; an empty
/// `email` clears the address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    /// Email reminders on/off.
    pub email_notify: Option<bool>,
    /// SMS notifications on/off.
    pub sms_notify: Option<bool>,
    /// Automatic escalation to contacts on/off.
    pub auto_alarm: Option<bool>,
    /// Alarm threshold in hours.
    #[validate(range(min = 1, message = "alarm_threshold_hours must be positive"))]
    pub alarm_threshold_hours: Option<i32>,
    /// Reminder address.
    #[validate(length(max = 320))]
    pub email: Option<String>,
}

impl From<UpdateSettingsRequest> for SettingsPatch {
    fn from(req: UpdateSettingsRequest) -> Self {
        Self {
            email_notify: req.email_notify,
            sms_notify: req.sms_notify,
            auto_alarm: req.auto_alarm,
            alarm_threshold_hours: req.alarm_threshold_hours,
            email: req.email,
        }
    }
}

/// Body of `POST /api/contacts`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateContactRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    /// Phone number.
    #[validate(length(min = 1, max = 32, message = "phone is required"))]
    pub phone: String,
    /// `mobile` or `home`.
    #[serde(rename = "type")]
    pub contact_type: String,
}

impl CreateContactRequest {
    /// Convert into the service input, checking the contact type.
    pub fn into_new_contact(self) -> Result<NewContact, ApiError> {
        Ok(NewContact {
            contact_type: self.contact_type.parse::<ContactType>()?,
            name: self.name,
            phone: self.phone,
        })
    }
}

/// Body of `PUT /api/contacts/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateContactRequest {
    /// New name.
    #[validate(length(max = 100))]
    pub name: Option<String>,
    /// New phone.
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    /// New type.
    #[serde(rename = "type")]
    pub contact_type: Option<String>,
}

impl UpdateContactRequest {
    /// Convert into a contact patch, checking the contact type.
    pub fn into_patch(self) -> Result<ContactPatch, ApiError> {
        let contact_type = self
            .contact_type
            .as_deref()
            .map(str::parse::<ContactType>)
            .transpose()?;
        Ok(ContactPatch {
            name: self.name,
            phone: self.phone,
            contact_type,
        })
    }
}
