//! Emergency contact entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lifeline_core::types::{ContactId, UserId};

use super::contact_type::ContactType;

/// A person to text when the user stops checking in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EmergencyContact {
    /// Unique contact identifier.
    pub id: ContactId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Phone number as entered.
    pub phone: String,
    /// Phone line kind.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub contact_type: ContactType,
    /// When the contact was added.
    pub created_at: DateTime<Utc>,
    /// When the contact was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to add a contact.
#[derive(Debug, Clone)]
pub struct NewContact {
    /// Display name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Phone line kind.
    pub contact_type: ContactType,
}

impl NewContact {
    /// Materialize the row that will be stored for `user_id`.
    pub fn into_contact(self, user_id: UserId, now: DateTime<Utc>) -> EmergencyContact {
        EmergencyContact {
            id: ContactId::new(),
            user_id,
            name: self.name,
            phone: self.phone,
            contact_type: self.contact_type,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a contact.
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    /// New name.
    pub name: Option<String>,
    /// New phone.
    pub phone: Option<String>,
    /// New type.
    pub contact_type: Option<ContactType>,
}

impl ContactPatch {
    /// Merge into `contact`. Returns whether anything was supplied.
    pub fn apply(&self, contact: &mut EmergencyContact, now: DateTime<Utc>) -> bool {
        let mut changed = false;
        if let Some(name) = &self.name {
            contact.name = name.clone();
            changed = true;
        }
        if let Some(phone) = &self.phone {
            contact.phone = phone.clone();
            changed = true;
        }
        if let Some(kind) = self.contact_type {
            contact.contact_type = kind;
            changed = true;
        }
        if changed {
            contact.updated_at = now;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_applies_supplied_fields() {
        let now = Utc::now();
        let mut contact = NewContact {
            name: "Mum".to_string(),
            phone: "555 123 4567".to_string(),
            contact_type: ContactType::Mobile,
        }
        .into_contact(UserId::from_ip("10.0.0.1"), now);

        let patch = ContactPatch {
            contact_type: Some(ContactType::Home),
            ..Default::default()
        };
        assert!(patch.apply(&mut contact, now));
        assert_eq!(contact.contact_type, ContactType::Home);
        assert_eq!(contact.name, "Mum");

        assert!(!ContactPatch::default().apply(&mut contact, now));
    }

    #[test]
    fn test_serializes_type_field() {
        let contact = NewContact {
            name: "Dad".to_string(),
            phone: "5551234567".to_string(),
            contact_type: ContactType::Home,
        }
        .into_contact(UserId::from_ip("10.0.0.1"), Utc::now());
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["type"], "home");
    }
}
