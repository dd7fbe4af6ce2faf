//! Emergency contact management.

use std::sync::Arc;

use tracing::info;

use lifeline_core::error::AppError;
use lifeline_core::result::AppResult;
use lifeline_core::types::{Clock, ContactId, UserId};
use lifeline_database::traits::ContactStore;
use lifeline_entity::contact::{ContactPatch, EmergencyContact, NewContact};

/// Manages a user's emergency contacts under a per-user cap.
#[derive(Debug, Clone)]
pub struct ContactService {
    contacts: Arc<dyn ContactStore>,
    clock: Arc<dyn Clock>,
    max_per_user: i64,
}

impl ContactService {
    /// Creates a new contact service.
    pub fn new(contacts: Arc<dyn ContactStore>, clock: Arc<dyn Clock>, max_per_user: i64) -> Self {
        Self {
            contacts,
            clock,
            max_per_user,
        }
    }

    /// Contacts newest first.
    pub async fn list(&self, user_id: &UserId) -> AppResult<Vec<EmergencyContact>> {
        self.contacts.list_by_user(user_id).await
    }

    /// Whether another contact would fit under the cap.
    pub async fn can_add_more(&self, user_id: &UserId) -> AppResult<bool> {
        Ok(self.contacts.count_by_user(user_id).await? < self.max_per_user)
    }

    /// Add a contact.
    pub async fn create(&self, user_id: &UserId, new: NewContact) -> AppResult<EmergencyContact> {
        let new = NewContact {
            name: required("name", &new.name)?,
            phone: required("phone", &new.phone)?,
            contact_type: new.contact_type,
        };

        let contact = new.into_contact(user_id.clone(), self.clock.now());
        let created = self
            .contacts
            .insert_capped(contact, self.max_per_user)
            .await?
            .ok_or_else(|| {
                AppError::validation(format!(
                    "At most {} emergency contacts are allowed",
                    self.max_per_user
                ))
            })?;

        info!(user_id = %user_id, contact_id = %created.id, "Emergency contact added");
        Ok(created)
    }

    /// Update a contact owned by the user.
    pub async fn update(
        &self,
        user_id: &UserId,
        id: &ContactId,
        patch: ContactPatch,
    ) -> AppResult<EmergencyContact> {
        let patch = ContactPatch {
            name: patch.name.as_deref().map(|n| required("name", n)).transpose()?,
            phone: patch.phone.as_deref().map(|p| required("phone", p)).transpose()?,
            contact_type: patch.contact_type,
        };

        let mut contact = self
            .contacts
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Contact {id} not found")))?;

        if !patch.apply(&mut contact, self.clock.now()) {
            return Ok(contact);
        }

        self.contacts
            .save(&contact)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Contact {id} not found")))
    }

    /// Delete a contact owned by the user.
    pub async fn delete(&self, user_id: &UserId, id: &ContactId) -> AppResult<()> {
        if !self.contacts.delete(id, user_id).await? {
            return Err(AppError::not_found(format!("Contact {id} not found")));
        }
        info!(user_id = %user_id, contact_id = %id, "Emergency contact removed");
        Ok(())
    }
}

fn required(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeline_core::error::ErrorKind;
    use lifeline_core::types::SystemClock;
    use lifeline_database::MemoryStore;
    use lifeline_entity::contact::ContactType;

    fn service() -> ContactService {
        ContactService::new(Arc::new(MemoryStore::new()), Arc::new(SystemClock), 5)
    }

    fn new_contact(name: &str) -> NewContact {
        NewContact {
            name: name.to_string(),
            phone: "555-123-4567".to_string(),
            contact_type: ContactType::Mobile,
        }
    }

    #[tokio::test]
    async fn test_cap_of_five() {
        let svc = service();
        let user = UserId::parse("device-1").unwrap();
        for i in 0..5 {
            svc.create(&user, new_contact(&format!("c{i}"))).await.unwrap();
        }
        assert!(!svc.can_add_more(&user).await.unwrap());
        let err = svc.create(&user, new_contact("sixth")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(svc.list(&user).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_concurrent_creates_respect_cap() {
        let svc = service();
        let user = UserId::parse("device-1").unwrap();
        let mut handles = Vec::new();
        for i in 0..10 {
            let svc = svc.clone();
            let user = user.clone();
            handles.push(tokio::spawn(async move {
                svc.create(&user, new_contact(&format!("c{i}"))).await
            }));
        }
        let mut ok = 0;
        for h in handles {
            if h.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 5);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let svc = service();
        let user = UserId::parse("device-1").unwrap();
        let err = svc.create(&user, new_contact("  ")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_update_and_delete_are_owner_scoped() {
        let svc = service();
        let owner = UserId::parse("device-1").unwrap();
        let other = UserId::parse("device-2").unwrap();
        let contact = svc.create(&owner, new_contact("Mum")).await.unwrap();

        let patch = ContactPatch {
            contact_type: Some(ContactType::Home),
            ..Default::default()
        };
        let err = svc.update(&other, &contact.id, patch.clone()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let updated = svc.update(&owner, &contact.id, patch).await.unwrap();
        assert_eq!(updated.contact_type, ContactType::Home);

        assert_eq!(
            svc.delete(&other, &contact.id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        svc.delete(&owner, &contact.id).await.unwrap();
        assert!(svc.list(&owner).await.unwrap().is_empty());
    }
}
