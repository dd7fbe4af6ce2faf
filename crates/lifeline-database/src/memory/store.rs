//! In-memory implementation of the entity stores using `DashMap`.
//!
//! Data lives only as long as the process. Per-user rows are grouped under
//! the user's key so that capped and once-per-day inserts are decided while
//! holding that key's shard lock.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;

use lifeline_core::result::AppResult;
use lifeline_core::types::{ContactId, UserId};
use lifeline_entity::checkin::{CheckIn, NewCheckIn};
use lifeline_entity::contact::EmergencyContact;
use lifeline_entity::settings::UserSettings;
use lifeline_entity::user::User;

use crate::traits::{CheckInStore, ContactStore, SettingsStore, UserStore};

/// All entity stores backed by concurrent maps. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<UserId, User>>,
    checkins: Arc<DashMap<UserId, Vec<CheckIn>>>,
    settings: Arc<DashMap<UserId, UserSettings>>,
    contacts: Arc<DashMap<UserId, Vec<EmergencyContact>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    async fn get_or_create(&self, id: &UserId, now: DateTime<Utc>) -> AppResult<(User, bool)> {
        let mut created = false;
        let user = self
            .users
            .entry(id.clone())
            .or_insert_with(|| {
                created = true;
                User::new(id.clone(), now)
            })
            .value()
            .clone();
        Ok((user, created))
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }
}

#[async_trait]
impl CheckInStore for MemoryStore {
    async fn insert_if_absent(&self, check_in: NewCheckIn) -> AppResult<Option<CheckIn>> {
        let mut rows = self.checkins.entry(check_in.user_id.clone()).or_default();
        if rows.iter().any(|c| c.checkin_date == check_in.checkin_date) {
            return Ok(None);
        }
        let row = check_in.into_check_in();
        rows.push(row.clone());
        Ok(Some(row))
    }

    async fn find_last(&self, user_id: &UserId) -> AppResult<Option<CheckIn>> {
        Ok(self
            .checkins
            .get(user_id)
            .and_then(|rows| rows.iter().max_by_key(|c| c.checkin_time).cloned()))
    }

    async fn list_by_user(&self, user_id: &UserId, limit: Option<i64>) -> AppResult<Vec<CheckIn>> {
        let mut rows = self
            .checkins
            .get(user_id)
            .map(|rows| rows.clone())
            .unwrap_or_default();
        rows.sort_by(|a, b| b.checkin_time.cmp(&a.checkin_time));
        if let Some(limit) = limit {
            rows.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }
        Ok(rows)
    }

    async fn exists_on(&self, user_id: &UserId, date: NaiveDate) -> AppResult<bool> {
        Ok(self
            .checkins
            .get(user_id)
            .is_some_and(|rows| rows.iter().any(|c| c.checkin_date == date)))
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn find_by_user(&self, user_id: &UserId) -> AppResult<Option<UserSettings>> {
        Ok(self.settings.get(user_id).map(|s| s.value().clone()))
    }

    async fn get_or_create(&self, user_id: &UserId, now: DateTime<Utc>) -> AppResult<UserSettings> {
        Ok(self
            .settings
            .entry(user_id.clone())
            .or_insert_with(|| UserSettings::defaults_for(user_id.clone(), now))
            .value()
            .clone())
    }

    async fn save(&self, settings: &UserSettings) -> AppResult<UserSettings> {
        self.settings
            .insert(settings.user_id.clone(), settings.clone());
        Ok(settings.clone())
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn list_by_user(&self, user_id: &UserId) -> AppResult<Vec<EmergencyContact>> {
        let mut rows: Vec<EmergencyContact> = self
            .contacts
            .get(user_id)
            .map(|rows| rows.iter().rev().cloned().collect())
            .unwrap_or_default();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find_by_id(
        &self,
        id: &ContactId,
        user_id: &UserId,
    ) -> AppResult<Option<EmergencyContact>> {
        Ok(self
            .contacts
            .get(user_id)
            .and_then(|rows| rows.iter().find(|c| c.id == *id).cloned()))
    }

    async fn count_by_user(&self, user_id: &UserId) -> AppResult<i64> {
        Ok(self
            .contacts
            .get(user_id)
            .map(|rows| rows.len() as i64)
            .unwrap_or(0))
    }

    async fn insert_capped(
        &self,
        contact: EmergencyContact,
        max: i64,
    ) -> AppResult<Option<EmergencyContact>> {
        let mut rows = self.contacts.entry(contact.user_id.clone()).or_default();
        if rows.len() as i64 >= max {
            return Ok(None);
        }
        rows.push(contact.clone());
        Ok(Some(contact))
    }

    async fn save(&self, contact: &EmergencyContact) -> AppResult<Option<EmergencyContact>> {
        let Some(mut rows) = self.contacts.get_mut(&contact.user_id) else {
            return Ok(None);
        };
        match rows.iter_mut().find(|c| c.id == contact.id) {
            Some(slot) => {
                *slot = contact.clone();
                Ok(Some(contact.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &ContactId, user_id: &UserId) -> AppResult<bool> {
        let Some(mut rows) = self.contacts.get_mut(user_id) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|c| c.id != *id);
        Ok(rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use lifeline_entity::contact::{ContactType, NewContact};

    fn user() -> UserId {
        UserId::parse("device-1").unwrap()
    }

    fn contact(name: &str, now: DateTime<Utc>) -> EmergencyContact {
        NewContact {
            name: name.to_string(),
            phone: "555-123-4567".to_string(),
            contact_type: ContactType::Mobile,
        }
        .into_contact(user(), now)
    }

    #[tokio::test]
    async fn test_get_or_create_user_once() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let (_, created) = UserStore::get_or_create(&store, &user(), now).await.unwrap();
        assert!(created);
        let (_, created) = UserStore::get_or_create(&store, &user(), now).await.unwrap();
        assert!(!created);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_second_check_in_same_date_is_ignored() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let date = now.date_naive();
        let first = NewCheckIn {
            user_id: user(),
            checkin_time: now,
            checkin_date: date,
        };
        assert!(store.insert_if_absent(first.clone()).await.unwrap().is_some());
        let again = NewCheckIn {
            checkin_time: now + Duration::hours(2),
            ..first
        };
        assert!(store.insert_if_absent(again).await.unwrap().is_none());
        assert_eq!(CheckInStore::list_by_user(&store, &user(), None).await.unwrap().len(), 1);
        assert!(store.exists_on(&user(), date).await.unwrap());
    }

    #[tokio::test]
    async fn test_history_newest_first_with_limit() {
        let store = MemoryStore::new();
        let base = Utc::now();
        for offset in 0..3 {
            let ts = base - Duration::days(offset);
            store
                .insert_if_absent(NewCheckIn {
                    user_id: user(),
                    checkin_time: ts,
                    checkin_date: ts.date_naive(),
                })
                .await
                .unwrap();
        }
        let rows = CheckInStore::list_by_user(&store, &user(), Some(2)).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].checkin_time, base);
        assert_eq!(store.find_last(&user()).await.unwrap().unwrap().checkin_time, base);
    }

    #[tokio::test]
    async fn test_insert_capped_rejects_past_max() {
        let store = MemoryStore::new();
        let now = Utc::now();
        for i in 0..2 {
            let added = store
                .insert_capped(contact(&format!("c{i}"), now), 2)
                .await
                .unwrap();
            assert!(added.is_some());
        }
        assert!(store.insert_capped(contact("extra", now), 2).await.unwrap().is_none());
        assert_eq!(store.count_by_user(&user()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_contacts_scoped_to_owner() {
        let store = MemoryStore::new();
        let c = store
            .insert_capped(contact("Mum", Utc::now()), 5)
            .await
            .unwrap()
            .unwrap();
        let stranger = UserId::parse("device-2").unwrap();
        assert!(ContactStore::find_by_id(&store, &c.id, &stranger).await.unwrap().is_none());
        assert!(!store.delete(&c.id, &stranger).await.unwrap());
        assert!(store.delete(&c.id, &user()).await.unwrap());
        assert!(ContactStore::list_by_user(&store, &user()).await.unwrap().is_empty());
    }
}
