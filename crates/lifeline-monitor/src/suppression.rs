//! Process-local suppression record.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use lifeline_core::result::AppResult;
use lifeline_database::traits::SuppressionStore;
use lifeline_entity::notification::{SuppressionEntry, SuppressionKey};

/// Sent-notification record held in memory. Empty after every restart.
#[derive(Debug, Clone, Default)]
pub struct InMemorySuppressionStore {
    entries: Arc<DashMap<SuppressionKey, DateTime<Utc>>>,
}

impl InMemorySuppressionStore {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of every entry.
    pub fn snapshot(&self) -> Vec<SuppressionEntry> {
        self.entries
            .iter()
            .map(|e| SuppressionEntry {
                key: e.key().clone(),
                last_sent_at: *e.value(),
            })
            .collect()
    }
}

#[async_trait]
impl SuppressionStore for InMemorySuppressionStore {
    async fn last_sent(&self, key: &SuppressionKey) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self.entries.get(key).map(|e| *e.value()))
    }

    async fn record_sent(&self, key: &SuppressionKey, at: DateTime<Utc>) -> AppResult<()> {
        self.entries.insert(key.clone(), at);
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let before = self.entries.len();
        self.entries.retain(|_, sent_at| *sent_at >= cutoff);
        Ok(before.saturating_sub(self.entries.len()) as u64)
    }
}
