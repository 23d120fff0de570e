//! In-process query store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::key::record_key;
use crate::model::{ChatId, Query};
use crate::store::QueryStore;

/// [`QueryStore`] kept in memory, preserving insertion order per chat.
///
/// Used by tests and by dry runs that must not touch disk.
#[derive(Debug, Default)]
pub struct MemoryQueryStore {
    chats: Mutex<HashMap<ChatId, Vec<(String, Query)>>>,
}

impl MemoryQueryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records persisted for a chat.
    pub async fn len(&self, chat_id: ChatId) -> usize {
        self.chats.lock().await.get(&chat_id).map_or(0, Vec::len)
    }
}

#[async_trait]
impl QueryStore for MemoryQueryStore {
    async fn exists(&self, chat_id: ChatId, query: &Query) -> Result<bool, StoreError> {
        let key = record_key(chat_id, query);
        Ok(self
            .chats
            .lock()
            .await
            .get(&chat_id)
            .is_some_and(|records| records.iter().any(|(k, _)| *k == key)))
    }

    async fn save(&self, chat_id: ChatId, query: &Query) -> Result<(), StoreError> {
        let key = record_key(chat_id, query);
        let mut chats = self.chats.lock().await;
        let records = chats.entry(chat_id).or_default();
        if records.iter().any(|(k, _)| *k == key) {
            return Err(StoreError::AlreadyExists(query.canonical()));
        }
        records.push((key, query.clone()));
        Ok(())
    }

    async fn remove(&self, chat_id: ChatId, query: &Query) -> Result<(), StoreError> {
        let key = record_key(chat_id, query);
        let mut chats = self.chats.lock().await;
        let records = chats
            .get_mut(&chat_id)
            .ok_or_else(|| StoreError::NotFound(query.canonical()))?;
        let position = records
            .iter()
            .position(|(k, _)| *k == key)
            .ok_or_else(|| StoreError::NotFound(query.canonical()))?;
        records.remove(position);
        Ok(())
    }

    async fn read_all(&self, chat_id: ChatId) -> Result<Vec<Query>, StoreError> {
        Ok(self
            .chats
            .lock()
            .await
            .get(&chat_id)
            .map(|records| records.iter().map(|(_, query)| query.clone()).collect())
            .unwrap_or_default())
    }
}
