//! Query store capability.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{ChatId, Query};

/// Persistence of saved queries, partitioned per chat.
///
/// A chat's records are only ever touched by that chat's worker, so
/// implementations need not make check-then-save atomic.
#[async_trait]
pub trait QueryStore: Send + Sync {
    /// Whether a record for this chat and query is present.
    async fn exists(&self, chat_id: ChatId, query: &Query) -> Result<bool, StoreError>;

    /// Persist one query. Fails with [`StoreError::AlreadyExists`] on duplicates.
    async fn save(&self, chat_id: ChatId, query: &Query) -> Result<(), StoreError>;

    /// Delete one query. Fails with [`StoreError::NotFound`] when absent.
    async fn remove(&self, chat_id: ChatId, query: &Query) -> Result<(), StoreError>;

    /// All decodable queries of a chat. Corrupt records are logged and skipped.
    async fn read_all(&self, chat_id: ChatId) -> Result<Vec<Query>, StoreError>;
}
