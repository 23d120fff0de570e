//! Directory-per-chat file store.
//!
//! Layout: `<base>/<chat_id>/<record_key>`, payload = canonical query line.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::SystemTime;

use async_trait::async_trait;
use tokio::fs as tokio_fs;

use crate::error::StoreError;
use crate::key::record_key;
use crate::model::{ChatId, Query};
use crate::store::QueryStore;

const TEMP_SUFFIX: &str = ".tmp";

/// File-backed [`QueryStore`] (one small file per saved query).
#[derive(Debug, Clone)]
pub struct FileQueryStore {
    base_dir: PathBuf,
}

impl FileQueryStore {
    /// Create a store rooted at `base_dir`. Directories are created lazily on save.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory holding one chat's records.
    pub fn chat_dir(&self, chat_id: ChatId) -> PathBuf {
        self.base_dir.join(chat_id.to_string())
    }

    fn record_path(&self, chat_id: ChatId, query: &Query) -> PathBuf {
        self.chat_dir(chat_id).join(record_key(chat_id, query))
    }
}

#[async_trait]
impl QueryStore for FileQueryStore {
    async fn exists(&self, chat_id: ChatId, query: &Query) -> Result<bool, StoreError> {
        let path = self.record_path(chat_id, query);
        let exists = tokio_fs::try_exists(&path).await?;
        if exists {
            tracing::debug!(path = %path.display(), "query record exists");
        }
        Ok(exists)
    }

    async fn save(&self, chat_id: ChatId, query: &Query) -> Result<(), StoreError> {
        if self.exists(chat_id, query).await? {
            return Err(StoreError::AlreadyExists(query.canonical()));
        }

        let dir = self.chat_dir(chat_id);
        tokio_fs::create_dir_all(&dir).await?;

        let path = self.record_path(chat_id, query);
        let mut temp = path.clone().into_os_string();
        temp.push(TEMP_SUFFIX);
        let temp = PathBuf::from(temp);

        tokio_fs::write(&temp, query.canonical()).await?;
        if let Err(error) = tokio_fs::rename(&temp, &path).await {
            let _ = tokio_fs::remove_file(&temp).await;
            return Err(error.into());
        }

        tracing::info!(chat_id, path = %path.display(), "query record created");
        Ok(())
    }

    async fn remove(&self, chat_id: ChatId, query: &Query) -> Result<(), StoreError> {
        let path = self.record_path(chat_id, query);
        match tokio_fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(chat_id, path = %path.display(), "query record removed");
                Ok(())
            }
            Err(error) if error.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(query.canonical()))
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn read_all(&self, chat_id: ChatId) -> Result<Vec<Query>, StoreError> {
        let dir = self.chat_dir(chat_id);
        let mut entries = match tokio_fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        let mut records: Vec<(SystemTime, String, Query)> = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(TEMP_SUFFIX) {
                continue;
            }
            let metadata = match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(error) => {
                    tracing::warn!(path = %entry.path().display(), error = %error, "couldn't stat query record; skipping");
                    continue;
                }
            };

            let payload = match tokio_fs::read_to_string(entry.path()).await {
                Ok(payload) => payload,
                Err(error) => {
                    tracing::warn!(path = %entry.path().display(), error = %error, "couldn't read query record; skipping");
                    continue;
                }
            };
            match Query::from_canonical(&payload) {
                Ok(query) => {
                    let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                    records.push((modified, name, query));
                }
                Err(error) => {
                    tracing::warn!(path = %entry.path().display(), error = %error, "couldn't decode query record; skipping");
                }
            }
        }

        // Oldest first keeps display ids stable across restarts in the common case.
        records.sort_by(|left, right| left.0.cmp(&right.0).then_with(|| left.1.cmp(&right.1)));

        tracing::debug!(chat_id, count = records.len(), "read query records");
        Ok(records.into_iter().map(|(_, _, query)| query).collect())
    }
}
