//! Content-addressed record keys.

use sha1::{Digest, Sha1};

use crate::model::{ChatId, Query};

/// Hex SHA-1 of the chat id followed by the canonical query line.
///
/// Used only to spread record file names evenly; two equal queries of one chat
/// always land on the same key.
pub fn record_key(chat_id: ChatId, query: &Query) -> String {
    let mut hasher = Sha1::new();
    hasher.update(chat_id.to_string().as_bytes());
    hasher.update(query.canonical().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Experience;

    #[test]
    fn key_is_stable_hex_sha1() {
        let query = Query::new(1, 96, "golang", Experience::Between1And3);
        let key = record_key(42, &query);
        assert_eq!(key.len(), 40);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(key, record_key(42, &query.clone()));
        assert_ne!(key, record_key(43, &query));
    }
}
