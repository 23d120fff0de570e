#![allow(clippy::doc_markdown)]

//! vacancy-store - Saved vacancy search queries for vacancy-relay
//!
//! Owns the query data model and its persistence contract.
//!
//! # Features
//!
//! - **Canonical form**: every query serializes to one space-joined line that is both the
//!   persisted payload and the hash input for existence checks
//! - **Content addressed**: one record per query, keyed by SHA-1 of chat id + canonical line
//! - **Chat partitioned**: records live in one directory per chat id
//!
//! # Architecture
//!
//! ```text
//! vacancy-store/src/
//! ├── lib.rs     # Re-exports (this file)
//! ├── error.rs   # StoreError enum
//! ├── model.rs   # Query + Experience bucket
//! ├── key.rs     # Content-addressed record key
//! ├── store.rs   # QueryStore capability trait
//! ├── file.rs    # Directory-per-chat file store (tokio::fs)
//! └── memory.rs  # In-process store for tests and dry runs
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use vacancy_store::{Experience, FileQueryStore, Query, QueryStore};
//!
//! let store = FileQueryStore::new("data/queries");
//! let query = Query::new(1, 96, "golang", Experience::Between1And3);
//! if !store.exists(42, &query).await? {
//!     store.save(42, &query).await?;
//! }
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
mod file;
mod key;
mod memory;
mod model;
mod store;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use error::StoreError;
pub use file::FileQueryStore;
pub use key::record_key;
pub use memory::MemoryQueryStore;
pub use model::{ChatId, Experience, Query};
pub use store::QueryStore;
