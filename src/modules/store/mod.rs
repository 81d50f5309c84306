//! Persistence collaborator for ledger and comment records.
//!
//! The store is injected into services at construction time so the same
//! ledger logic runs against the in-memory implementation (default, and used
//! by unit tests) or the Postgres one (selected via DATABASE_URL). Both
//! return files and comments in insertion order.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::comments::models::Comment;
use crate::features::files::models::{FileRecord, FileStatus};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Counts reported by the admin stats endpoint.
#[derive(Debug, Clone, Default)]
pub struct StoreStats {
    pub total_files: i64,
    pub pending_files: i64,
    pub approved_files: i64,
    pub rejected_files: i64,
    pub total_upvotes: i64,
    pub total_comments: i64,
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_file(&self, record: FileRecord) -> Result<FileRecord>;

    async fn get_file(&self, id: Uuid) -> Result<Option<FileRecord>>;

    /// All file records in insertion order. Visibility filtering is the
    /// ledger's job, not the store's.
    async fn list_files(&self) -> Result<Vec<FileRecord>>;

    /// Compare-and-set on the status of one record. Returns the updated
    /// record, or `None` when the record is absent or not in `expected`
    /// status; the caller distinguishes the two with `get_file`.
    async fn set_file_status(
        &self,
        id: Uuid,
        expected: FileStatus,
        to: FileStatus,
    ) -> Result<Option<FileRecord>>;

    /// Record an upvote and bump the file's counter, atomically with respect
    /// to other callers racing on the same `(user_id, file_id)` pair.
    /// Returns the new count, or `None` when the pair already voted.
    async fn insert_upvote(&self, user_id: Uuid, file_id: Uuid) -> Result<Option<i64>>;

    async fn insert_comment(&self, comment: Comment) -> Result<Comment>;

    /// All comments in insertion order.
    async fn list_comments(&self) -> Result<Vec<Comment>>;

    async fn stats(&self) -> Result<StoreStats>;
}
