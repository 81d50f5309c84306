use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Moderation state of an uploaded file.
///
/// Uploads start in `Pending` unless the uploader is an admin, in which case
/// they are created directly in `Approved`. `Approved` and `Rejected` are
/// terminal: no operation transitions a file out of either state. Rejected
/// records are kept as tombstones so admins can audit them; the stored bytes
/// are deleted at rejection time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "file_status", rename_all = "lowercase")]
pub enum FileStatus {
    Pending,
    Approved,
    Rejected,
}

/// A ledger entry for one uploaded file.
#[derive(Debug, Clone, FromRow)]
pub struct FileRecord {
    pub id: Uuid,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub uploader_id: Uuid,
    pub uploader_name: String,
    pub status: FileStatus,
    pub upvote_count: i64,
    /// Key into the blob store; the ledger never touches the bytes itself
    pub blob_key: String,
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    /// Whether a caller with the given privilege may see this record.
    pub fn visible_to(&self, caller_is_admin: bool) -> bool {
        caller_is_admin || self.status == FileStatus::Approved
    }
}
