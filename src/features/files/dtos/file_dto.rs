use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::files::models::{FileRecord, FileStatus};

/// Upload request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileDto {
    /// The file to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Response DTO for a ledger entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileResponseDto {
    /// Unique identifier for the file
    pub id: Uuid,
    /// Original filename as uploaded
    pub original_name: String,
    /// MIME type of the file
    pub mime_type: String,
    /// Size of the file in bytes
    pub size: i64,
    /// Display name of the uploader
    pub uploader_name: String,
    /// Moderation status
    pub status: FileStatus,
    /// Number of distinct users who upvoted the file
    pub upvote_count: i64,
    /// Timestamp when the file was uploaded
    pub created_at: DateTime<Utc>,
}

impl From<FileRecord> for FileResponseDto {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            original_name: record.original_name,
            mime_type: record.mime_type,
            size: record.size,
            uploader_name: record.uploader_name,
            status: record.status,
            upvote_count: record.upvote_count,
            created_at: record.created_at,
        }
    }
}

/// Response DTO for the upvote operation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpvoteResponseDto {
    /// The new upvote count after this vote
    pub upvote_count: i64,
}
