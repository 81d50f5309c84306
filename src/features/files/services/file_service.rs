use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::CurrentUser;
use crate::features::files::models::{FileRecord, FileStatus};
use crate::modules::storage::BlobStore;
use crate::modules::store::Store;

/// The file moderation and visibility ledger.
///
/// All state lives in the injected store; the blob store is only told to
/// persist bytes on upload and drop them on rejection. Authorization arrives
/// as a plain `is_admin` boolean; credentials never reach this type.
pub struct FileService {
    store: Arc<dyn Store>,
    blobs: Arc<dyn BlobStore>,
}

impl FileService {
    pub fn new(store: Arc<dyn Store>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    /// Accept an upload and append it to the ledger.
    ///
    /// The blob store is the gatekeeper for content type and size; a record
    /// is only created for bytes it accepted. Uploads by an admin skip the
    /// pending state and are approved immediately.
    pub async fn upload(
        &self,
        data: Vec<u8>,
        original_name: &str,
        content_type: &str,
        uploader: &CurrentUser,
    ) -> Result<FileRecord> {
        if uploader.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Uploader must have a display name".to_string(),
            ));
        }

        let size = data.len() as i64;
        let blob_key = self.blobs.put(data, content_type).await?;

        let status = if uploader.is_admin {
            FileStatus::Approved
        } else {
            FileStatus::Pending
        };

        let record = self
            .store
            .insert_file(FileRecord {
                id: Uuid::new_v4(),
                original_name: original_name.to_string(),
                mime_type: content_type.to_string(),
                size,
                uploader_id: uploader.id,
                uploader_name: uploader.name.clone(),
                status,
                upvote_count: 0,
                blob_key,
                created_at: Utc::now(),
            })
            .await?;

        info!(
            "File uploaded: id={}, name={}, status={:?}, uploader={}",
            record.id, record.original_name, record.status, record.uploader_name
        );

        Ok(record)
    }

    /// Records visible to the caller, in insertion order. Admins see
    /// everything including rejected tombstones; everyone else sees only
    /// approved files.
    pub async fn list(&self, caller_is_admin: bool) -> Result<Vec<FileRecord>> {
        let files = self.store.list_files().await?;

        Ok(files
            .into_iter()
            .filter(|f| f.visible_to(caller_is_admin))
            .collect())
    }

    /// Approve a pending file.
    pub async fn approve(&self, file_id: Uuid, caller_is_admin: bool) -> Result<FileRecord> {
        let record = self
            .transition(file_id, caller_is_admin, FileStatus::Approved)
            .await?;

        info!("File approved: id={}", record.id);

        Ok(record)
    }

    /// Reject a pending file.
    ///
    /// The record is kept as a tombstone for admin audit; the stored bytes
    /// are deleted best-effort (a dangling blob is a cheaper failure than a
    /// dangling visible record).
    pub async fn reject(&self, file_id: Uuid, caller_is_admin: bool) -> Result<FileRecord> {
        let record = self
            .transition(file_id, caller_is_admin, FileStatus::Rejected)
            .await?;

        if let Err(e) = self.blobs.delete(&record.blob_key).await {
            warn!(
                "Failed to delete blob for rejected file {}: {}",
                record.id, e
            );
        }

        info!("File rejected: id={}", record.id);

        Ok(record)
    }

    /// Record one upvote for `(user, file)` and return the new count.
    ///
    /// Only approved files can be upvoted; a pending or rejected target is
    /// reported as absent rather than revealed.
    pub async fn upvote(&self, user_id: Uuid, file_id: Uuid) -> Result<i64> {
        let file = self
            .store
            .get_file(file_id)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        if file.status != FileStatus::Approved {
            return Err(AppError::NotFound("File not found".to_string()));
        }

        match self.store.insert_upvote(user_id, file_id).await? {
            Some(count) => Ok(count),
            None => Err(AppError::Conflict(
                "You have already upvoted this file".to_string(),
            )),
        }
    }

    /// Resolve a download request to the ledger entry, enforcing visibility:
    /// non-admin callers may only download approved files.
    pub async fn download(&self, file_id: Uuid, caller_is_admin: bool) -> Result<FileRecord> {
        let file = self
            .store
            .get_file(file_id)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        if !file.visible_to(caller_is_admin) {
            return Err(AppError::Forbidden(
                "File is awaiting moderation".to_string(),
            ));
        }

        Ok(file)
    }

    /// Fetch the bytes behind a ledger entry from the blob store.
    pub async fn read_blob(&self, record: &FileRecord) -> Result<Vec<u8>> {
        self.blobs.get(&record.blob_key).await
    }

    async fn transition(
        &self,
        file_id: Uuid,
        caller_is_admin: bool,
        to: FileStatus,
    ) -> Result<FileRecord> {
        if !caller_is_admin {
            return Err(AppError::Forbidden(
                "Only admins may moderate files".to_string(),
            ));
        }

        match self
            .store
            .set_file_status(file_id, FileStatus::Pending, to)
            .await?
        {
            Some(record) => Ok(record),
            // Either the record is missing or it was already processed;
            // a second read tells the two apart.
            None => match self.store.get_file(file_id).await? {
                None => Err(AppError::NotFound("File not found".to_string())),
                Some(_) => Err(AppError::Conflict(
                    "File has already been moderated".to_string(),
                )),
            },
        }
    }
}
