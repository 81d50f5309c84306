//! In-memory store.
//!
//! A single `RwLock` over plain collections. Every operation takes the lock
//! exactly once, which is what makes the upvote check-then-insert atomic.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::comments::models::Comment;
use crate::features::files::models::{FileRecord, FileStatus};
use crate::modules::store::{Store, StoreStats};

#[derive(Default)]
struct MemoryState {
    files: Vec<FileRecord>,
    upvotes: HashSet<(Uuid, Uuid)>,
    comments: Vec<Comment>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_file(&self, record: FileRecord) -> Result<FileRecord> {
        let mut state = self.state.write().await;
        state.files.push(record.clone());
        Ok(record)
    }

    async fn get_file(&self, id: Uuid) -> Result<Option<FileRecord>> {
        let state = self.state.read().await;
        Ok(state.files.iter().find(|f| f.id == id).cloned())
    }

    async fn list_files(&self) -> Result<Vec<FileRecord>> {
        let state = self.state.read().await;
        Ok(state.files.clone())
    }

    async fn set_file_status(
        &self,
        id: Uuid,
        expected: FileStatus,
        to: FileStatus,
    ) -> Result<Option<FileRecord>> {
        let mut state = self.state.write().await;
        match state
            .files
            .iter_mut()
            .find(|f| f.id == id && f.status == expected)
        {
            Some(file) => {
                file.status = to;
                Ok(Some(file.clone()))
            }
            None => Ok(None),
        }
    }

    async fn insert_upvote(&self, user_id: Uuid, file_id: Uuid) -> Result<Option<i64>> {
        let mut state = self.state.write().await;

        if !state.upvotes.insert((user_id, file_id)) {
            return Ok(None);
        }

        // The pair was new; the file must exist because records are never
        // removed (reject is a soft delete).
        match state.files.iter_mut().find(|f| f.id == file_id) {
            Some(file) => {
                file.upvote_count += 1;
                Ok(Some(file.upvote_count))
            }
            None => {
                state.upvotes.remove(&(user_id, file_id));
                Ok(None)
            }
        }
    }

    async fn insert_comment(&self, comment: Comment) -> Result<Comment> {
        let mut state = self.state.write().await;
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_comments(&self) -> Result<Vec<Comment>> {
        let state = self.state.read().await;
        Ok(state.comments.clone())
    }

    async fn stats(&self) -> Result<StoreStats> {
        let state = self.state.read().await;

        let count_status = |status: FileStatus| -> i64 {
            state.files.iter().filter(|f| f.status == status).count() as i64
        };

        Ok(StoreStats {
            total_files: state.files.len() as i64,
            pending_files: count_status(FileStatus::Pending),
            approved_files: count_status(FileStatus::Approved),
            rejected_files: count_status(FileStatus::Rejected),
            total_upvotes: state.upvotes.len() as i64,
            total_comments: state.comments.len() as i64,
        })
    }
}
