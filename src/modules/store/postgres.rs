//! Postgres-backed store.
//!
//! Each operation is a single statement or a single transaction, so the
//! upvote guarantee holds without in-process locking: the unique key on
//! `(user_id, file_id)` plus `ON CONFLICT DO NOTHING` makes the insert the
//! arbiter of who voted first.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::comments::models::Comment;
use crate::features::files::models::{FileRecord, FileStatus};
use crate::modules::store::{Store, StoreStats};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_file(&self, record: FileRecord) -> Result<FileRecord> {
        sqlx::query(
            r#"
            INSERT INTO files
                (id, original_name, mime_type, size, uploader_id, uploader_name,
                 status, upvote_count, blob_key, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(record.id)
        .bind(&record.original_name)
        .bind(&record.mime_type)
        .bind(record.size)
        .bind(record.uploader_id)
        .bind(&record.uploader_name)
        .bind(record.status)
        .bind(record.upvote_count)
        .bind(&record.blob_key)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    async fn get_file(&self, id: Uuid) -> Result<Option<FileRecord>> {
        let record = sqlx::query_as::<_, FileRecord>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn list_files(&self) -> Result<Vec<FileRecord>> {
        let records =
            sqlx::query_as::<_, FileRecord>("SELECT * FROM files ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await?;

        Ok(records)
    }

    async fn set_file_status(
        &self,
        id: Uuid,
        expected: FileStatus,
        to: FileStatus,
    ) -> Result<Option<FileRecord>> {
        let record = sqlx::query_as::<_, FileRecord>(
            "UPDATE files SET status = $3 WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(expected)
        .bind(to)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn insert_upvote(&self, user_id: Uuid, file_id: Uuid) -> Result<Option<i64>> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO upvotes (user_id, file_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(file_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let count: i64 = sqlx::query_scalar(
            "UPDATE files SET upvote_count = upvote_count + 1 WHERE id = $1 RETURNING upvote_count",
        )
        .bind(file_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(count))
    }

    async fn insert_comment(&self, comment: Comment) -> Result<Comment> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, text, author_id, author_name, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.id)
        .bind(&comment.text)
        .bind(comment.author_id)
        .bind(&comment.author_name)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn list_comments(&self) -> Result<Vec<Comment>> {
        let comments =
            sqlx::query_as::<_, Comment>("SELECT * FROM comments ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await?;

        Ok(comments)
    }

    async fn stats(&self) -> Result<StoreStats> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT count(*) FROM files) AS total_files,
                (SELECT count(*) FROM files WHERE status = 'pending') AS pending_files,
                (SELECT count(*) FROM files WHERE status = 'approved') AS approved_files,
                (SELECT count(*) FROM files WHERE status = 'rejected') AS rejected_files,
                (SELECT count(*) FROM upvotes) AS total_upvotes,
                (SELECT count(*) FROM comments) AS total_comments
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(StoreStats {
            total_files: row.get("total_files"),
            pending_files: row.get("pending_files"),
            approved_files: row.get("approved_files"),
            rejected_files: row.get("rejected_files"),
            total_upvotes: row.get("total_upvotes"),
            total_comments: row.get("total_comments"),
        })
    }
}
