use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::files::handlers::{
    approve_file, download_file, list_files, reject_file, upload_file, upvote_file,
};
use crate::features::files::services::FileService;
use crate::modules::storage::MAX_FILE_SIZE;

/// Create routes for the files feature
pub fn routes(file_service: Arc<FileService>) -> Router {
    Router::new()
        .route(
            "/api/files/upload",
            // Allow body size up to MAX_FILE_SIZE + buffer for multipart overhead
            post(upload_file).layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024)),
        )
        .route("/api/files", get(list_files))
        .route("/api/files/{id}/approve", post(approve_file))
        .route("/api/files/{id}/reject", post(reject_file))
        .route("/api/files/{id}/upvote", post(upvote_file))
        .route("/api/files/{id}/download", get(download_file))
        .with_state(file_service)
}
