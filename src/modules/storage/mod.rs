//! Blob store for uploaded file bytes.
//!
//! Owns the content filter (allowed MIME types, 10 MiB cap) and the raw byte
//! persistence, keyed by an opaque blob key. Metadata stays in the ledger;
//! this module never sees it.

mod local_client;

use async_trait::async_trait;

use crate::core::error::Result;

pub use local_client::LocalBlobStore;

/// Allowed MIME types for uploads
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/epub+zip",
    "audio/mpeg",
    "image/jpeg",
    "image/jpg",
    "image/png",
];

/// Maximum upload size in bytes (10 MiB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Check if a MIME type is allowed
pub fn is_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&content_type)
}

/// File extension for an allowed content type
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "application/pdf" => Some("pdf"),
        "application/epub+zip" => Some("epub"),
        "audio/mpeg" => Some("mp3"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        _ => None,
    }
}

/// Byte persistence collaborator consumed by the ledger.
///
/// `put` is the single gate for content acceptance: a blob key only exists
/// for bytes that already passed the type and size filter.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Validate and persist the bytes, returning the assigned blob key.
    async fn put(&self, data: Vec<u8>, content_type: &str) -> Result<String>;

    /// Read the bytes behind a key.
    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Remove the bytes behind a key. Deleting an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<()>;
}
