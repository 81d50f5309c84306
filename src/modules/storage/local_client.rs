//! Local-filesystem blob store.
//!
//! Keeps uploaded bytes as flat files under a configured directory, one file
//! per blob key. Keys are generated here and contain no path separators, so
//! a key can never escape the root.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::config::StorageConfig;
use crate::core::error::{AppError, Result};
use crate::modules::storage::{
    extension_for_content_type, is_mime_type_allowed, BlobStore, ALLOWED_MIME_TYPES,
    MAX_FILE_SIZE,
};

pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create the store, ensuring the root directory exists.
    pub async fn new(config: StorageConfig) -> Result<Self> {
        tokio::fs::create_dir_all(&config.root).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create upload directory {}: {}",
                config.root.display(),
                e
            ))
        })?;

        info!("Blob store initialized at {}", config.root.display());

        Ok(Self { root: config.root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, data: Vec<u8>, content_type: &str) -> Result<String> {
        if !is_mime_type_allowed(content_type) {
            return Err(AppError::UnsupportedType(format!(
                "File type '{}' is not allowed. Allowed types: {}",
                content_type,
                ALLOWED_MIME_TYPES.join(", ")
            )));
        }

        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::TooLarge(format!(
                "File exceeds the maximum size of {} bytes ({} MB)",
                MAX_FILE_SIZE,
                MAX_FILE_SIZE / 1024 / 1024
            )));
        }

        let extension = extension_for_content_type(content_type).unwrap_or("bin");
        let key = format!("{}.{}", Uuid::new_v4(), extension);

        tokio::fs::write(self.path_for(&key), &data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write blob {}: {}", key, e)))?;

        debug!("Blob stored: key={}, size={}", key, data.len());

        Ok(key)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::NotFound(
                "Stored file is no longer available".to_string(),
            )),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to read blob {}: {}",
                key, e
            ))),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => {
                debug!("Blob deleted: key={}", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to delete blob {}: {}",
                key, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> LocalBlobStore {
        let root = std::env::temp_dir().join(format!("sharelit-blob-test-{}", Uuid::new_v4()));
        LocalBlobStore::new(StorageConfig { root }).await.unwrap()
    }

    #[tokio::test]
    async fn test_put_get_delete_roundtrip() {
        let store = temp_store().await;

        let key = store
            .put(b"%PDF-1.4 test".to_vec(), "application/pdf")
            .await
            .unwrap();
        assert!(key.ends_with(".pdf"));

        let bytes = store.get(&key).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.4 test");

        store.delete(&key).await.unwrap();
        let err = store.get(&key).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // Deleting an absent key stays quiet
        store.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_put_rejects_disallowed_type() {
        let store = temp_store().await;

        let err = store
            .put(b"MZ".to_vec(), "application/x-msdownload")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UnsupportedType(_)));
    }

    #[tokio::test]
    async fn test_put_rejects_oversized_file() {
        let store = temp_store().await;

        let data = vec![0u8; MAX_FILE_SIZE + 1];
        let err = store.put(data, "application/pdf").await.unwrap_err();

        assert!(matches!(err, AppError::TooLarge(_)));
    }

    #[tokio::test]
    async fn test_put_accepts_exact_limit() {
        let store = temp_store().await;

        let data = vec![0u8; MAX_FILE_SIZE];
        let key = store.put(data, "image/png").await.unwrap();

        assert!(key.ends_with(".png"));
    }
}
