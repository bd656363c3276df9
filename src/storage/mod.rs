//! Blob store abstraction: persist bytes under a key, mint time-limited
//! retrieval URLs.
//!
//! The pipeline writes exactly two objects per run (rendered artifact +
//! normalized proposal snapshot) and never reads them back, so the port is
//! deliberately small. Implementations must be safe for concurrent use by
//! independent requests.

use std::time::Duration;

use async_trait::async_trait;

pub mod memory;
pub mod s3;

pub use memory::MemoryStore;
pub use s3::S3BlobStore;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `bytes` under `key`, overwriting any previous object.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// Mint a retrieval URL for `key` that stays valid for `ttl`.
    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("upload of '{key}' failed: {detail}")]
    Upload { key: String, detail: String },
    #[error("presigning '{key}' failed: {detail}")]
    Presign { key: String, detail: String },
    #[error("blob store not configured: {0}")]
    NotConfigured(String),
}
