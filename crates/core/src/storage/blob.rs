//! Blob store abstraction.

use async_trait::async_trait;
use bytes::Bytes;

use super::error::StorageError;

/// An object written to a blob store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Key the object was written under.
    pub key: String,
    /// URL at which the object can be fetched.
    pub url: String,
}

/// Object storage backing paper uploads.
///
/// Implemented by [`super::StorageService`]; tests substitute their own.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `bytes` under `key`, replacing any existing object.
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> Result<StoredObject, StorageError>;

    /// Read the object stored under `key`.
    async fn get(&self, key: &str) -> Result<Bytes, StorageError>;

    /// Short provider name used in logs.
    fn provider_name(&self) -> &'static str;
}
