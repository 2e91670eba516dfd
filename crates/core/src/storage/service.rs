//! Storage service implementation using Apache OpenDAL.

use async_trait::async_trait;
use bytes::Bytes;
use opendal::{Operator, services};

use super::blob::{BlobStore, StoredObject};
use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// OpenDAL-backed blob store.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
    base_url: String,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// A local filesystem root is created if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        let base_url = config.base_url();
        Ok(Self {
            operator,
            config,
            base_url,
        })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::AzureBlob {
                account,
                access_key,
                container,
            } => {
                let builder = services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                std::fs::create_dir_all(root).map_err(|e| {
                    StorageError::configuration(format!(
                        "cannot create {}: {e}",
                        root.display()
                    ))
                })?;
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
        };

        Ok(operator)
    }

    /// Public URL of the object stored under `key`.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.base_url)
    }
}

#[async_trait]
impl BlobStore for StorageService {
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> Result<StoredObject, StorageError> {
        if key.is_empty() || key.starts_with('/') || key.split('/').any(|part| part == "..") {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let mut write = self.operator.write_with(key, bytes);
        if let Some(content_type) = content_type {
            write = write.content_type(content_type);
        }
        write
            .await
            .map_err(|e| StorageError::from_opendal(key, &e))?;

        Ok(StoredObject {
            key: key.to_string(),
            url: self.public_url(key),
        })
    }

    async fn get(&self, key: &str) -> Result<Bytes, StorageError> {
        let buffer = self
            .operator
            .read(key)
            .await
            .map_err(|e| StorageError::from_opendal(key, &e))?;
        Ok(buffer.to_bytes())
    }

    fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_service(dir: &tempfile::TempDir) -> StorageService {
        StorageService::from_config(StorageConfig::local_fallback(dir.path()))
            .expect("should create service")
    }

    #[test]
    fn test_from_config_creates_missing_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("nested").join("uploads");

        let service = StorageService::from_config(StorageConfig::local_fallback(&root))
            .expect("should create service");

        assert!(root.is_dir());
        assert_eq!(service.provider_name(), "local");
    }

    #[test]
    fn test_public_url() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = local_service(&dir);
        assert_eq!(
            service.public_url("1700000000000-paper.pdf"),
            "/api/files/1700000000000-paper.pdf"
        );
    }

    #[tokio::test]
    async fn test_put_then_get_local() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = local_service(&dir);

        let stored = service
            .put(
                "1700000000000-paper.pdf",
                Bytes::from_static(b"%PDF-1.7"),
                Some("application/pdf"),
            )
            .await
            .expect("put should succeed");

        assert_eq!(stored.key, "1700000000000-paper.pdf");
        assert_eq!(stored.url, "/api/files/1700000000000-paper.pdf");
        assert!(dir.path().join("1700000000000-paper.pdf").is_file());

        let bytes = service
            .get("1700000000000-paper.pdf")
            .await
            .expect("get should succeed");
        assert_eq!(&bytes[..], b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = local_service(&dir);

        let err = service.get("missing.pdf").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { ref key } if key == "missing.pdf"));
    }

    #[tokio::test]
    async fn test_put_rejects_traversal_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = local_service(&dir);

        for key in ["", "/etc/passwd", "../escape.pdf", "a/../../b.pdf"] {
            let err = service
                .put(key, Bytes::from_static(b"x"), None)
                .await
                .unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey(_)), "key {key:?}");
        }
    }
}
