//! Upload service: validation followed by primary or fallback storage.

use std::sync::Arc;

use bestpapers_shared::config::StorageSettings;
use bestpapers_shared::StorageStrategy;
use tracing::{info, warn};

use super::error::UploadError;
use super::naming::{FallbackNamer, primary_key};
use super::policy::UploadPolicy;
use super::types::{UploadRequest, UploadResult};
use crate::storage::{BlobStore, StorageConfig, StorageError, StorageService};

/// Storage backends in effect, resolved once at startup.
#[derive(Clone)]
pub enum StorageBackends {
    /// Durable storage only.
    PrimaryOnly {
        /// Durable blob store.
        primary: Arc<dyn BlobStore>,
    },
    /// Local development fallback only.
    FallbackOnly {
        /// Local fallback store.
        fallback: Arc<dyn BlobStore>,
    },
    /// Durable storage with one local attempt when it fails.
    PrimaryWithFallback {
        /// Durable blob store.
        primary: Arc<dyn BlobStore>,
        /// Local fallback store.
        fallback: Arc<dyn BlobStore>,
    },
}

impl StorageBackends {
    /// Resolve a configured strategy against the stores that exist.
    ///
    /// `PrimaryWithFallback` without a primary degrades to `FallbackOnly`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the strategy needs a store that
    /// was not provided.
    pub fn resolve(
        strategy: StorageStrategy,
        primary: Option<Arc<dyn BlobStore>>,
        fallback: Option<Arc<dyn BlobStore>>,
    ) -> Result<Self, StorageError> {
        match (strategy, primary, fallback) {
            (StorageStrategy::PrimaryOnly, Some(primary), _) => Ok(Self::PrimaryOnly { primary }),
            (StorageStrategy::PrimaryOnly, None, _) => Err(StorageError::configuration(
                "strategy primary_only requires storage.primary",
            )),
            (StorageStrategy::FallbackOnly, _, Some(fallback)) => {
                Ok(Self::FallbackOnly { fallback })
            }
            (StorageStrategy::PrimaryWithFallback, Some(primary), Some(fallback)) => {
                Ok(Self::PrimaryWithFallback { primary, fallback })
            }
            (StorageStrategy::PrimaryWithFallback, None, Some(fallback)) => {
                warn!("No primary storage configured, serving uploads from the local fallback");
                Ok(Self::FallbackOnly { fallback })
            }
            (strategy, _, None) => Err(StorageError::configuration(format!(
                "strategy {} requires a fallback store",
                strategy.as_str()
            ))),
        }
    }

    /// Build the stores named by `settings` and resolve its strategy.
    ///
    /// The fallback directory is only created when the strategy can use it.
    ///
    /// # Errors
    ///
    /// Returns an error if a store cannot be initialized or the strategy
    /// cannot be satisfied.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let primary = settings
            .primary
            .clone()
            .map(|provider| {
                let mut config = StorageConfig::new(provider);
                if let Some(base) = &settings.public_base_url {
                    config = config.with_public_base_url(base.clone());
                }
                StorageService::from_config(config).map(|s| Arc::new(s) as Arc<dyn BlobStore>)
            })
            .transpose()?;

        let fallback = match settings.strategy {
            StorageStrategy::PrimaryOnly => None,
            StorageStrategy::FallbackOnly | StorageStrategy::PrimaryWithFallback => {
                let config = StorageConfig::local_fallback(&settings.fallback_dir);
                Some(Arc::new(StorageService::from_config(config)?) as Arc<dyn BlobStore>)
            }
        };

        Self::resolve(settings.strategy, primary, fallback)
    }

    /// Strategy actually in effect.
    #[must_use]
    pub fn strategy(&self) -> StorageStrategy {
        match self {
            Self::PrimaryOnly { .. } => StorageStrategy::PrimaryOnly,
            Self::FallbackOnly { .. } => StorageStrategy::FallbackOnly,
            Self::PrimaryWithFallback { .. } => StorageStrategy::PrimaryWithFallback,
        }
    }

    /// The local fallback store, if this strategy has one.
    #[must_use]
    pub fn fallback(&self) -> Option<&Arc<dyn BlobStore>> {
        match self {
            Self::PrimaryOnly { .. } => None,
            Self::FallbackOnly { fallback } | Self::PrimaryWithFallback { fallback, .. } => {
                Some(fallback)
            }
        }
    }
}

/// Validates paper files and stores them.
pub struct UploadService {
    policy: UploadPolicy,
    backends: StorageBackends,
    namer: FallbackNamer,
}

impl UploadService {
    /// Create a new upload service.
    #[must_use]
    pub fn new(policy: UploadPolicy, backends: StorageBackends) -> Self {
        Self {
            policy,
            backends,
            namer: FallbackNamer::new(),
        }
    }

    /// The validation policy.
    #[must_use]
    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// The resolved storage backends.
    #[must_use]
    pub fn backends(&self) -> &StorageBackends {
        &self.backends
    }

    /// Validate and store a file.
    ///
    /// # Errors
    ///
    /// Returns a validation error (`MissingFile`, `InvalidFileType`,
    /// `FileTooLarge`) or `StorageUnavailable`.
    pub async fn upload(
        &self,
        request: Option<UploadRequest>,
    ) -> Result<UploadResult, UploadError> {
        let request = request.ok_or(UploadError::MissingFile)?;
        self.policy
            .validate(Some(request.filename.as_str()), request.size())?;
        self.store(request).await
    }

    /// Store an already validated file using the resolved strategy.
    ///
    /// With `PrimaryWithFallback`, any primary error leads to exactly one
    /// fallback attempt.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if no storage path succeeds.
    pub async fn store(&self, request: UploadRequest) -> Result<UploadResult, UploadError> {
        match &self.backends {
            StorageBackends::PrimaryOnly { primary } => {
                Self::store_primary(primary.as_ref(), &request)
                    .await
                    .map_err(|e| UploadError::StorageUnavailable(e.to_string()))
            }
            StorageBackends::FallbackOnly { fallback } => self
                .store_fallback(fallback.as_ref(), &request)
                .await
                .map_err(|e| UploadError::StorageUnavailable(e.to_string())),
            StorageBackends::PrimaryWithFallback { primary, fallback } => {
                match Self::store_primary(primary.as_ref(), &request).await {
                    Ok(result) => Ok(result),
                    Err(primary_err) => {
                        warn!(
                            error = %primary_err,
                            filename = %request.filename,
                            "Primary storage failed, using local fallback"
                        );
                        self.store_fallback(fallback.as_ref(), &request)
                            .await
                            .map_err(|fallback_err| {
                                UploadError::StorageUnavailable(format!(
                                    "primary: {primary_err}; fallback: {fallback_err}"
                                ))
                            })
                    }
                }
            }
        }
    }

    async fn store_primary(
        store: &dyn BlobStore,
        request: &UploadRequest,
    ) -> Result<UploadResult, StorageError> {
        let key = primary_key(&request.filename);
        let stored = store
            .put(&key, request.bytes.clone(), request.content_type.as_deref())
            .await?;

        info!(
            filename = %request.filename,
            key = %stored.key,
            size = request.size(),
            provider = store.provider_name(),
            "Paper stored"
        );

        Ok(UploadResult {
            url: stored.url,
            filename: request.filename.clone(),
            size: request.size(),
        })
    }

    async fn store_fallback(
        &self,
        store: &dyn BlobStore,
        request: &UploadRequest,
    ) -> Result<UploadResult, StorageError> {
        let filename = self.namer.next_name(&request.filename);
        let stored = store
            .put(&filename, request.bytes.clone(), request.content_type.as_deref())
            .await?;

        info!(
            filename = %filename,
            size = request.size(),
            provider = store.provider_name(),
            "Paper stored in local fallback (development only)"
        );

        Ok(UploadResult {
            url: stored.url,
            filename,
            size: request.size(),
        })
    }
}
