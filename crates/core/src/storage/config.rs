//! Storage configuration types.

pub use bestpapers_shared::StorageProvider;

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Base URL objects are published under. `None` uses the provider's
    /// native object URL.
    pub public_base_url: Option<String>,
}

impl StorageConfig {
    /// Route prefix the API serves fallback files from.
    pub const FALLBACK_ROUTE: &'static str = "/api/files";

    /// Create a new storage config with the provider's native URLs.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            public_base_url: None,
        }
    }

    /// Config for the development fallback: a local directory whose files
    /// are addressed through the API's file route.
    #[must_use]
    pub fn local_fallback(root: impl Into<std::path::PathBuf>) -> Self {
        Self::new(StorageProvider::local_fs(root)).with_public_base_url(Self::FALLBACK_ROUTE)
    }

    /// Set the public base URL.
    #[must_use]
    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = Some(url.into());
        self
    }

    /// Base URL objects are addressed under, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        if let Some(base) = &self.public_base_url {
            return base.trim_end_matches('/').to_string();
        }

        match &self.provider {
            StorageProvider::S3 {
                endpoint, bucket, ..
            } => format!("{}/{bucket}", endpoint.trim_end_matches('/')),
            StorageProvider::AzureBlob {
                account, container, ..
            } => format!("https://{account}.blob.core.windows.net/{container}"),
            StorageProvider::LocalFs { root } => format!("file://{}", root.display()),
        }
    }
}
