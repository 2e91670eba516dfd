//! Paper upload path.
//!
//! This module provides:
//! - The file validator (extension allow-list, size limit)
//! - Filename sanitization and fallback name generation
//! - The storage adapter that picks primary or fallback storage

mod error;
mod naming;
mod policy;
mod service;
mod types;

pub use error::UploadError;
pub use naming::{
    FallbackNamer, content_type_for, is_served_name, primary_key, sanitize_filename,
};
pub use policy::UploadPolicy;
pub use service::{StorageBackends, UploadService};
pub use types::{UploadRequest, UploadResult};
