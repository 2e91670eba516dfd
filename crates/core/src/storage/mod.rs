//! Storage backends for paper files using Apache OpenDAL.
//!
//! This module provides vendor-agnostic object storage with support for:
//! - S3-compatible: Cloudflare R2, Supabase Storage, AWS S3, DigitalOcean Spaces
//! - Azure Blob Storage
//! - Local filesystem (the development fallback)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     BlobStore (trait object)                     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ put("key", bytes) -> url   │ get("key") -> bytes                │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                 StorageService (Apache OpenDAL)                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod blob;
mod config;
mod error;
mod service;

pub use blob::{BlobStore, StoredObject};
pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::StorageService;
