//! Upload request and result types.

use bytes::Bytes;
use serde::Serialize;

/// A single file submitted for upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Original filename as sent by the client.
    pub filename: String,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Bytes,
}

impl UploadRequest {
    /// Create a new upload request.
    #[must_use]
    pub fn new(filename: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            bytes,
        }
    }

    /// File size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Where an uploaded file ended up.
///
/// The shape is the same whichever storage path served the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    /// Public URL (primary) or `/api/files/{filename}` (fallback).
    pub url: String,
    /// Original name (primary) or the generated fallback name.
    pub filename: String,
    /// Original size in bytes.
    pub size: u64,
}
