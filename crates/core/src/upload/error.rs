//! Upload error types.

use bestpapers_shared::AppError;
use thiserror::Error;

/// Upload operation errors.
///
/// Validation variants display the exact message returned to the client.
#[derive(Debug, Error)]
pub enum UploadError {
    /// No file in the request.
    #[error("No file provided")]
    MissingFile,

    /// Extension not on the allow-list.
    #[error("Invalid file type. Only {allowed} files are allowed.")]
    InvalidFileType {
        /// Human-readable list of accepted types, e.g. "PDF, DOC, and DOCX".
        allowed: String,
    },

    /// File exceeds the size limit.
    #[error("File too large. Maximum size is {}.", format_size(*.max))]
    FileTooLarge {
        /// Maximum allowed size in bytes.
        max: u64,
    },

    /// Neither storage path could persist the file.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl UploadError {
    /// Whether the client caused this error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::StorageUnavailable(_))
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::StorageUnavailable(detail) => Self::Storage(detail),
            other => Self::Validation(other.to_string()),
        }
    }
}

const MIB: u64 = 1024 * 1024;

/// "25MB" for whole mebibytes, bytes otherwise.
fn format_size(bytes: u64) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(UploadError::MissingFile.to_string(), "No file provided");
        assert_eq!(
            UploadError::InvalidFileType {
                allowed: "PDF, DOC, and DOCX".into()
            }
            .to_string(),
            "Invalid file type. Only PDF, DOC, and DOCX files are allowed."
        );
        assert_eq!(
            UploadError::FileTooLarge {
                max: 25 * 1024 * 1024
            }
            .to_string(),
            "File too large. Maximum size is 25MB."
        );
        assert_eq!(
            UploadError::FileTooLarge { max: 1000 }.to_string(),
            "File too large. Maximum size is 1000 bytes."
        );
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = UploadError::MissingFile.into();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.public_message(), "No file provided");

        let app: AppError = UploadError::FileTooLarge { max: 1024 * 1024 }.into();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.public_message(), "File too large. Maximum size is 1MB.");

        let app: AppError = UploadError::StorageUnavailable("disk full".into()).into();
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.public_message(), "Upload failed. Please try again.");
        assert!(app.to_string().contains("disk full"));
    }

    #[test]
    fn test_is_validation() {
        assert!(UploadError::MissingFile.is_validation());
        assert!(UploadError::FileTooLarge { max: 1 }.is_validation());
        assert!(!UploadError::StorageUnavailable(String::new()).is_validation());
    }
}
