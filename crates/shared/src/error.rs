//! Application-wide error types.

use thiserror::Error;

/// Message shown to clients for every server-side failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "Upload failed. Please try again.";

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error. The message is shown to the client as-is.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to return to the client.
    ///
    /// Client errors carry their message verbatim; server errors collapse to
    /// [`GENERIC_FAILURE_MESSAGE`] so no backend detail leaks.
    #[must_use]
    pub fn public_message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::NotFound(msg) => msg,
            Self::Storage(_) | Self::Internal(_) => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// Whether this error is the server's fault.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Validation(String::new()), 400, "VALIDATION_ERROR")]
    #[case(AppError::NotFound(String::new()), 404, "NOT_FOUND")]
    #[case(AppError::Storage(String::new()), 500, "STORAGE_ERROR")]
    #[case(AppError::Internal(String::new()), 500, "INTERNAL_ERROR")]
    fn test_status_and_error_codes(
        #[case] err: AppError,
        #[case] status: u16,
        #[case] code: &str,
    ) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_public_message_passes_client_errors_through() {
        let err = AppError::Validation("No file provided".into());
        assert_eq!(err.public_message(), "No file provided");
        assert!(!err.is_server_error());

        let err = AppError::NotFound("File not found".into());
        assert_eq!(err.public_message(), "File not found");
    }

    #[test]
    fn test_public_message_hides_server_detail() {
        let err = AppError::Storage("s3 PutObject: AccessDenied".into());
        assert_eq!(err.public_message(), GENERIC_FAILURE_MESSAGE);
        assert!(err.is_server_error());

        let err = AppError::Internal("panic in handler".into());
        assert_eq!(err.public_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::NotFound("msg".into()).to_string(),
            "Not found: msg"
        );
        assert_eq!(
            AppError::Storage("msg".into()).to_string(),
            "Storage error: msg"
        );
        assert_eq!(
            AppError::Internal("msg".into()).to_string(),
            "Internal error: msg"
        );
    }
}
