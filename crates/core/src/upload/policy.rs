//! File validation policy.

use bestpapers_shared::config::UploadConfig;

use super::error::UploadError;

/// Extension allow-list and size limit for paper files.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_file_size: u64,
    allowed_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_FILE_SIZE,
            Self::DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
        )
    }
}

impl UploadPolicy {
    /// Default max file size: 25MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 25 * 1024 * 1024;
    /// Default accepted extensions.
    pub const DEFAULT_EXTENSIONS: &'static [&'static str] = &["pdf", "doc", "docx"];

    /// Create a policy. Extensions are matched case-insensitively and may be
    /// given with or without a leading dot.
    #[must_use]
    pub fn new(max_file_size: u64, allowed_extensions: Vec<String>) -> Self {
        let allowed_extensions = allowed_extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self {
            max_file_size,
            allowed_extensions,
        }
    }

    /// Build the policy from configuration.
    #[must_use]
    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(config.max_file_size, config.allowed_extensions.clone())
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Maximum accepted size in bytes.
    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Check presence and extension of a file name.
    ///
    /// This needs only the name, so callers can reject a file before reading
    /// its contents.
    pub fn validate_name(&self, filename: Option<&str>) -> Result<(), UploadError> {
        let filename = filename.ok_or(UploadError::MissingFile)?;

        let allowed = file_extension(filename).is_some_and(|ext| {
            self.allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        });

        if allowed {
            Ok(())
        } else {
            Err(UploadError::InvalidFileType {
                allowed: self.describe_extensions(),
            })
        }
    }

    /// Check a size against the limit. The limit itself is accepted.
    pub fn validate_size(&self, size: u64) -> Result<(), UploadError> {
        if size > self.max_file_size {
            return Err(UploadError::FileTooLarge {
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Validate an incoming file: presence, then extension, then size.
    pub fn validate(&self, filename: Option<&str>, size: u64) -> Result<(), UploadError> {
        self.validate_name(filename)?;
        self.validate_size(size)
    }

    /// "PDF, DOC, and DOCX"
    fn describe_extensions(&self) -> String {
        let upper: Vec<String> = self
            .allowed_extensions
            .iter()
            .map(|ext| ext.to_ascii_uppercase())
            .collect();

        match upper.as_slice() {
            [] => "no".to_string(),
            [only] => only.clone(),
            [first, second] => format!("{first} and {second}"),
            [init @ .., last] => format!("{}, and {last}", init.join(", ")),
        }
    }
}

/// Final dot-segment of a file name, or `None` when there is no dot.
fn file_extension(filename: &str) -> Option<&str> {
    filename.rsplit_once('.').map(|(_, ext)| ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const MAX: u64 = 25 * 1024 * 1024;

    #[rstest]
    #[case("paper.pdf")]
    #[case("paper.PDF")]
    #[case("thesis.Doc")]
    #[case("notes.final.docx")]
    #[case("Research Notes (final).docx")]
    #[case(".pdf")]
    fn test_accepts_allowed_extensions(#[case] name: &str) {
        assert!(UploadPolicy::default().validate(Some(name), 1024).is_ok());
    }

    #[rstest]
    #[case("paper")]
    #[case("pdf")]
    #[case("paper.txt")]
    #[case("paper.pdf.exe")]
    #[case("paper.")]
    #[case("archive.docx.zip")]
    #[case("")]
    fn test_rejects_other_extensions(#[case] name: &str) {
        let err = UploadPolicy::default()
            .validate(Some(name), 1024)
            .unwrap_err();
        assert!(matches!(err, UploadError::InvalidFileType { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid file type. Only PDF, DOC, and DOCX files are allowed."
        );
    }

    #[test]
    fn test_missing_file() {
        let err = UploadPolicy::default().validate(None, 0).unwrap_err();
        assert!(matches!(err, UploadError::MissingFile));
    }

    #[test]
    fn test_size_limit_boundary() {
        let policy = UploadPolicy::default();
        assert_eq!(policy.max_file_size(), MAX);
        assert!(policy.validate(Some("paper.pdf"), MAX).is_ok());

        let err = policy.validate(Some("paper.pdf"), MAX + 1).unwrap_err();
        assert!(matches!(err, UploadError::FileTooLarge { max } if max == MAX));
    }

    #[test]
    fn test_extension_checked_before_size() {
        let err = UploadPolicy::default()
            .validate(Some("paper.txt"), MAX + 1)
            .unwrap_err();
        assert!(matches!(err, UploadError::InvalidFileType { .. }));
    }

    #[test]
    fn test_custom_extensions_are_normalized() {
        let policy = UploadPolicy::new(1024, vec![".PDF".into(), "odt".into(), String::new()]);
        assert!(policy.validate(Some("a.pdf"), 10).is_ok());
        assert!(policy.validate(Some("a.ODT"), 10).is_ok());

        let err = policy.validate(Some("a.doc"), 10).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid file type. Only PDF and ODT files are allowed."
        );
    }

    #[test]
    fn test_from_config() {
        let config = UploadConfig {
            max_file_size: 2048,
            allowed_extensions: vec!["pdf".into()],
        };
        let policy = UploadPolicy::from_config(&config);
        assert_eq!(policy.max_file_size(), 2048);
        assert!(policy.validate(Some("a.docx"), 10).is_err());
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("a.b.pdf"), Some("pdf"));
        assert_eq!(file_extension("a."), Some(""));
        assert_eq!(file_extension("noext"), None);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Property: any name whose final dot-segment is not pdf/doc/docx is
    // rejected as an invalid file type, whatever its size.
    proptest! {
        #[test]
        fn prop_unknown_extension_rejected(
            stem in "[a-zA-Z0-9 _-]{0,20}",
            ext in "[a-z]{1,5}",
            size in 0u64..100_000_000,
        ) {
            prop_assume!(!["pdf", "doc", "docx"].contains(&ext.as_str()));
            let name = format!("{stem}.{ext}");

            let result = UploadPolicy::default().validate(Some(&name), size);
            let is_invalid_type = matches!(result, Err(UploadError::InvalidFileType { .. }));
            prop_assert!(is_invalid_type, "Expected InvalidFileType for {}", name);
        }
    }

    // Property: an allowed file is rejected exactly when it exceeds the limit.
    proptest! {
        #[test]
        fn prop_size_limit(
            max_size in 1024u64..10_000_000,
            file_size in 0u64..20_000_000,
            ext in prop::sample::select(vec!["pdf", "PDF", "doc", "docx", "DocX"]),
        ) {
            let policy = UploadPolicy::default().with_max_file_size(max_size);
            let result = policy.validate(Some(&format!("paper.{ext}")), file_size);

            if file_size <= max_size {
                prop_assert!(result.is_ok(), "Expected Ok for valid file size");
            } else {
                let is_too_large = matches!(result, Err(UploadError::FileTooLarge { .. }));
                prop_assert!(is_too_large, "Expected FileTooLarge error");
            }
        }
    }
}
