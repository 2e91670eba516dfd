//! Filename sanitization and storage key generation.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use uuid::Uuid;

/// Sanitize a filename for use in storage keys and URLs.
///
/// Every character other than ASCII alphanumerics, `.` and `-` becomes `_`.
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Key for a file in the primary backend: `papers/{uuid}/{sanitized}`.
#[must_use]
pub fn primary_key(filename: &str) -> String {
    format!("papers/{}/{}", Uuid::new_v4(), sanitize_filename(filename))
}

/// Whether `name` may be looked up in the fallback directory.
///
/// Accepts only names a [`FallbackNamer`] could have produced: non-empty,
/// `[A-Za-z0-9._-]` only, and not starting with a dot.
#[must_use]
pub fn is_served_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

/// Content type for a stored paper, derived from its extension.
#[must_use]
pub fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}

/// Generates `{timestamp_ms}-{sanitized}` names for the local fallback.
///
/// Stamps from one namer are strictly increasing, so same-name uploads in
/// the same millisecond still get distinct names.
#[derive(Debug, Default)]
pub struct FallbackNamer {
    last_stamp: AtomicI64,
}

impl FallbackNamer {
    /// Create a namer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next fallback name for `original`, stamped with the current time.
    pub fn next_name(&self, original: &str) -> String {
        self.name_at(original, Utc::now().timestamp_millis())
    }

    fn name_at(&self, original: &str, now_ms: i64) -> String {
        format!("{}-{}", self.stamp_at(now_ms), sanitize_filename(original))
    }

    /// `now_ms`, or one past the last stamp handed out if that is later.
    fn stamp_at(&self, now_ms: i64) -> i64 {
        let previous = self
            .last_stamp
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now_ms.max(last + 1))
            });
        match previous {
            Ok(last) | Err(last) => now_ms.max(last + 1),
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Property: sanitized filenames only contain safe characters.
    proptest! {
        #[test]
        fn prop_sanitized_filename_safe_chars(filename in ".*") {
            let sanitized = sanitize_filename(&filename);

            for c in sanitized.chars() {
                let is_safe = c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_';
                prop_assert!(is_safe, "Unexpected character in sanitized filename: {}", c);
            }
        }
    }

    // Property: sanitization is idempotent and keeps one output char per input char.
    proptest! {
        #[test]
        fn prop_sanitize_idempotent(filename in ".*") {
            let once = sanitize_filename(&filename);
            prop_assert_eq!(sanitize_filename(&once), once.clone());
            prop_assert_eq!(once.chars().count(), filename.chars().count());
        }
    }

    // Property: every fallback name can be served back.
    proptest! {
        #[test]
        fn prop_fallback_names_are_served(filename in ".{0,40}") {
            let name = FallbackNamer::new().next_name(&filename);
            prop_assert!(is_served_name(&name));
        }
    }
}
