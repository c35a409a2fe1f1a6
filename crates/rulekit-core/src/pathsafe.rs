//! # Path Sanitization Gate
//!
//! Every file path supplied on the command line passes through
//! [`sanitize`] before any I/O. The gate rejects inputs containing
//! shell-metacharacter patterns, then canonicalizes and requires that the
//! target exists.
//!
//! The deny-list is a substring match on the *raw* input, before any
//! resolution. `../` is rejected even when the resolved path would stay
//! inside the working tree.

use std::path::PathBuf;

use crate::error::PathError;

/// Substring patterns that cause immediate rejection of a raw path.
pub const DENY_PATTERNS: &[&str] = &["../", "~/", "$", "`", ";", "|", "&"];

/// Sanitize and validate a raw file path string.
///
/// Returns the canonicalized path on success.
///
/// # Errors
///
/// - [`PathError::Rejected`] when the input contains a deny-list pattern.
/// - [`PathError::NotFound`] when the target does not exist.
/// - [`PathError::Invalid`] for OS-level resolution failures.
pub fn sanitize(raw: &str) -> Result<PathBuf, PathError> {
    for pattern in DENY_PATTERNS {
        if raw.contains(pattern) {
            return Err(PathError::Rejected {
                input: raw.to_string(),
                pattern,
            });
        }
    }

    let candidate = PathBuf::from(raw);
    if !candidate.exists() {
        return Err(PathError::NotFound {
            input: raw.to_string(),
        });
    }

    candidate.canonicalize().map_err(|source| PathError::Invalid {
        input: raw.to_string(),
        source,
    })
}
