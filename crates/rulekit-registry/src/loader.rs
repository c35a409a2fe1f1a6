//! # Fail-Open Registry Loading
//!
//! The registry is optional context for several validation paths, so
//! loading never fails hard: a missing file, a JSON decode error, or any
//! other I/O problem produces an empty document and a logged warning.
//!
//! Callers that need to distinguish "empty because absent" from "empty
//! because malformed" inspect the [`LoadOutcome`] variant instead of
//! re-parsing the file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

/// Outcome of a registry load attempt.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The document parsed. The value is whatever JSON was on disk; shape
    /// checks belong to the validators, not the loader.
    Loaded(Value),
    /// No file at the given path.
    Missing {
        /// The path that was probed.
        path: PathBuf,
    },
    /// The file exists but could not be read or decoded.
    Malformed {
        /// The path that was read.
        path: PathBuf,
        /// Decode or I/O failure description.
        reason: String,
    },
}

impl LoadOutcome {
    /// Whether the document actually loaded.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// The loaded document, or an empty object for the failure arms.
    ///
    /// This is the fail-open contract: downstream validators receive an
    /// empty mapping and treat it as "nothing to cross-check against".
    pub fn document(&self) -> Value {
        match self {
            Self::Loaded(value) => value.clone(),
            Self::Missing { .. } | Self::Malformed { .. } => Value::Object(Map::new()),
        }
    }

    /// Human-readable description of the failure, if any.
    pub fn failure(&self) -> Option<String> {
        match self {
            Self::Loaded(_) => None,
            Self::Missing { path } => Some(format!("registry not found: {}", path.display())),
            Self::Malformed { path, reason } => {
                Some(format!("could not load registry {}: {reason}", path.display()))
            }
        }
    }
}

/// Load and decode a registry document. Never returns an error.
pub fn load(path: &Path) -> LoadOutcome {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "registry not found");
            return LoadOutcome::Missing {
                path: path.to_path_buf(),
            };
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read registry");
            return LoadOutcome::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            };
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => LoadOutcome::Loaded(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid JSON in registry");
            LoadOutcome::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    }
}
