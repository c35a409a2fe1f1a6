//! # rulekit-roles — Role Library Validation
//!
//! Validates `role_library.json`: the document defining executive and
//! specialist role records ("buckets" of identity, objectives, influence,
//! behaviors, motivations, standards, gates).
//!
//! ## Validation Pipeline
//!
//! Four passes, each gated on the one before it:
//!
//! 1. **Structure** — role-type keys, per-role bucket presence.
//! 2. **Fields** — identity/objectives/behaviors field shapes.
//! 3. **Registry cross-reference** — `behaviors.tool_domains` entries must
//!    be `domain_mappings` keys of a separately loaded tool registry
//!    (skipped when the registry is empty).
//! 4. **Consistency** — duplicate names across role types (error), naming
//!    conventions (warnings).
//!
//! The entry point [`validate_role_library`] fails open on decode or I/O
//! errors: one error, an empty document, no passes run.

pub mod summary;
pub mod taxonomy;
pub mod validate;

pub use summary::LibrarySummary;
pub use taxonomy::{
    required_buckets, REQUIRED_EXECUTIVE_BUCKETS, REQUIRED_IDENTITY_FIELDS,
    REQUIRED_OBJECTIVES_FIELDS, REQUIRED_SPECIALIST_BUCKETS,
};
pub use validate::{validate_role_library, LibraryValidation};
