//! # rulekit-core — Foundational Types for rulekit
//!
//! This crate is the bedrock of the rulekit workspace. Every other crate
//! depends on `rulekit-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One report type.** Every validator in the workspace returns a
//!    [`ValidationReport`], an accumulated list of errors and warnings.
//!    Errors decide validity and exit codes; warnings are surfaced but
//!    never counted. No validator short-circuits on the first finding.
//!
//! 2. **Closed enums for closed vocabularies.** [`RoleKind`] and
//!    [`DomainStatus`] are the single definitions of the role-type and
//!    metadata-status strings. Exhaustive `match` everywhere; adding a
//!    variant forces every consumer to handle it.
//!
//! 3. **Explicit configuration.** [`RulekitConfig`] is a plain value
//!    constructed once by the CLI entry point and passed down. No global
//!    singletons, no lazily-initialized statics.
//!
//! 4. **Typed path rejection.** All file paths supplied by a user pass
//!    through [`pathsafe::sanitize`] before any I/O. Rejection is a typed
//!    error carrying the offending input.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rulekit-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod kind;
pub mod pathsafe;
pub mod report;

// Re-export primary types for ergonomic imports.
pub use config::RulekitConfig;
pub use error::{PathError, RulekitError};
pub use kind::{DomainStatus, RoleKind};
pub use pathsafe::sanitize;
pub use report::ValidationReport;
