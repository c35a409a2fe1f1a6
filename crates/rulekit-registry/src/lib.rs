//! # rulekit-registry — Tool Registry Validation
//!
//! Validates `tool_registry.json`: the document mapping tool categories to
//! domains, plus per-domain metadata.
//!
//! ## Validation Layers
//!
//! 1. **Structural validation** ([`structure`]): required top-level keys,
//!    per-category shape, mapping lists.
//! 2. **Referential integrity** ([`integrity`]): every category referenced
//!    by `domain_mappings` exists in `tool_categories`; unused categories
//!    are warnings.
//! 3. **Metadata schema** ([`metadata`]): status vocabulary, review-date
//!    format, template type, required-section lists.
//! 4. **Domain consistency** ([`consistency`]): filesystem domain
//!    directories vs the two registry key-sets, with a technical-domain
//!    allow-list, plus registry-driven required-section checks over domain
//!    `.mdc` files.
//!
//! Loading is fail-open ([`loader`]): a missing or malformed registry
//! yields an empty document, never an error; downstream validators treat
//! an empty registry as "nothing to cross-check against".

pub mod consistency;
pub mod integrity;
pub mod loader;
pub mod metadata;
pub mod structure;
pub mod summary;

// Re-export primary entry points for ergonomic imports.
pub use consistency::{filesystem_domains, registry_domain_sets, validate_consistency};
pub use integrity::validate_integrity;
pub use loader::{load, LoadOutcome};
pub use metadata::validate_metadata;
pub use structure::validate_structure;
pub use summary::RegistrySummary;
