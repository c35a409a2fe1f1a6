//! # rulekit-mdc — `.mdc` Rule File Engine
//!
//! Two halves of the same coin:
//!
//! - [`lint`] checks an existing `.mdc` file against the structural rules:
//!   line-count ceiling, YAML front-matter, the agent-request marker,
//!   role-type-appropriate section headers, and unresolved single-brace
//!   template placeholders.
//! - [`template`] produces new `.mdc` files from the executive, specialist,
//!   and domain-rule scaffolds, merging library records with overrides.
//!
//! The section-header lists live in [`lint`] and the templates in
//! [`template`] reference the same headers, so a freshly rendered file
//! always lints clean apart from its intentional `{{…}}` fill slots.

pub mod lint;
pub mod template;

pub use lint::{check_file, classify, FileCheck, LintOptions};
pub use template::{
    render_domain_rule, render_executive, render_specialist, sanitize_component_name,
};
