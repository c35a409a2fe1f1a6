//! # Role Bucket Taxonomy
//!
//! The required-bucket and required-field sets per role kind. One
//! definition, referenced by both the library validator and the template
//! renderer, so the two can never drift apart.

use rulekit_core::RoleKind;

/// Buckets every executive role must carry (the five-bucket standard).
pub const REQUIRED_EXECUTIVE_BUCKETS: &[&str] =
    &["identity", "objectives", "influence", "behaviors", "motivations"];

/// Buckets every specialist role must carry. Specialists additionally
/// need at least one of `standards` or `behaviors`.
pub const REQUIRED_SPECIALIST_BUCKETS: &[&str] = &["identity", "objectives"];

/// Fields required inside an `identity` bucket.
pub const REQUIRED_IDENTITY_FIELDS: &[&str] = &["scope", "seniority", "span_of_control"];

/// Fields required inside an `objectives` bucket. Both must be lists.
pub const REQUIRED_OBJECTIVES_FIELDS: &[&str] = &["top_objectives", "kpis"];

/// The required buckets for a role kind.
pub fn required_buckets(kind: RoleKind) -> &'static [&'static str] {
    match kind {
        RoleKind::Executive => REQUIRED_EXECUTIVE_BUCKETS,
        RoleKind::Specialist => REQUIRED_SPECIALIST_BUCKETS,
    }
}
