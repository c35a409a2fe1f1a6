//! # Rule-System Primitives — Single Source of Truth
//!
//! [`RoleKind`] and [`DomainStatus`] are the one definition of the
//! role-type and metadata-status vocabularies used across the stack.
//! Every `match` on them is exhaustive; adding a variant forces every
//! consumer to handle it at compile time, rather than letting a new
//! string value fall through a hand-maintained set in one script copy
//! but not another.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two role types a role library may define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    /// Executive persona: full five-bucket record.
    Executive,
    /// Specialist persona: identity + objectives, plus standards or behaviors.
    Specialist,
}

impl RoleKind {
    /// All role kinds in canonical order.
    pub fn all() -> &'static [RoleKind] {
        &[Self::Executive, Self::Specialist]
    }

    /// The canonical key used in `role_library.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Executive => "executive",
            Self::Specialist => "specialist",
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a member of a closed vocabulary.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown {vocabulary} value: {value:?}")]
pub struct UnknownValue {
    /// The vocabulary name ("role kind", "domain status").
    pub vocabulary: &'static str,
    /// The offending input.
    pub value: String,
}

impl FromStr for RoleKind {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "executive" => Ok(Self::Executive),
            "specialist" => Ok(Self::Specialist),
            other => Err(UnknownValue {
                vocabulary: "role kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Lifecycle status of a domain in `domain_metadata`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    /// Domain is live and maintained.
    Active,
    /// Domain is under evaluation.
    Beta,
    /// Domain is retained for history but should not gain new rules.
    Deprecated,
}

impl DomainStatus {
    /// All statuses in canonical order.
    pub fn all() -> &'static [DomainStatus] {
        &[Self::Active, Self::Beta, Self::Deprecated]
    }

    /// The canonical string used in registry documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Beta => "beta",
            Self::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DomainStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "beta" => Ok(Self::Beta),
            "deprecated" => Ok(Self::Deprecated),
            other => Err(UnknownValue {
                vocabulary: "domain status",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_kind_round_trips_through_str() {
        for kind in RoleKind::all() {
            assert_eq!(kind.as_str().parse::<RoleKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn role_kind_rejects_unknown() {
        let err = "manager".parse::<RoleKind>().unwrap_err();
        assert_eq!(err.value, "manager");
    }

    #[test]
    fn domain_status_round_trips_through_str() {
        for status in DomainStatus::all() {
            assert_eq!(status.as_str().parse::<DomainStatus>().unwrap(), *status);
        }
    }

    #[test]
    fn domain_status_rejects_unknown() {
        assert!("retired".parse::<DomainStatus>().is_err());
    }

    #[test]
    fn serde_uses_snake_case_strings() {
        let json = serde_json::to_string(&DomainStatus::Deprecated).unwrap();
        assert_eq!(json, "\"deprecated\"");
        let kind: RoleKind = serde_json::from_str("\"executive\"").unwrap();
        assert_eq!(kind, RoleKind::Executive);
    }
}
