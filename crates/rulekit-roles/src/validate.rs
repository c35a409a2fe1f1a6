//! # Role Library Validation Passes
//!
//! The four validation passes and the file-level entry point. Passes are
//! pure functions over the parsed document; each accumulates every
//! violation it can see. The entry point runs them in sequence, each
//! gated on the previous pass succeeding, so field-level checks never run
//! against a document whose basic shape is already broken.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde_json::{Map, Value};

use rulekit_core::{RoleKind, ValidationReport};

use crate::taxonomy::{
    required_buckets, REQUIRED_IDENTITY_FIELDS, REQUIRED_OBJECTIVES_FIELDS,
};

/// Result of validating a role library file.
#[derive(Debug)]
pub struct LibraryValidation {
    /// Merged report across all passes that ran.
    pub report: ValidationReport,
    /// The parsed document, or an empty object when loading failed.
    pub document: Value,
}

/// Iterate the `(kind, role_name, role_record)` triples of a library
/// document, skipping anything whose shape the structure pass flags.
fn roles_of(doc: &Value) -> impl Iterator<Item = (RoleKind, &String, &Value)> {
    RoleKind::all().iter().flat_map(move |kind| {
        doc.get(kind.as_str())
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(move |roles| roles.iter().map(move |(name, record)| (*kind, name, record)))
    })
}

/// Pass 1 — structure: role-type keys and per-role bucket presence.
pub fn validate_structure(doc: &Value) -> ValidationReport {
    let mut report = ValidationReport::ok();

    let root = match doc.as_object() {
        Some(root) => root,
        None => {
            report.add_error("Role library must be an object");
            return report;
        }
    };

    let valid_types: BTreeSet<&str> = RoleKind::all().iter().map(|k| k.as_str()).collect();
    let found_types: BTreeSet<&str> = root
        .keys()
        .map(String::as_str)
        .filter(|k| valid_types.contains(k))
        .collect();
    if found_types.is_empty() {
        report.add_error("No valid role types found. Expected one of: executive, specialist");
    }

    let unknown: Vec<&str> = root
        .keys()
        .map(String::as_str)
        .filter(|k| !valid_types.contains(k))
        .collect();
    if !unknown.is_empty() {
        report.add_error(format!("Unknown role types found: {}", unknown.join(", ")));
    }

    for kind in RoleKind::all() {
        let Some(roles) = root.get(kind.as_str()) else {
            continue;
        };
        let roles = match roles.as_object() {
            Some(roles) => roles,
            None => {
                report.add_error(format!(
                    "Role type '{kind}' must contain an object of roles"
                ));
                continue;
            }
        };

        for (name, record) in roles {
            let record = match record.as_object() {
                Some(record) => record,
                None => {
                    report.add_error(format!("Role '{name}' in '{kind}' must be an object"));
                    continue;
                }
            };

            let missing: Vec<&str> = required_buckets(*kind)
                .iter()
                .filter(|b| !record.contains_key(**b))
                .copied()
                .collect();
            if !missing.is_empty() {
                let mut sorted = missing;
                sorted.sort_unstable();
                let label = match kind {
                    RoleKind::Executive => "Executive",
                    RoleKind::Specialist => "Specialist",
                };
                report.add_error(format!(
                    "{label} role '{name}' missing required buckets: {}",
                    sorted.join(", ")
                ));
            }

            if *kind == RoleKind::Specialist
                && !record.contains_key("standards")
                && !record.contains_key("behaviors")
            {
                report.add_error(format!(
                    "Specialist role '{name}' missing both 'standards' and 'behaviors' buckets"
                ));
            }
        }
    }

    report
}

fn check_string_list(report: &mut ValidationReport, role: &str, field: &str, value: &Value) {
    match value.as_array() {
        None => report.add_error(format!("Role '{role}' {field} must be a list")),
        Some(items) => {
            if !items.iter().all(Value::is_string) {
                report.add_error(format!("Role '{role}' {field} must contain only strings"));
            }
        }
    }
}

/// Pass 2 — fields: shapes inside the buckets each role carries.
pub fn validate_fields(doc: &Value) -> ValidationReport {
    let mut report = ValidationReport::ok();

    for (_, name, record) in roles_of(doc) {
        let Some(record) = record.as_object() else {
            continue; // flagged by the structure pass
        };

        if let Some(identity) = record.get("identity") {
            match identity.as_object() {
                None => report.add_error(format!("Role '{name}' identity must be an object")),
                Some(identity) => {
                    let missing: Vec<&str> = REQUIRED_IDENTITY_FIELDS
                        .iter()
                        .filter(|f| !identity.contains_key(**f))
                        .copied()
                        .collect();
                    if !missing.is_empty() {
                        report.add_error(format!(
                            "Role '{name}' identity missing fields: {}",
                            missing.join(", ")
                        ));
                    }
                }
            }
        }

        if let Some(objectives) = record.get("objectives") {
            match objectives.as_object() {
                None => report.add_error(format!("Role '{name}' objectives must be an object")),
                Some(objectives) => {
                    let missing: Vec<&str> = REQUIRED_OBJECTIVES_FIELDS
                        .iter()
                        .filter(|f| !objectives.contains_key(**f))
                        .copied()
                        .collect();
                    if !missing.is_empty() {
                        report.add_error(format!(
                            "Role '{name}' objectives missing fields: {}",
                            missing.join(", ")
                        ));
                    }
                    for field in REQUIRED_OBJECTIVES_FIELDS {
                        if let Some(value) = objectives.get(*field) {
                            if !value.is_array() {
                                report.add_error(format!(
                                    "Role '{name}' objectives.{field} must be a list"
                                ));
                            }
                        }
                    }
                }
            }
        }

        if let Some(behaviors) = record.get("behaviors") {
            match behaviors.as_object() {
                None => report.add_error(format!("Role '{name}' behaviors must be an object")),
                Some(behaviors) => {
                    for field in ["tool_domains", "trusted_tools"] {
                        if let Some(value) = behaviors.get(field) {
                            check_string_list(
                                &mut report,
                                name,
                                &format!("behaviors.{field}"),
                                value,
                            );
                        }
                    }
                }
            }
        }

        for field in ["standards", "gates"] {
            if let Some(value) = record.get(field) {
                check_string_list(&mut report, name, field, value);
            }
        }
    }

    report
}

/// Pass 3 — tool-registry cross-reference.
///
/// Skipped entirely (valid, no findings) when the registry document is
/// empty: an absent registry means there is nothing to cross-check
/// against, not a failure.
pub fn validate_registry_refs(doc: &Value, registry: &Value) -> ValidationReport {
    let mut report = ValidationReport::ok();

    if registry.as_object().map_or(true, Map::is_empty) {
        tracing::warn!("skipping tool registry validation - registry not available");
        return report;
    }

    let available: BTreeSet<&str> = registry
        .get("domain_mappings")
        .and_then(Value::as_object)
        .map(|m| m.keys().map(String::as_str).collect())
        .unwrap_or_default();

    let mut used: BTreeSet<&str> = BTreeSet::new();
    for (_, name, record) in roles_of(doc) {
        let domains = record
            .get("behaviors")
            .and_then(|b| b.get("tool_domains"))
            .and_then(Value::as_array);
        let Some(domains) = domains else {
            continue;
        };
        for domain in domains.iter().filter_map(Value::as_str) {
            used.insert(domain);
            if !available.contains(domain) {
                report.add_error(format!(
                    "Role '{name}' references unknown tool domain: '{domain}'"
                ));
            }
        }
    }

    let unused: Vec<&str> = available.difference(&used).copied().collect();
    if !unused.is_empty() {
        report.add_warning(format!("Unused tool domains: {}", unused.join(", ")));
    }

    report
}

/// Pass 4 — consistency: duplicate names across role types (error),
/// naming conventions and length (warnings).
pub fn validate_consistency(doc: &Value) -> ValidationReport {
    let mut report = ValidationReport::ok();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for (_, name, _) in roles_of(doc) {
        *counts.entry(name.as_str()).or_insert(0) += 1;
    }
    let duplicates: Vec<&str> = counts
        .iter()
        .filter(|(_, n)| **n > 1)
        .map(|(name, _)| *name)
        .collect();
    if !duplicates.is_empty() {
        report.add_error(format!(
            "Duplicate role names found across types: {}",
            duplicates.join(", ")
        ));
    }

    for (_, name, _) in roles_of(doc) {
        if !is_snake_case(name) {
            report.add_warning(format!(
                "Role name '{name}' should use snake_case convention"
            ));
        }
        if name.len() > 50 {
            report.add_warning(format!(
                "Role name '{name}' is unusually long ({} characters)",
                name.len()
            ));
        }
    }

    report
}

/// Lowercase-with-separators check: after stripping `_` and `-`, the name
/// must contain at least one lowercase letter and no uppercase ones.
fn is_snake_case(name: &str) -> bool {
    let stripped: String = name.chars().filter(|c| *c != '_' && *c != '-').collect();
    !stripped.is_empty()
        && stripped.chars().any(|c| c.is_lowercase())
        && !stripped.chars().any(|c| c.is_uppercase())
}

/// Validate a role library file against an already-loaded tool registry
/// document.
///
/// Fails open: JSON decode or I/O errors produce a single-error report
/// and an empty document, without running any pass.
pub fn validate_role_library(path: &Path, registry: &Value) -> LibraryValidation {
    let empty = || Value::Object(Map::new());

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "error reading role library");
            return LibraryValidation {
                report: ValidationReport::fail(vec![format!(
                    "Error reading {}: {e}",
                    path.display()
                )]),
                document: empty(),
            };
        }
    };

    let document: Value = match serde_json::from_str(&raw) {
        Ok(document) => document,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "invalid JSON in role library");
            return LibraryValidation {
                report: ValidationReport::fail(vec![format!(
                    "Invalid JSON in {}: {e}",
                    path.display()
                )]),
                document: empty(),
            };
        }
    };

    let mut report = validate_structure(&document);
    if report.is_valid {
        report.merge(validate_fields(&document));
    }
    if report.is_valid {
        report.merge(validate_registry_refs(&document, registry));
    }
    if report.is_valid {
        report.merge(validate_consistency(&document));
    }

    LibraryValidation { report, document }
}
