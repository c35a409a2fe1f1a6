//! # Domain Consistency
//!
//! Compares three views of the domain set — filesystem directories,
//! `domain_mappings` keys, and `domain_metadata` keys — and reports every
//! mismatch. Technical domains (registry-only, role-based) are exempt from
//! the filesystem-directory requirement.
//!
//! Also checks, registry-driven, that each domain's `.mdc` files carry the
//! sections its metadata declares as required.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use rulekit_core::ValidationReport;

fn h2_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^## (.+)$").unwrap())
}

/// Directory names under the domains dir that are not domains.
const NON_DOMAIN_DIRS: &[&str] = &["roles"];

/// Scan the domains directory for domain subdirectories.
///
/// A missing directory yields the empty set with a logged warning; the
/// consistency checks will then report every registry domain that needs a
/// directory.
pub fn filesystem_domains(domains_dir: &Path) -> BTreeSet<String> {
    let mut domains = BTreeSet::new();
    let entries = match std::fs::read_dir(domains_dir) {
        Ok(entries) => entries,
        Err(_) => {
            tracing::warn!(dir = %domains_dir.display(), "domains directory does not exist");
            return domains;
        }
    };

    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !NON_DOMAIN_DIRS.contains(&name.as_str()) {
            domains.insert(name);
        }
    }
    domains
}

/// Extract the `domain_mappings` and `domain_metadata` key-sets from a
/// registry document.
pub fn registry_domain_sets(doc: &Value) -> (BTreeSet<String>, BTreeSet<String>) {
    let keys = |field: &str| -> BTreeSet<String> {
        doc.get(field)
            .and_then(Value::as_object)
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    };
    (keys("domain_mappings"), keys("domain_metadata"))
}

/// Validate consistency between filesystem and registry domain sets.
///
/// All checks run independently; the result is valid only when every
/// check produced zero errors:
/// - filesystem domains missing from `domain_mappings` / `domain_metadata`
/// - non-technical registry domains with no filesystem directory
/// - symmetric difference between the two registry key-sets
pub fn validate_consistency(
    filesystem: &BTreeSet<String>,
    mappings: &BTreeSet<String>,
    metadata: &BTreeSet<String>,
    technical: &BTreeSet<String>,
) -> ValidationReport {
    let mut report = ValidationReport::ok();

    for domain in filesystem.difference(mappings) {
        report.add_error(format!(
            "Filesystem domain '{domain}' missing from domain_mappings"
        ));
    }

    for domain in filesystem.difference(metadata) {
        report.add_error(format!(
            "Filesystem domain '{domain}' missing from domain_metadata"
        ));
    }

    for domain in mappings.difference(filesystem) {
        if !technical.contains(domain) {
            report.add_error(format!(
                "Organizational domain '{domain}' in domain_mappings but has no filesystem directory"
            ));
        }
    }

    for domain in metadata.difference(filesystem) {
        if !technical.contains(domain) {
            report.add_error(format!(
                "Organizational domain '{domain}' in domain_metadata but has no filesystem directory"
            ));
        }
    }

    for domain in mappings.difference(metadata) {
        report.add_error(format!(
            "Domain '{domain}' in domain_mappings but not in domain_metadata"
        ));
    }

    for domain in metadata.difference(mappings) {
        report.add_error(format!(
            "Domain '{domain}' in domain_metadata but not in domain_mappings"
        ));
    }

    report
}

/// Validate that each domain's `.mdc` files contain the sections its
/// metadata declares in `required_sections`.
///
/// Domains without metadata or without declared sections are skipped;
/// the set-consistency checks own those mismatches.
pub fn validate_required_sections(
    filesystem: &BTreeSet<String>,
    doc: &Value,
    domains_dir: &Path,
) -> ValidationReport {
    let mut report = ValidationReport::ok();
    let Some(metadata) = doc.get("domain_metadata").and_then(Value::as_object) else {
        return report;
    };

    for domain in filesystem {
        let Some(required) = metadata
            .get(domain)
            .and_then(|m| m.get("required_sections"))
            .and_then(Value::as_array)
        else {
            continue;
        };
        let required: BTreeSet<&str> = required.iter().filter_map(Value::as_str).collect();
        if required.is_empty() {
            continue;
        }

        let mdc_files = list_mdc_files(&domains_dir.join(domain));
        if mdc_files.is_empty() {
            report.add_error(format!(
                "Domain '{domain}' has no .mdc files but has required_sections defined"
            ));
            continue;
        }

        for file in mdc_files {
            let content = match std::fs::read_to_string(&file) {
                Ok(content) => content,
                Err(e) => {
                    report.add_error(format!(
                        "Error reading domain file '{}': {e}",
                        file.display()
                    ));
                    continue;
                }
            };

            let found: BTreeSet<String> = h2_header()
                .captures_iter(&content)
                .map(|c| format!("## {}", &c[1]))
                .collect();
            let missing: Vec<&str> = required
                .iter()
                .filter(|s| !found.contains(**s))
                .copied()
                .collect();
            if !missing.is_empty() {
                let name = file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file.display().to_string());
                report.add_error(format!(
                    "Domain '{domain}' file '{name}' missing required sections: {}",
                    missing.join(", ")
                ));
            }
        }
    }

    report
}

fn list_mdc_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .into_iter()
        .flatten()
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "mdc"))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn matching_sets_pass() {
        let fs = set(&["backend", "frontend"]);
        let report = validate_consistency(&fs, &fs.clone(), &fs.clone(), &set(&[]));
        assert!(report.is_valid);
    }

    #[test]
    fn filesystem_domain_missing_from_both_registry_sets() {
        let report = validate_consistency(
            &set(&["backend"]),
            &set(&[]),
            &set(&[]),
            &set(&[]),
        );
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("domain_mappings"));
        assert!(report.errors[1].contains("domain_metadata"));
    }

    #[test]
    fn technical_domains_need_no_directory() {
        let technical = set(&["aws", "python"]);
        let report = validate_consistency(
            &set(&[]),
            &set(&["aws", "python"]),
            &set(&["aws", "python"]),
            &technical,
        );
        assert!(report.is_valid, "errors: {:?}", report.errors);
    }

    #[test]
    fn organizational_domain_without_directory_is_error() {
        let report = validate_consistency(
            &set(&[]),
            &set(&["martech"]),
            &set(&["martech"]),
            &set(&["aws"]),
        );
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("Organizational domain 'martech'"));
    }

    #[test]
    fn symmetric_difference_yields_one_error_per_domain_with_direction() {
        let fs = set(&["a", "b"]);
        let report = validate_consistency(
            &fs,
            &set(&["a", "b"]),
            &set(&["a"]),
            &set(&[]),
        );
        // "b" is in mappings but not metadata: one directed error, plus the
        // filesystem-vs-metadata miss for "b".
        let directed: Vec<_> = report
            .errors
            .iter()
            .filter(|e| e.contains("in domain_mappings but not in domain_metadata"))
            .collect();
        assert_eq!(directed.len(), 1);
        assert!(directed[0].contains("'b'"));
    }

    #[test]
    fn metadata_only_direction_is_reported() {
        let report = validate_consistency(
            &set(&["x"]),
            &set(&["x"]),
            &set(&["x", "y"]),
            &set(&["y"]),
        );
        let directed: Vec<_> = report
            .errors
            .iter()
            .filter(|e| e.contains("in domain_metadata but not in domain_mappings"))
            .collect();
        assert_eq!(directed.len(), 1);
        assert!(directed[0].contains("'y'"));
    }

    #[test]
    fn filesystem_scan_excludes_roles_and_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("backend")).unwrap();
        std::fs::create_dir(dir.path().join("roles")).unwrap();
        std::fs::write(dir.path().join("notes.md"), "x").unwrap();
        let domains = filesystem_domains(dir.path());
        assert_eq!(domains, set(&["backend"]));
    }

    #[test]
    fn missing_domains_dir_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let domains = filesystem_domains(&dir.path().join("nope"));
        assert!(domains.is_empty());
    }

    #[test]
    fn registry_domain_sets_tolerate_missing_keys() {
        let (mappings, metadata) = registry_domain_sets(&json!({}));
        assert!(mappings.is_empty());
        assert!(metadata.is_empty());
    }

    #[test]
    fn required_sections_flag_missing_headers() {
        let dir = tempfile::tempdir().unwrap();
        let backend = dir.path().join("backend");
        std::fs::create_dir(&backend).unwrap();
        std::fs::write(
            backend.join("api.mdc"),
            "---\n---\n## Core Principles\ntext\n",
        )
        .unwrap();

        let doc = json!({
            "domain_metadata": {
                "backend": {
                    "required_sections": ["## Core Principles", "## Best Practices"]
                }
            }
        });
        let report = validate_required_sections(&set(&["backend"]), &doc, dir.path());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("'api.mdc'"));
        assert!(report.errors[0].contains("## Best Practices"));
        assert!(!report.errors[0].contains("## Core Principles,"));
    }

    #[test]
    fn domain_with_sections_but_no_mdc_files_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        let doc = json!({
            "domain_metadata": { "docs": { "required_sections": ["## Standards"] } }
        });
        let report = validate_required_sections(&set(&["docs"]), &doc, dir.path());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("no .mdc files"));
    }

    #[test]
    fn domains_without_declared_sections_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("backend")).unwrap();
        let doc = json!({ "domain_metadata": { "backend": {} } });
        let report = validate_required_sections(&set(&["backend"]), &doc, dir.path());
        assert!(report.is_valid);
    }
}
