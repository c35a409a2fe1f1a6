//! # Role Library Pipeline Tests
//!
//! Drives `validate_role_library` end-to-end over files on disk,
//! including the tool-registry cross-reference, the way the CLI does.

use serde_json::json;

use rulekit_roles::validate_role_library;

fn write(dir: &std::path::Path, name: &str, doc: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(doc).unwrap()).unwrap();
    path
}

fn good_library() -> serde_json::Value {
    json!({
        "executive": {
            "cfo": {
                "identity": { "scope": "Global", "seniority": "C-level", "span_of_control": "150" },
                "objectives": { "top_objectives": ["capital efficiency"], "kpis": ["ARR", "burn"] },
                "influence": { "decision_rights": ["budget approval"], "stakeholders": ["CEO", "board"] },
                "behaviors": { "trusted_tools": ["Sheets"], "tool_domains": ["backend"] },
                "motivations": { "drivers": ["predictability"], "pain_points": ["surprises"] }
            }
        },
        "specialist": {
            "backend_dev": {
                "identity": { "scope": "service team", "seniority": "senior", "span_of_control": "0" },
                "objectives": { "top_objectives": ["reliable APIs"], "kpis": ["error budget"] },
                "behaviors": { "tool_domains": ["backend"], "trusted_tools": ["curl"] },
                "gates": ["code review"]
            }
        }
    })
}

#[test]
fn complete_library_with_registry_passes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "role_library.json", &good_library());
    let registry = json!({ "domain_mappings": { "backend": ["lint"] } });

    let result = validate_role_library(&path, &registry);
    assert!(result.report.is_valid, "errors: {:?}", result.report.errors);
    // Every registry domain is referenced, so no unused-domain warning.
    assert!(result.report.warnings.is_empty(), "warnings: {:?}", result.report.warnings);
}

#[test]
fn unknown_tool_domain_fails_with_attributable_message() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = good_library();
    library["specialist"]["backend_dev"]["behaviors"]["tool_domains"] = json!(["warehouse"]);
    let path = write(dir.path(), "role_library.json", &library);
    let registry = json!({ "domain_mappings": { "backend": [] } });

    let result = validate_role_library(&path, &registry);
    assert!(!result.report.is_valid);
    assert!(result
        .report
        .errors
        .iter()
        .any(|e| e.contains("'backend_dev'") && e.contains("'warehouse'")));
}

#[test]
fn empty_registry_skips_cross_reference_but_validates_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = good_library();
    // A domain no registry knows about; with an empty registry this must
    // not be flagged.
    library["specialist"]["backend_dev"]["behaviors"]["tool_domains"] = json!(["anything"]);
    let path = write(dir.path(), "role_library.json", &library);

    let result = validate_role_library(&path, &json!({}));
    assert!(result.report.is_valid, "errors: {:?}", result.report.errors);
}

#[test]
fn duplicate_names_surface_after_structure_and_fields_pass() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = good_library();
    let cfo = library["executive"]["cfo"].clone();
    let mut specialist_cfo = cfo.as_object().unwrap().clone();
    specialist_cfo.insert("standards".to_string(), json!(["gaap"]));
    library["specialist"]["cfo"] = serde_json::Value::Object(specialist_cfo);
    let path = write(dir.path(), "role_library.json", &library);

    let result = validate_role_library(&path, &json!({}));
    assert!(!result.report.is_valid);
    assert!(result
        .report
        .errors
        .iter()
        .any(|e| e.contains("Duplicate role names") && e.contains("cfo")));
}

#[test]
fn two_runs_over_the_same_file_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "role_library.json", &good_library());
    let registry = json!({ "domain_mappings": { "backend": [], "unused": [] } });

    let first = validate_role_library(&path, &registry);
    let second = validate_role_library(&path, &registry);
    assert_eq!(first.report.is_valid, second.report.is_valid);
    assert_eq!(first.report.errors, second.report.errors);
    assert_eq!(first.report.warnings, second.report.warnings);
}
