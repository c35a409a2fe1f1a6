//! # Registry Structure Validation
//!
//! Shape checks for the tool registry document. Every violation is
//! accumulated; nothing short-circuits, so one run surfaces all schema
//! problems at once.

use serde_json::Value;

use rulekit_core::ValidationReport;

/// Top-level keys every registry document must carry.
pub const REQUIRED_KEYS: &[&str] = &["tool_categories", "domain_mappings", "domain_metadata"];

/// Validate the basic JSON structure of the tool registry.
///
/// Checks, in order:
/// 1. Root is an object.
/// 2. Required top-level keys are present (one error per missing key).
/// 3. `tool_categories` is an object; each category is an object carrying
///    `description` and `tools`, with `tools` a list.
/// 4. `domain_mappings` is an object; each value is a list whose elements
///    are strings (non-string elements are flagged individually).
pub fn validate_structure(doc: &Value) -> ValidationReport {
    let mut report = ValidationReport::ok();

    let root = match doc.as_object() {
        Some(root) => root,
        None => {
            report.add_error("Tool registry must be an object");
            return report;
        }
    };

    for key in REQUIRED_KEYS {
        if !root.contains_key(*key) {
            report.add_error(format!("Missing required top-level key: '{key}'"));
        }
    }

    if let Some(categories) = root.get("tool_categories") {
        match categories.as_object() {
            None => report.add_error("'tool_categories' must be an object"),
            Some(categories) => {
                for (name, category) in categories {
                    let category = match category.as_object() {
                        Some(c) => c,
                        None => {
                            report.add_error(format!("Category '{name}' must be an object"));
                            continue;
                        }
                    };
                    if !category.contains_key("description") {
                        report.add_error(format!("Category '{name}' missing 'description' field"));
                    }
                    match category.get("tools") {
                        None => {
                            report.add_error(format!("Category '{name}' missing 'tools' field"));
                        }
                        Some(tools) if !tools.is_array() => {
                            report.add_error(format!("Category '{name}' 'tools' must be a list"));
                        }
                        Some(_) => {}
                    }
                }
            }
        }
    }

    if let Some(mappings) = root.get("domain_mappings") {
        match mappings.as_object() {
            None => report.add_error("'domain_mappings' must be an object"),
            Some(mappings) => {
                for (domain, categories) in mappings {
                    match categories.as_array() {
                        None => report.add_error(format!(
                            "Domain '{domain}' mapping must be a list of strings"
                        )),
                        Some(categories) => {
                            for (i, category) in categories.iter().enumerate() {
                                if !category.is_string() {
                                    report.add_error(format!(
                                        "Domain '{domain}' mapping element {i} is not a string"
                                    ));
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    report
}
