//! # Referential Integrity
//!
//! Cross-references between `domain_mappings` and `tool_categories`.
//! Dangling references are errors; categories defined but referenced by
//! no domain are warnings: a category may be intentionally defined ahead
//! of use.

use std::collections::BTreeSet;

use serde_json::Value;

use rulekit_core::ValidationReport;

/// Validate referential integrity between `domain_mappings` and
/// `tool_categories`.
///
/// Precondition: structural validation already passed. When the required
/// keys are absent the function returns a single explanatory error rather
/// than crashing.
pub fn validate_integrity(doc: &Value) -> ValidationReport {
    let (categories, mappings) = match (
        doc.get("tool_categories").and_then(Value::as_object),
        doc.get("domain_mappings").and_then(Value::as_object),
    ) {
        (Some(c), Some(m)) => (c, m),
        _ => {
            return ValidationReport::fail(vec![
                "Cannot validate referential integrity without required keys".to_string(),
            ]);
        }
    };

    let mut report = ValidationReport::ok();
    let available: BTreeSet<&str> = categories.keys().map(String::as_str).collect();
    let mut referenced: BTreeSet<&str> = BTreeSet::new();

    for (domain, category_list) in mappings {
        let Some(category_list) = category_list.as_array() else {
            continue; // flagged by structure validation
        };
        for category in category_list.iter().filter_map(Value::as_str) {
            referenced.insert(category);
            if !available.contains(category) {
                report.add_error(format!(
                    "Domain '{domain}' references non-existent category '{category}'"
                ));
            }
        }
    }

    let unused: Vec<&str> = available.difference(&referenced).copied().collect();
    if !unused.is_empty() {
        report.add_warning(format!("Unused categories: {}", unused.join(", ")));
    }

    report
}
