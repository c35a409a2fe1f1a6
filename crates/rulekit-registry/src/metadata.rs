//! # Domain Metadata Schema
//!
//! Field-level checks over `domain_metadata`: lifecycle status, review
//! date format, template type, and the required-section list. The date
//! check requires both the `YYYY-MM-DD` shape and a real calendar date.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;

use rulekit_core::{DomainStatus, ValidationReport};

fn date_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap())
}

/// Validate the per-domain metadata records.
///
/// A missing or non-object `domain_metadata` key yields no findings here;
/// structural validation owns that case.
pub fn validate_metadata(doc: &Value) -> ValidationReport {
    let mut report = ValidationReport::ok();
    let Some(metadata) = doc.get("domain_metadata").and_then(Value::as_object) else {
        return report;
    };

    for (domain, record) in metadata {
        let record = match record.as_object() {
            Some(r) => r,
            None => {
                report.add_error(format!("Domain '{domain}' metadata must be an object"));
                continue;
            }
        };

        match record.get("status").and_then(Value::as_str) {
            None | Some("") => {
                report.add_error(format!("Domain '{domain}' missing required 'status' field"));
            }
            Some(status) => {
                if status.parse::<DomainStatus>().is_err() {
                    report.add_error(format!(
                        "Domain '{domain}' has invalid status '{status}'. Must be one of: active, beta, deprecated"
                    ));
                }
            }
        }

        if let Some(last_reviewed) = record.get("last_reviewed").and_then(Value::as_str) {
            let shape_ok = date_shape().is_match(last_reviewed);
            let calendar_ok = NaiveDate::parse_from_str(last_reviewed, "%Y-%m-%d").is_ok();
            if !(shape_ok && calendar_ok) {
                report.add_error(format!(
                    "Domain '{domain}' has invalid last_reviewed format '{last_reviewed}'. Must be YYYY-MM-DD"
                ));
            }
        }

        match record.get("template_type").and_then(Value::as_str) {
            None | Some("") => {
                report.add_error(format!(
                    "Domain '{domain}' missing required 'template_type' field"
                ));
            }
            Some(_) => {}
        }

        if let Some(sections) = record.get("required_sections") {
            if !sections.is_array() {
                report.add_error(format!(
                    "Domain '{domain}' 'required_sections' must be a list"
                ));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_with(record: Value) -> Value {
        json!({ "domain_metadata": { "backend": record } })
    }

    #[test]
    fn complete_record_passes() {
        let report = validate_metadata(&doc_with(json!({
            "description": "backend rules",
            "status": "active",
            "last_reviewed": "2024-01-31",
            "template_type": "domain",
            "required_sections": ["## Core Principles"]
        })));
        assert!(report.is_valid, "errors: {:?}", report.errors);
    }

    #[test]
    fn missing_status_is_error() {
        let report = validate_metadata(&doc_with(json!({ "template_type": "domain" })));
        assert!(report.errors.iter().any(|e| e.contains("'status'")));
    }

    #[test]
    fn invalid_status_names_the_value() {
        let report = validate_metadata(&doc_with(json!({
            "status": "retired", "template_type": "domain"
        })));
        assert!(report.errors.iter().any(|e| e.contains("'retired'")));
    }

    #[test]
    fn unpadded_date_is_rejected() {
        let report = validate_metadata(&doc_with(json!({
            "status": "active", "template_type": "domain", "last_reviewed": "2024-1-31"
        })));
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("last_reviewed") && e.contains("2024-1-31")));
    }

    #[test]
    fn impossible_calendar_date_is_rejected() {
        let report = validate_metadata(&doc_with(json!({
            "status": "active", "template_type": "domain", "last_reviewed": "2024-02-30"
        })));
        assert!(report.errors.iter().any(|e| e.contains("2024-02-30")));
    }

    #[test]
    fn absent_last_reviewed_is_fine() {
        let report = validate_metadata(&doc_with(json!({
            "status": "beta", "template_type": "domain"
        })));
        assert!(report.is_valid);
    }

    #[test]
    fn required_sections_must_be_a_list() {
        let report = validate_metadata(&doc_with(json!({
            "status": "active", "template_type": "domain",
            "required_sections": "## Core Principles"
        })));
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("'required_sections' must be a list")));
    }

    #[test]
    fn absent_metadata_key_yields_no_findings() {
        let report = validate_metadata(&json!({ "tool_categories": {} }));
        assert!(report.is_valid);
        assert!(report.is_clean());
    }
}
