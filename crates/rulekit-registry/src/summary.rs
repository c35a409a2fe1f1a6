//! Registry statistics for console summaries.

use serde_json::Value;

/// Counts displayed after a registry lint run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistrySummary {
    /// Number of tool categories.
    pub categories: usize,
    /// Number of domain mappings.
    pub domain_mappings: usize,
    /// Total tools across all categories.
    pub total_tools: usize,
}

impl RegistrySummary {
    /// Compute summary counts from a registry document. Tolerates any
    /// shape; malformed parts simply contribute zero.
    pub fn from_document(doc: &Value) -> Self {
        let categories = doc
            .get("tool_categories")
            .and_then(Value::as_object)
            .map(|c| c.len())
            .unwrap_or(0);
        let domain_mappings = doc
            .get("domain_mappings")
            .and_then(Value::as_object)
            .map(|m| m.len())
            .unwrap_or(0);
        let total_tools = doc
            .get("tool_categories")
            .and_then(Value::as_object)
            .map(|categories| {
                categories
                    .values()
                    .filter_map(|c| c.get("tools"))
                    .filter_map(Value::as_array)
                    .map(Vec::len)
                    .sum()
            })
            .unwrap_or(0);

        Self {
            categories,
            domain_mappings,
            total_tools,
        }
    }
}
