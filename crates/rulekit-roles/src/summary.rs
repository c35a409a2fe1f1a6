//! Role library statistics for console summaries.

use serde_json::Value;

use rulekit_core::RoleKind;

/// Counts displayed after a role library lint run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LibrarySummary {
    /// Number of executive roles.
    pub executive: usize,
    /// Number of specialist roles.
    pub specialist: usize,
    /// Roles carrying a `behaviors.tool_domains` list.
    pub with_tool_domains: usize,
}

impl LibrarySummary {
    /// Compute summary counts from a library document. Tolerates any
    /// shape — malformed parts simply contribute zero.
    pub fn from_document(doc: &Value) -> Self {
        let count = |kind: RoleKind| {
            doc.get(kind.as_str())
                .and_then(Value::as_object)
                .map(|roles| roles.len())
                .unwrap_or(0)
        };

        let mut with_tool_domains = 0;
        for kind in RoleKind::all() {
            let Some(roles) = doc.get(kind.as_str()).and_then(Value::as_object) else {
                continue;
            };
            with_tool_domains += roles
                .values()
                .filter(|record| {
                    record
                        .get("behaviors")
                        .and_then(|b| b.get("tool_domains"))
                        .is_some()
                })
                .count();
        }

        Self {
            executive: count(RoleKind::Executive),
            specialist: count(RoleKind::Specialist),
            with_tool_domains,
        }
    }

    /// Total role count across both types.
    pub fn total(&self) -> usize {
        self.executive + self.specialist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_roles_per_type() {
        let doc = json!({
            "executive": { "cfo": {}, "cto": {} },
            "specialist": {
                "dev": { "behaviors": { "tool_domains": ["backend"] } }
            }
        });
        let summary = LibrarySummary::from_document(&doc);
        assert_eq!(summary.executive, 2);
        assert_eq!(summary.specialist, 1);
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.with_tool_domains, 1);
    }

    #[test]
    fn empty_document_counts_zero() {
        assert_eq!(
            LibrarySummary::from_document(&json!({})),
            LibrarySummary::default()
        );
    }
}
