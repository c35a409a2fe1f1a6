//! # MDC Structure Linting
//!
//! Per-file checks over `.mdc` rule documents. Only the line-count
//! ceiling decides validity; everything else (placeholders, front-matter,
//! marker line, section headers) is a warning, reported but not counted.
//!
//! Files are classified executive-like when they contain either of the two
//! executive-only section headers; otherwise specialist-like. The missing
//! section set is computed against the classification's required list.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use rulekit_core::config::DEFAULT_LINE_LIMIT;
use rulekit_core::RoleKind;

/// Environment variable that overrides the line limit at process start.
pub const LINE_LIMIT_ENV: &str = "MDC_LINE_LIMIT";

/// Marker line every rule file must carry.
pub const REQUIRED_MARKER: &str = "rule_type: Agent Requested";

/// Front-matter opener a rule file must start with.
pub const FRONT_MATTER_DELIMITER: &str = "---\n";

/// Section headers an executive rule file must contain.
pub const EXECUTIVE_SECTIONS: &[&str] = &[
    "## Identity & Context",
    "## Objectives, KPIs & Mandate",
    "## Influence & Decision Power",
    "## Behaviors, Tools & Preferences",
    "## Motivations, Pain Points & Constraints",
];

/// Section headers a specialist rule file must contain.
pub const SPECIALIST_SECTIONS: &[&str] = &[
    "## Identity & Context",
    "## Objectives & Quality Standards",
    "## Quality Gates & Behaviors",
];

/// Headers whose presence marks a file as executive-like.
const EXECUTIVE_MARKERS: &[&str] = &[
    "## Influence & Decision Power",
    "## Motivations, Pain Points & Constraints",
];

fn placeholder_pattern() -> &'static Regex {
    // Double-brace slots are matched first so they can be skipped; the
    // single-brace alternative is the finding.
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{[^{}]*\}\}|\{[^{}]+\}").unwrap())
}

/// Linting knobs, injected by the caller. The duplicated script variants
/// this replaces each hard-coded their own values.
#[derive(Debug, Clone, Copy)]
pub struct LintOptions {
    /// Maximum allowed line count.
    pub line_limit: usize,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            line_limit: DEFAULT_LINE_LIMIT,
        }
    }
}

impl LintOptions {
    /// Options with an explicit line limit.
    pub fn new(line_limit: usize) -> Self {
        Self { line_limit }
    }

    /// Apply the `MDC_LINE_LIMIT` environment override on top of `base`.
    /// An unparsable value is ignored with a warning.
    pub fn from_env(base: usize) -> Self {
        match std::env::var(LINE_LIMIT_ENV) {
            Ok(raw) => match raw.parse::<usize>() {
                Ok(limit) => Self { line_limit: limit },
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring unparsable {LINE_LIMIT_ENV}");
                    Self { line_limit: base }
                }
            },
            Err(_) => Self { line_limit: base },
        }
    }
}

/// Result of linting one file.
#[derive(Debug, Clone)]
pub struct FileCheck {
    /// Whether the file is within the line limit (and was readable).
    pub is_valid: bool,
    /// Total line count (`'\n'` count + 1); 0 when unreadable.
    pub line_count: usize,
    /// Non-fatal findings.
    pub warnings: Vec<String>,
}

/// Classify a rule file's content as executive-like or specialist-like.
pub fn classify(content: &str) -> RoleKind {
    if EXECUTIVE_MARKERS.iter().any(|m| content.contains(m)) {
        RoleKind::Executive
    } else {
        RoleKind::Specialist
    }
}

/// Distinct unresolved single-brace placeholders in `content`.
/// Double-brace `{{…}}` slots are the intentional, user-fillable kind
/// and are exempt.
pub fn unresolved_placeholders(content: &str) -> BTreeSet<String> {
    placeholder_pattern()
        .find_iter(content)
        .filter(|m| !m.as_str().starts_with("{{"))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Lint already-read content. Pure; used by [`check_file`] and by tests.
pub fn check_content(content: &str, options: &LintOptions) -> FileCheck {
    let line_count = content.matches('\n').count() + 1;
    let is_valid = line_count <= options.line_limit;

    let mut warnings = Vec::new();

    let placeholders = unresolved_placeholders(content);
    if !placeholders.is_empty() {
        let listed: Vec<&str> = placeholders.iter().map(String::as_str).collect();
        warnings.push(format!("Unresolved placeholders: {}", listed.join(", ")));
    }

    if !content.starts_with(FRONT_MATTER_DELIMITER) {
        warnings.push("Missing YAML front-matter".to_string());
    } else if let Some(block) = front_matter_block(content) {
        if let Err(e) = serde_yaml::from_str::<serde_yaml::Value>(block) {
            warnings.push(format!("Malformed YAML front-matter: {e}"));
        }
    }

    if !content.contains(REQUIRED_MARKER) {
        warnings.push(format!("Missing '{REQUIRED_MARKER}'"));
    }

    let (label, required) = match classify(content) {
        RoleKind::Executive => ("executive", EXECUTIVE_SECTIONS),
        RoleKind::Specialist => ("specialist", SPECIALIST_SECTIONS),
    };
    let missing: Vec<&str> = required
        .iter()
        .filter(|s| !content.contains(**s))
        .copied()
        .collect();
    if !missing.is_empty() {
        warnings.push(format!(
            "Missing {label} sections: {}",
            missing.join(", ")
        ));
    }

    FileCheck {
        is_valid,
        line_count,
        warnings,
    }
}

/// Lint a single `.mdc` file.
///
/// A missing or unreadable file yields `(false, 0, [error message])`.
pub fn check_file(path: &Path, options: &LintOptions) -> FileCheck {
    if !path.exists() {
        return FileCheck {
            is_valid: false,
            line_count: 0,
            warnings: vec![format!("File {} does not exist", path.display())],
        };
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            return FileCheck {
                is_valid: false,
                line_count: 0,
                warnings: vec![format!("Error reading {}: {e}", path.display())],
            };
        }
    };

    check_content(&content, options)
}

/// The text between the opening `---` line and the closing `---` line,
/// or `None` when the block never closes.
fn front_matter_block(content: &str) -> Option<&str> {
    let rest = content.strip_prefix(FRONT_MATTER_DELIMITER)?;
    let end = rest.find("\n---")?;
    Some(&rest[..end])
}
