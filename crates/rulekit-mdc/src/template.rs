//! # Rule File Templates
//!
//! The three `.mdc` scaffolds and the machinery that fills them: a
//! single-brace slot renderer (double-brace `{{…}}` slots pass through
//! untouched — they are the user-fillable kind the linter exempts),
//! component-name sanitization, override merging, and the
//! template-type-driven placeholder table for domain rules.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use rulekit_core::RulekitError;

/// Scaffold for executive role files (five-bucket standard).
pub const EXECUTIVE_TEMPLATE: &str = "---
rule_type: Agent Requested
description: {role} perspective for {domain}. Opt-in via @{role}.
---

# {title} (v1.0)

## Identity & Context
* Scope / region: {scope}
* Seniority: {seniority}
* Span of control: {span_of_control}

## Objectives, KPIs & Mandate
* Top objectives: {top_objectives}
* Success metrics: {kpis}

## Influence & Decision Power
* Decision rights: {decision_rights}
* Key stakeholders: {stakeholders}

## Behaviors, Tools & Preferences
* Comms style: {comms}
* Trusted tools: {trusted_tools}
* Risk posture: {risk_posture}

## Motivations, Pain Points & Constraints
* Drivers: {drivers}
* Pain points: {pain_points}

> Project rules override this Role if they conflict.

## Output Template

**{title} Assessment:**
- {{finding_1}}
- {{finding_2}}

**Decision:** <GO / NO-GO / REVISE>
**Next steps:**
- {{action_1}}
- {{action_2}}
";

/// Scaffold for specialist role files.
pub const SPECIALIST_TEMPLATE: &str = "---
rule_type: Agent Requested
description: {role} expertise for {domain}. Opt-in via @{role}.
---

# {title} (v1.0)

## Identity & Context
* Scope / focus: {scope}
* Seniority: {seniority}
* Span of control: {span_of_control}

## Objectives & Quality Standards
* Top objectives: {top_objectives}
* Success metrics: {kpis}
* Standards: {standards}

## Quality Gates & Behaviors
* Quality gates: {gates}
* Trusted tools: {trusted_tools}
* Risk posture: {risk_posture}

> Project rules override this Role if they conflict.

## Output Template

**{title} Review:**
- {{technical_finding}}
- {{recommendation}}

**Status:** <APPROVED / BLOCKED / NEEDS_REVISION>
**Next steps:**
- {{action}}
";

/// Scaffold for domain rule files.
pub const DOMAIN_RULE_TEMPLATE: &str = "---
rule_type: Agent Requested
description: {description}
---

# {title}

## Core Principles
- {principle_placeholder}

## Best Practices
- {practice_placeholder}

## Standards & Guidelines
- {standard_placeholder}

## Common Patterns
- {pattern_placeholder}
";

/// Input substrings that cause a name to be rejected outright.
pub const DANGEROUS_INPUT_PATTERNS: &[&str] =
    &["{{", "}}", "<script", "javascript:", "data:", "${", "`"];

/// Maximum accepted length for a raw name input.
pub const MAX_INPUT_LENGTH: usize = 100;

/// Categories a domain rule may be filed under.
pub const VALID_CATEGORIES: &[&str] = &[
    "frontend", "backend", "cloud", "data", "security", "docs", "martech",
];

fn slot_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{[^{}]*\}\}|\{[a-z_]+\}").unwrap())
}

/// A sanitized component (role or domain rule) name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedName {
    /// The usable name: lowercase alphanumerics plus `_` and `-`.
    pub name: String,
    /// Whether characters were dropped or case-folded; callers surface
    /// this as a warning.
    pub tightened: bool,
}

/// Sanitize a role or domain rule name.
///
/// Rejects dangerous patterns and over-long input, lowercases, and strips
/// everything outside `[a-z0-9_-]`. An empty result is an error.
pub fn sanitize_component_name(raw: &str) -> Result<SanitizedName, RulekitError> {
    let lowered = raw.to_lowercase();
    for pattern in DANGEROUS_INPUT_PATTERNS {
        if lowered.contains(pattern) {
            return Err(RulekitError::InvalidName(format!(
                "invalid characters detected in name: {raw}"
            )));
        }
    }
    if raw.len() > MAX_INPUT_LENGTH {
        return Err(RulekitError::InvalidName(format!(
            "name exceeds {MAX_INPUT_LENGTH} character limit ({} characters)",
            raw.len()
        )));
    }

    let name: String = lowered
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if name.is_empty() {
        return Err(RulekitError::InvalidName(format!(
            "name must contain alphanumeric characters: {raw}"
        )));
    }

    let tightened = name != raw;
    Ok(SanitizedName { name, tightened })
}

/// Fill the single-brace slots of `template` from `values`.
///
/// Double-brace slots pass through verbatim. A slot with no value is an
/// error naming it.
pub fn render(template: &str, values: &BTreeMap<&str, String>) -> Result<String, RulekitError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for m in slot_pattern().find_iter(template) {
        out.push_str(&template[last..m.start()]);
        let token = m.as_str();
        if token.starts_with("{{") {
            out.push_str(token);
        } else {
            let slot = &token[1..token.len() - 1];
            let value = values.get(slot).ok_or_else(|| {
                RulekitError::Template(format!("no value for template slot '{slot}'"))
            })?;
            out.push_str(value);
        }
        last = m.end();
    }
    out.push_str(&template[last..]);
    Ok(out)
}

/// Recursively merge `overlay` into `base`; overlay wins on conflicts,
/// objects merge key-by-key.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Split a comma-separated flag value into trimmed entries.
pub fn coerce_csv(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Set `bucket.key` on a role record to a list of strings, creating the
/// bucket when absent. Used for CLI flag overrides, which take precedence
/// over everything else.
pub fn set_bucket_field(record: &mut Value, bucket: &str, key: &str, values: Vec<String>) {
    if !record.is_object() {
        *record = Value::Object(serde_json::Map::new());
    }
    let root = record.as_object_mut().expect("just ensured object");
    let entry = root
        .entry(bucket.to_string())
        .or_insert_with(|| Value::Object(serde_json::Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(serde_json::Map::new());
    }
    entry.as_object_mut().expect("just ensured object").insert(
        key.to_string(),
        Value::Array(values.into_iter().map(Value::String).collect()),
    );
}

// ── Slot value extraction ────────────────────────────────────────────

fn bucket<'a>(record: &'a Value, name: &str) -> Option<&'a Value> {
    record.get(name).filter(|v| v.is_object())
}

fn field_str(bucket: Option<&Value>, key: &str, default: &str) -> String {
    bucket
        .and_then(|b| b.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

/// Join a list field; `default` applies only when the key is absent.
fn field_list(bucket: Option<&Value>, key: &str, default: &str) -> String {
    match bucket.and_then(|b| b.get(key)).and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        None => default.to_string(),
    }
}

fn title_case(name: &str) -> String {
    name.split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display title for a role: short acronyms go upper-case, everything
/// else title-case.
fn role_title(role_name: &str) -> String {
    if role_name.len() <= 3 {
        role_name.to_uppercase()
    } else {
        title_case(role_name)
    }
}

fn missing_buckets<'a>(record: &Value, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .filter(|b| {
            record
                .get(**b)
                .map_or(true, |v| v.as_object().map_or(true, |o| o.is_empty()))
        })
        .copied()
        .collect()
}

fn require_complete(record: &Value, required: &[&str], strict: bool) -> Result<(), RulekitError> {
    let missing = missing_buckets(record, required);
    if missing.is_empty() {
        return Ok(());
    }
    if strict {
        return Err(RulekitError::Template(format!(
            "missing required buckets: {}",
            missing.join(", ")
        )));
    }
    tracing::warn!(buckets = %missing.join(", "), "missing bucket data, filling defaults");
    Ok(())
}

/// Render an executive role file from a library record.
///
/// In strict mode a missing or empty required bucket is an error;
/// otherwise the documented defaults fill the gaps.
pub fn render_executive(
    role_name: &str,
    record: &Value,
    strict: bool,
) -> Result<String, RulekitError> {
    require_complete(
        record,
        &["identity", "objectives", "influence", "behaviors", "motivations"],
        strict,
    )?;

    let title = role_title(role_name);
    let identity = bucket(record, "identity");
    let objectives = bucket(record, "objectives");
    let influence = bucket(record, "influence");
    let behaviors = bucket(record, "behaviors");
    let motivations = bucket(record, "motivations");

    let mut values: BTreeMap<&str, String> = BTreeMap::new();
    values.insert("role", role_name.to_string());
    values.insert("domain", "strategy & execution".to_string());
    values.insert("title", title.clone());
    values.insert("scope", field_str(identity, "scope", "Global"));
    values.insert("seniority", field_str(identity, "seniority", "C-level"));
    values.insert(
        "span_of_control",
        field_str(identity, "span_of_control", "100"),
    );
    values.insert(
        "top_objectives",
        field_list(
            objectives,
            "top_objectives",
            &format!("Drive {role_name} excellence"),
        ),
    );
    values.insert("kpis", field_list(objectives, "kpis", "ROI"));
    values.insert(
        "decision_rights",
        field_list(influence, "decision_rights", &format!("{title} strategy")),
    );
    values.insert(
        "stakeholders",
        field_list(influence, "stakeholders", "CEO"),
    );
    values.insert("comms", field_list(behaviors, "comms", "Weekly reviews"));
    values.insert(
        "trusted_tools",
        field_list(behaviors, "trusted_tools", "Excel"),
    );
    values.insert(
        "risk_posture",
        field_str(behaviors, "risk_posture", "Not specified"),
    );
    values.insert("drivers", field_list(motivations, "drivers", "Growth"));
    values.insert(
        "pain_points",
        field_list(motivations, "pain_points", "Resource constraints"),
    );

    render(EXECUTIVE_TEMPLATE, &values)
}

/// Render a specialist role file from a library record.
pub fn render_specialist(
    role_name: &str,
    record: &Value,
    strict: bool,
) -> Result<String, RulekitError> {
    require_complete(record, &["identity", "objectives"], strict)?;

    let identity = bucket(record, "identity");
    let objectives = bucket(record, "objectives");
    let behaviors = bucket(record, "behaviors");

    let standards = record
        .get("standards")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Industry best practices".to_string());
    let gates = record
        .get("gates")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Standards review".to_string());
    let trusted_tools = behaviors
        .and_then(|b| b.get("trusted_tools"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Standard toolset".to_string());

    let mut values: BTreeMap<&str, String> = BTreeMap::new();
    values.insert("role", role_name.to_string());
    values.insert("domain", "technical review".to_string());
    values.insert("title", title_case(role_name));
    values.insert("scope", field_str(identity, "scope", "Cross-functional"));
    values.insert(
        "seniority",
        field_str(identity, "seniority", "Senior specialist"),
    );
    values.insert("span_of_control", field_str(identity, "span_of_control", "0"));
    values.insert(
        "top_objectives",
        field_list(
            objectives,
            "top_objectives",
            &format!("Ensure {role_name} excellence"),
        ),
    );
    values.insert("kpis", field_list(objectives, "kpis", "Quality score"));
    values.insert("standards", standards);
    values.insert("gates", gates);
    values.insert("trusted_tools", trusted_tools);
    values.insert(
        "risk_posture",
        field_str(behaviors, "risk_posture", "Standards-focused"),
    );

    render(SPECIALIST_TEMPLATE, &values)
}

/// Per-template-type fill values for domain rule scaffolds:
/// `(principle, practice, standard, pattern)`.
pub fn template_placeholders(template_type: &str) -> (&'static str, &'static str, &'static str, &'static str) {
    match template_type {
        "layered_architecture" => (
            "Design for scalability and maintainability",
            "Use proper error handling and logging",
            "Follow RESTful API design principles",
            "Layered architecture with clear separation of concerns",
        ),
        "cloud_native" => (
            "Design for cloud-native scalability and resilience",
            "Use infrastructure as code for all deployments",
            "Follow cloud security best practices",
            "Microservices with proper service mesh configuration",
        ),
        "universal_standards" => (
            "Maintain consistency across all development practices",
            "Use structured communication and documentation",
            "Follow enterprise coding and security standards",
            "Standardized workflows with clear governance",
        ),
        "data_platform" => (
            "Ensure data quality and governance",
            "Implement proper data validation and monitoring",
            "Follow data privacy and compliance requirements",
            "ETL pipelines with proper error handling and recovery",
        ),
        "documentation" => (
            "Create clear, actionable, and maintainable documentation",
            "Use consistent formatting and structure",
            "Follow technical writing best practices",
            "Documentation-as-code with version control",
        ),
        "component_driven" => (
            "Prioritize user experience and performance",
            "Use semantic HTML and accessible design patterns",
            "Follow WCAG 2.1 AA accessibility guidelines",
            "Component-based architecture with reusable UI elements",
        ),
        "tracking_and_analytics" => (
            "Respect user privacy and consent preferences",
            "Use consistent naming conventions for tracking events",
            "Follow GDPR and privacy compliance requirements",
            "Centralized tag management with proper data governance",
        ),
        "security_first" => (
            "Apply defense in depth security strategy",
            "Use principle of least privilege for all access",
            "Follow OWASP security guidelines",
            "Zero-trust architecture with proper authentication",
        ),
        "aws_services" => (
            "Optimize for cost, security, and performance",
            "Use managed services and infrastructure as code",
            "Follow AWS Well-Architected Framework",
            "Cloud-native patterns with proper monitoring",
        ),
        "language_specific" => (
            "Follow language idioms and best practices",
            "Use consistent code style and formatting",
            "Implement comprehensive testing strategies",
            "Modular design with clear dependency management",
        ),
        "data_storage" => (
            "Design for performance, consistency, and scalability",
            "Use proper indexing and query optimization",
            "Follow database normalization and security practices",
            "Schema design with proper data modeling",
        ),
        "role_specific" => (
            "Focus on role-specific best practices and workflows",
            "Use domain-appropriate tools and methodologies",
            "Follow industry standards for the role",
            "Established patterns for role responsibilities",
        ),
        _ => (
            "Follow domain-specific best practices",
            "Implement proper patterns and methodologies",
            "Adhere to industry standards",
            "Use established architectural patterns",
        ),
    }
}

/// Template type implied by a domain rule category when metadata declares
/// none.
pub fn category_template_type(category: &str) -> &'static str {
    match category {
        "frontend" => "component_driven",
        "backend" => "layered_architecture",
        "cloud" => "cloud_native",
        "data" => "data_platform",
        "security" => "security_first",
        "martech" => "tracking_and_analytics",
        "docs" => "documentation",
        _ => "universal_standards",
    }
}

/// Render a domain rule scaffold.
///
/// The description falls back from the explicit argument to the domain's
/// registry metadata to a generated default; the template type falls back
/// from metadata to the category mapping.
pub fn render_domain_rule(
    name: &str,
    category: &str,
    description: Option<&str>,
    metadata: Option<&Value>,
) -> Result<String, RulekitError> {
    if !VALID_CATEGORIES.contains(&category) {
        return Err(RulekitError::Template(format!(
            "unknown category '{category}'. Expected one of: {}",
            VALID_CATEGORIES.join(", ")
        )));
    }

    let title = title_case(name);
    let description = description
        .map(str::to_string)
        .or_else(|| {
            metadata
                .and_then(|m| m.get("description"))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Standards and best practices for {}.", title.to_lowercase()));

    let template_type = metadata
        .and_then(|m| m.get("template_type"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| category_template_type(category));
    let (principle, practice, standard, pattern) = template_placeholders(template_type);

    let mut values: BTreeMap<&str, String> = BTreeMap::new();
    values.insert("description", description);
    values.insert("title", title);
    values.insert("principle_placeholder", principle.to_string());
    values.insert("practice_placeholder", practice.to_string());
    values.insert("standard_placeholder", standard.to_string());
    values.insert("pattern_placeholder", pattern.to_string());

    render(DOMAIN_RULE_TEMPLATE, &values)
}
