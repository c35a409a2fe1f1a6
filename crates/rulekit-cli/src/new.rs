//! # New Subcommand
//!
//! `rulekit new role|domain` — generates `.mdc` scaffolds from templates.
//! Role records come from the role library and can be overridden from a
//! JSON file and individual CSV flags; precedence is CLI flags > JSON
//! override file > library record. Generated files are linted immediately
//! so authoring problems surface in the same run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use serde_json::Value;

use rulekit_core::{RoleKind, RulekitConfig, RulekitError};
use rulekit_mdc::lint::LintOptions;
use rulekit_mdc::template::{
    coerce_csv, deep_merge, render_domain_rule, render_executive, render_specialist,
    sanitize_component_name, set_bucket_field,
};
use rulekit_registry::loader;

use crate::domains::domain_metadata_record;

/// Arguments for the `rulekit new` subcommand.
#[derive(Args, Debug)]
pub struct NewArgs {
    #[command(subcommand)]
    pub command: NewCommand,
}

/// Generation subcommands.
#[derive(Subcommand, Debug)]
pub enum NewCommand {
    /// Generate a role rule file from the role library.
    Role {
        /// Role name (e.g., cfo, qa_lead).
        name: String,

        /// Role type.
        #[arg(long = "role-type", value_enum)]
        role_type: RoleTypeArg,

        /// Fail when required bucket data is missing instead of filling
        /// defaults.
        #[arg(long)]
        strict: bool,

        /// Allow a role that is not in the library (starts from an empty
        /// record).
        #[arg(long)]
        allow_custom: bool,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,

        /// Output directory (defaults to the configured roles directory).
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// JSON file with full override data (merged over the library record).
        #[arg(long)]
        json_override: Option<PathBuf>,

        /// Comma-separated trusted tools.
        #[arg(long)]
        trusted_tools: Option<String>,

        /// Comma-separated communication styles.
        #[arg(long)]
        comms: Option<String>,

        /// Comma-separated key performance indicators.
        #[arg(long)]
        kpis: Option<String>,

        /// Comma-separated motivational drivers.
        #[arg(long)]
        drivers: Option<String>,

        /// Comma-separated pain points.
        #[arg(long)]
        pain_points: Option<String>,

        /// Comma-separated top objectives.
        #[arg(long)]
        top_objectives: Option<String>,

        /// Comma-separated decision rights.
        #[arg(long)]
        decision_rights: Option<String>,

        /// Comma-separated key stakeholders.
        #[arg(long)]
        stakeholders: Option<String>,
    },

    /// Generate a domain rule file.
    Domain {
        /// Domain rule name (e.g., backend, api_design).
        name: String,

        /// Category directory for the rule.
        #[arg(long, value_enum)]
        category: CategoryArg,

        /// Custom description (defaults to registry metadata, then a
        /// generated one).
        #[arg(long)]
        description: Option<String>,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,

        /// Output base directory (defaults to the configured rules directory).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Role type flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleTypeArg {
    /// Executive persona (five-bucket record).
    Executive,
    /// Specialist persona.
    Specialist,
}

impl RoleTypeArg {
    fn kind(self) -> RoleKind {
        match self {
            Self::Executive => RoleKind::Executive,
            Self::Specialist => RoleKind::Specialist,
        }
    }
}

/// Domain rule categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Frontend,
    Backend,
    Cloud,
    Data,
    Security,
    Docs,
    Martech,
}

impl CategoryArg {
    fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Cloud => "cloud",
            Self::Data => "data",
            Self::Security => "security",
            Self::Docs => "docs",
            Self::Martech => "martech",
        }
    }
}

/// Execute the new subcommand.
pub fn run_new(args: &NewArgs, config: &RulekitConfig) -> Result<u8> {
    match &args.command {
        NewCommand::Role {
            name,
            role_type,
            strict,
            allow_custom,
            force,
            output,
            json_override,
            trusted_tools,
            comms,
            kpis,
            drivers,
            pain_points,
            top_objectives,
            decision_rights,
            stakeholders,
        } => {
            let overrides = FieldOverrides {
                trusted_tools: trusted_tools.as_deref(),
                comms: comms.as_deref(),
                kpis: kpis.as_deref(),
                drivers: drivers.as_deref(),
                pain_points: pain_points.as_deref(),
                top_objectives: top_objectives.as_deref(),
                decision_rights: decision_rights.as_deref(),
                stakeholders: stakeholders.as_deref(),
            };
            cmd_role(
                name,
                role_type.kind(),
                *strict,
                *allow_custom,
                *force,
                output.as_deref(),
                json_override.as_deref(),
                &overrides,
                config,
            )
        }
        NewCommand::Domain {
            name,
            category,
            description,
            force,
            output,
        } => cmd_domain(
            name,
            *category,
            description.as_deref(),
            *force,
            output.as_deref(),
            config,
        ),
    }
}

/// CSV-valued CLI flag overrides, each targeting one bucket field.
struct FieldOverrides<'a> {
    trusted_tools: Option<&'a str>,
    comms: Option<&'a str>,
    kpis: Option<&'a str>,
    drivers: Option<&'a str>,
    pain_points: Option<&'a str>,
    top_objectives: Option<&'a str>,
    decision_rights: Option<&'a str>,
    stakeholders: Option<&'a str>,
}

impl FieldOverrides<'_> {
    /// Apply every present flag to the record. Flags are the highest
    /// precedence layer.
    fn apply(&self, record: &mut Value) {
        let mapping: [(&Option<&str>, &str, &str); 8] = [
            (&self.trusted_tools, "behaviors", "trusted_tools"),
            (&self.comms, "behaviors", "comms"),
            (&self.kpis, "objectives", "kpis"),
            (&self.drivers, "motivations", "drivers"),
            (&self.pain_points, "motivations", "pain_points"),
            (&self.top_objectives, "objectives", "top_objectives"),
            (&self.decision_rights, "influence", "decision_rights"),
            (&self.stakeholders, "influence", "stakeholders"),
        ];
        for (flag, bucket, key) in mapping {
            if let Some(raw) = flag {
                let values = coerce_csv(raw);
                if !values.is_empty() {
                    set_bucket_field(record, bucket, key, values);
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_role(
    raw_name: &str,
    kind: RoleKind,
    strict: bool,
    allow_custom: bool,
    force: bool,
    output: Option<&Path>,
    json_override: Option<&Path>,
    overrides: &FieldOverrides<'_>,
    config: &RulekitConfig,
) -> Result<u8> {
    let sanitized = sanitize_component_name(raw_name)?;
    if sanitized.tightened {
        println!("Warning: role name sanitized: '{raw_name}' -> '{}'", sanitized.name);
    }
    let name = sanitized.name;

    let library_path = config.role_library_path();
    let raw = std::fs::read_to_string(&library_path).with_context(|| {
        format!(
            "role library not found at {}; create it with executive and specialist definitions",
            library_path.display()
        )
    })?;
    let library: Value = serde_json::from_str(&raw)
        .with_context(|| format!("invalid JSON in {}", library_path.display()))?;

    let mut record = match library.get(kind.as_str()).and_then(|roles| roles.get(&name)) {
        Some(record) => record.clone(),
        None if allow_custom => Value::Object(serde_json::Map::new()),
        None => {
            let available: Vec<String> = library
                .get(kind.as_str())
                .and_then(Value::as_object)
                .map(|roles| roles.keys().cloned().collect())
                .unwrap_or_default();
            println!("Error: role '{name}' not found in the {kind} library");
            println!("Available: {}", available.join(", "));
            println!("Use --allow-custom to start from an empty record.");
            return Ok(1);
        }
    };

    // Precedence: CLI flags > JSON override file > library record.
    if let Some(path) = json_override {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("JSON override file not found: {}", path.display()))?;
        let overlay: Value = serde_json::from_str(&raw)
            .with_context(|| format!("invalid JSON override file: {}", path.display()))?;
        deep_merge(&mut record, overlay);
    }
    overrides.apply(&mut record);

    tracing::info!(role = %name, kind = %kind, "generating role file");

    let content = match kind {
        RoleKind::Executive => render_executive(&name, &record, strict)?,
        RoleKind::Specialist => render_specialist(&name, &record, strict)?,
    };

    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.roles_output_path());
    let path = write_rule_file(&name, &content, &output_dir, force)?;

    println!("OK: role created: {}", path.display());
    println!("Invoke with: @{name}");

    lint_generated(&path, config);
    Ok(0)
}

fn cmd_domain(
    raw_name: &str,
    category: CategoryArg,
    description: Option<&str>,
    force: bool,
    output: Option<&Path>,
    config: &RulekitConfig,
) -> Result<u8> {
    let sanitized = sanitize_component_name(raw_name)?;
    if sanitized.tightened {
        println!(
            "Warning: domain rule name sanitized: '{raw_name}' -> '{}'",
            sanitized.name
        );
    }
    let name = sanitized.name;

    // Registry metadata enriches the scaffold when present; its absence
    // is fine.
    let registry = loader::load(&config.tool_registry_path()).document();
    let metadata = domain_metadata_record(&registry, &name);

    tracing::info!(domain = %name, category = category.as_str(), "generating domain rule");

    let content = render_domain_rule(&name, category.as_str(), description, metadata.as_ref())?;

    let base = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.repo_root.join(&config.rules_dir));
    let path = write_rule_file(&name, &content, &base.join(category.as_str()), force)?;

    println!("OK: domain rule created: {}", path.display());

    lint_generated(&path, config);
    Ok(0)
}

/// Write `<name>.mdc` under `dir`, refusing to overwrite without `force`.
fn write_rule_file(name: &str, content: &str, dir: &Path, force: bool) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    let path = dir.join(format!("{name}.mdc"));
    if path.exists() && !force {
        return Err(RulekitError::WouldOverwrite {
            path: path.display().to_string(),
        }
        .into());
    }

    std::fs::write(&path, content)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    Ok(path)
}

/// Lint a freshly generated file and surface its findings immediately.
fn lint_generated(path: &Path, config: &RulekitConfig) {
    let check = rulekit_mdc::check_file(path, &LintOptions::from_env(config.line_limit));
    if check.is_valid && check.warnings.is_empty() {
        println!("OK: validation passed");
        return;
    }
    if !check.is_valid {
        println!(
            "Warning: generated file exceeds line limit ({} lines)",
            check.line_count
        );
    }
    for warning in &check.warnings {
        println!("  warning: {warning}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scaffold_library(library: &Value) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let tools = dir.path().join(".cursor/rules/tools");
        std::fs::create_dir_all(&tools).unwrap();
        std::fs::write(
            tools.join("role_library.json"),
            serde_json::to_string(library).unwrap(),
        )
        .unwrap();
        dir
    }

    fn no_overrides() -> FieldOverrides<'static> {
        FieldOverrides {
            trusted_tools: None,
            comms: None,
            kpis: None,
            drivers: None,
            pain_points: None,
            top_objectives: None,
            decision_rights: None,
            stakeholders: None,
        }
    }

    #[test]
    fn role_generation_writes_and_lints_clean() {
        let library = json!({
            "specialist": {
                "qa_lead": {
                    "identity": { "scope": "team", "seniority": "senior", "span_of_control": "3" },
                    "objectives": { "top_objectives": ["quality"], "kpis": ["escape rate"] },
                    "standards": ["risk-based testing"]
                }
            },
            "executive": {}
        });
        let dir = scaffold_library(&library);
        let config = RulekitConfig::defaults(dir.path().to_path_buf());
        let out = dir.path().join("generated");

        let code = cmd_role(
            "qa_lead",
            RoleKind::Specialist,
            true,
            false,
            false,
            Some(&out),
            None,
            &no_overrides(),
            &config,
        )
        .unwrap();
        assert_eq!(code, 0);

        let written = std::fs::read_to_string(out.join("qa_lead.mdc")).unwrap();
        assert!(written.contains("# Qa Lead (v1.0)"));
        assert!(written.contains("risk-based testing"));
    }

    #[test]
    fn role_generation_refuses_overwrite_without_force() {
        let library = json!({ "specialist": { }, "executive": {} });
        let dir = scaffold_library(&library);
        let config = RulekitConfig::defaults(dir.path().to_path_buf());
        let out = dir.path().join("generated");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("dev.mdc"), "existing").unwrap();

        let result = cmd_role(
            "dev",
            RoleKind::Specialist,
            false,
            true,
            false,
            Some(&out),
            None,
            &no_overrides(),
            &config,
        );
        assert!(result.is_err());
        // Untouched.
        assert_eq!(std::fs::read_to_string(out.join("dev.mdc")).unwrap(), "existing");
    }

    #[test]
    fn unknown_role_without_allow_custom_exits_one() {
        let library = json!({ "specialist": { "dev": {} }, "executive": {} });
        let dir = scaffold_library(&library);
        let config = RulekitConfig::defaults(dir.path().to_path_buf());

        let code = cmd_role(
            "ghost",
            RoleKind::Specialist,
            false,
            false,
            false,
            Some(&dir.path().join("out")),
            None,
            &no_overrides(),
            &config,
        )
        .unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn cli_flag_overrides_beat_library_data() {
        let library = json!({
            "executive": {
                "cfo": {
                    "identity": { "scope": "Global", "seniority": "C-level", "span_of_control": "100" },
                    "objectives": { "top_objectives": ["old objective"], "kpis": ["old kpi"] },
                    "influence": { "decision_rights": ["budget"], "stakeholders": ["CEO"] },
                    "behaviors": { "trusted_tools": ["Excel"] },
                    "motivations": { "drivers": ["growth"] }
                }
            },
            "specialist": {}
        });
        let dir = scaffold_library(&library);
        let config = RulekitConfig::defaults(dir.path().to_path_buf());
        let out = dir.path().join("out");

        let overrides = FieldOverrides {
            kpis: Some("ARR, burn multiple"),
            ..no_overrides()
        };
        let code = cmd_role(
            "cfo",
            RoleKind::Executive,
            false,
            false,
            false,
            Some(&out),
            None,
            &overrides,
            &config,
        )
        .unwrap();
        assert_eq!(code, 0);

        let written = std::fs::read_to_string(out.join("cfo.mdc")).unwrap();
        assert!(written.contains("ARR, burn multiple"));
        assert!(!written.contains("old kpi"));
        assert!(written.contains("old objective"));
    }

    #[test]
    fn json_override_merges_under_cli_flags() {
        let library = json!({
            "specialist": {
                "dev": {
                    "identity": { "scope": "team", "seniority": "mid", "span_of_control": "0" },
                    "objectives": { "top_objectives": ["ship"], "kpis": ["velocity"] },
                    "standards": ["reviewed code"]
                }
            },
            "executive": {}
        });
        let dir = scaffold_library(&library);
        let config = RulekitConfig::defaults(dir.path().to_path_buf());
        let override_path = dir.path().join("override.json");
        std::fs::write(
            &override_path,
            r#"{ "identity": { "seniority": "staff" } }"#,
        )
        .unwrap();
        let out = dir.path().join("out");

        let code = cmd_role(
            "dev",
            RoleKind::Specialist,
            true,
            false,
            false,
            Some(&out),
            Some(&override_path),
            &no_overrides(),
            &config,
        )
        .unwrap();
        assert_eq!(code, 0);

        let written = std::fs::read_to_string(out.join("dev.mdc")).unwrap();
        assert!(written.contains("Seniority: staff"));
        assert!(written.contains("Scope / focus: team"));
    }

    #[test]
    fn domain_generation_writes_under_category_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".cursor/rules")).unwrap();
        let config = RulekitConfig::defaults(dir.path().to_path_buf());

        let code = cmd_domain(
            "api_design",
            CategoryArg::Backend,
            Some("API design rules"),
            false,
            None,
            &config,
        )
        .unwrap();
        assert_eq!(code, 0);

        let written = std::fs::read_to_string(
            dir.path().join(".cursor/rules/backend/api_design.mdc"),
        )
        .unwrap();
        assert!(written.contains("# Api Design"));
        assert!(written.contains("description: API design rules"));
    }

    #[test]
    fn dangerous_role_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = RulekitConfig::defaults(dir.path().to_path_buf());
        let result = cmd_role(
            "cfo${x}",
            RoleKind::Executive,
            false,
            true,
            false,
            None,
            None,
            &no_overrides(),
            &config,
        );
        assert!(result.is_err());
    }
}
