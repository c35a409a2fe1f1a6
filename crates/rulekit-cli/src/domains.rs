//! # Validate Subcommand
//!
//! `rulekit validate domains` — cross-checks the three views of the
//! domain set: filesystem directories, `domain_mappings` keys, and
//! `domain_metadata` keys. Unlike the lint subcommands, this one treats a
//! missing or malformed registry as fatal: there is nothing meaningful to
//! validate without it.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::{Map, Value};

use rulekit_core::RulekitConfig;
use rulekit_registry::{
    consistency, filesystem_domains, loader, registry_domain_sets, validate_consistency,
    validate_metadata,
};

use crate::lint::technical_domains;
use crate::print_findings;

/// Arguments for the `rulekit validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(subcommand)]
    pub command: ValidateCommand,
}

/// Validate subcommands.
#[derive(Subcommand, Debug)]
pub enum ValidateCommand {
    /// Check filesystem/registry domain consistency and required sections.
    Domains,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, config: &RulekitConfig) -> Result<u8> {
    match args.command {
        ValidateCommand::Domains => cmd_domains(config),
    }
}

fn cmd_domains(config: &RulekitConfig) -> Result<u8> {
    let registry_path = config.tool_registry_path();
    let outcome = loader::load(&registry_path);
    let document = outcome.document();

    if document.as_object().map_or(true, Map::is_empty) {
        if let Some(reason) = outcome.failure() {
            println!("Error: {reason}");
        }
        println!("Error: cannot proceed without valid tool registry");
        return Ok(1);
    }

    let domains_dir = config.domains_dir_path();
    let filesystem = filesystem_domains(&domains_dir);
    let (mappings, metadata) = registry_domain_sets(&document);
    let technical = technical_domains(config);

    tracing::info!(
        filesystem = filesystem.len(),
        mappings = mappings.len(),
        metadata = metadata.len(),
        "validating domain consistency"
    );

    let mut report = validate_consistency(&filesystem, &mappings, &metadata, &technical);
    report.merge(validate_metadata(&document));
    report.merge(consistency::validate_required_sections(
        &filesystem,
        &document,
        &domains_dir,
    ));

    let listed = |set: &std::collections::BTreeSet<String>| {
        set.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    println!("Domain Validation Summary");
    println!("  Filesystem:      {} ({})", filesystem.len(), listed(&filesystem));
    println!("  domain_mappings: {} ({})", mappings.len(), listed(&mappings));
    println!("  domain_metadata: {} ({})", metadata.len(), listed(&metadata));
    println!();

    if report.is_valid {
        println!("OK: domain validation passed - all domains are consistent");
    } else {
        println!(
            "FAIL: domain validation failed with {} errors",
            report.errors.len()
        );
    }
    print_findings(&report);

    Ok(if report.is_valid { 0 } else { 1 })
}

/// Peek at a domain's metadata record, if the registry carries one.
pub fn domain_metadata_record(document: &Value, domain: &str) -> Option<Value> {
    document
        .get("domain_metadata")
        .and_then(|m| m.get(domain))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Build a repo tree with a registry and domain directories.
    fn scaffold(registry: &Value, domains: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let tools = dir.path().join(".cursor/rules/tools");
        std::fs::create_dir_all(&tools).unwrap();
        std::fs::write(
            tools.join("tool_registry.json"),
            serde_json::to_string(registry).unwrap(),
        )
        .unwrap();
        for domain in domains {
            std::fs::create_dir_all(dir.path().join(".cursor/rules/domains").join(domain))
                .unwrap();
        }
        dir
    }

    #[test]
    fn consistent_tree_passes() {
        let registry = json!({
            "tool_categories": {},
            "domain_mappings": { "backend": [], "aws": [] },
            "domain_metadata": {
                "backend": { "status": "active", "template_type": "layered_architecture" },
                "aws": { "status": "active", "template_type": "aws_services" }
            }
        });
        let dir = scaffold(&registry, &["backend"]);
        let config = RulekitConfig::defaults(dir.path().to_path_buf());
        let code = cmd_domains(&config).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn missing_registry_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = RulekitConfig::defaults(dir.path().to_path_buf());
        let code = cmd_domains(&config).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn orphan_filesystem_domain_fails() {
        let registry = json!({
            "tool_categories": {},
            "domain_mappings": {},
            "domain_metadata": {}
        });
        let dir = scaffold(&registry, &["rogue"]);
        let config = RulekitConfig::defaults(dir.path().to_path_buf());
        let code = cmd_domains(&config).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn metadata_schema_violations_fail_the_run() {
        let registry = json!({
            "tool_categories": {},
            "domain_mappings": { "backend": [] },
            "domain_metadata": {
                "backend": { "status": "retired", "template_type": "layered_architecture" }
            }
        });
        let dir = scaffold(&registry, &["backend"]);
        let config = RulekitConfig::defaults(dir.path().to_path_buf());
        let code = cmd_domains(&config).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn required_sections_enforced_via_registry() {
        let registry = json!({
            "tool_categories": {},
            "domain_mappings": { "backend": [] },
            "domain_metadata": {
                "backend": {
                    "status": "active",
                    "template_type": "layered_architecture",
                    "required_sections": ["## Core Principles"]
                }
            }
        });
        let dir = scaffold(&registry, &["backend"]);
        // A rule file without the required section.
        std::fs::write(
            dir.path().join(".cursor/rules/domains/backend/api.mdc"),
            "---\nrule_type: Agent Requested\n---\n## Other\n",
        )
        .unwrap();
        let config = RulekitConfig::defaults(dir.path().to_path_buf());
        let code = cmd_domains(&config).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn domain_metadata_record_looks_up_by_name() {
        let doc = json!({ "domain_metadata": { "backend": { "status": "active" } } });
        assert!(domain_metadata_record(&doc, "backend").is_some());
        assert!(domain_metadata_record(&doc, "frontend").is_none());
    }
}
