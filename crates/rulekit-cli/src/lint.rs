//! # Lint Subcommand
//!
//! `rulekit lint registry|roles|mdc`. Each variant gates its inputs
//! through the path sanitizer, runs the relevant validation passes, and
//! prints findings plus a summary block. Exit code 0 means zero errors;
//! warnings are printed but never fail a run, except the `.mdc` line
//! limit, which is the one check the CLI treats as fatal per file.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;

use rulekit_core::{sanitize, RulekitConfig, ValidationReport};
use rulekit_mdc::lint::LintOptions;
use rulekit_registry::{loader, RegistrySummary};
use rulekit_roles::LibrarySummary;

use crate::{print_findings, resolve_path};

/// Arguments for the `rulekit lint` subcommand.
#[derive(Args, Debug)]
pub struct LintArgs {
    #[command(subcommand)]
    pub command: LintCommand,
}

/// Lint subcommands.
#[derive(Subcommand, Debug)]
pub enum LintCommand {
    /// Validate tool_registry.json structure and referential integrity.
    Registry {
        /// Path to the tool registry file.
        path: String,
    },

    /// Validate role_library.json structure and cross-references.
    Roles {
        /// Path to the role library file.
        path: String,

        /// Tool registry to cross-reference (defaults to the configured path).
        #[arg(long)]
        registry: Option<String>,
    },

    /// Check .mdc files for line count and structural compliance.
    Mdc {
        /// Rule files to check.
        #[arg(required = true)]
        files: Vec<String>,

        /// Override the line limit (takes precedence over MDC_LINE_LIMIT).
        #[arg(long)]
        line_limit: Option<usize>,
    },
}

/// Execute the lint subcommand.
pub fn run_lint(args: &LintArgs, config: &RulekitConfig) -> Result<u8> {
    match &args.command {
        LintCommand::Registry { path } => cmd_registry(path),
        LintCommand::Roles { path, registry } => cmd_roles(path, registry.as_deref(), config),
        LintCommand::Mdc { files, line_limit } => cmd_mdc(files, *line_limit, config),
    }
}

/// Sanitize a user-supplied path, converting rejection into exit code 1.
fn gate_path(raw: &str) -> Result<std::path::PathBuf, u8> {
    sanitize(raw).map_err(|e| {
        println!("Error: {e}");
        1
    })
}

fn cmd_registry(raw_path: &str) -> Result<u8> {
    let path = match gate_path(raw_path) {
        Ok(path) => path,
        Err(code) => return Ok(code),
    };

    let document = match load_json(&path) {
        Ok(document) => document,
        Err(code) => return Ok(code),
    };

    tracing::info!(path = %path.display(), "validating tool registry");

    let mut report = rulekit_registry::validate_structure(&document);
    if report.is_valid {
        report.merge(rulekit_registry::validate_integrity(&document));
        report.merge(rulekit_registry::validate_metadata(&document));
    }

    if report.is_valid {
        println!("OK: {} validation passed", path.display());
    } else {
        println!("FAIL: {} validation failed", path.display());
    }
    print_findings(&report);

    let summary = RegistrySummary::from_document(&document);
    println!();
    println!("Tool Registry Summary");
    println!("  File:            {}", path.display());
    println!("  Tool categories: {}", summary.categories);
    println!("  Domain mappings: {}", summary.domain_mappings);
    println!("  Total tools:     {}", summary.total_tools);
    println!("  Status:          {}", status_label(&report));

    Ok(exit_code(&report))
}

fn cmd_roles(raw_path: &str, registry_override: Option<&str>, config: &RulekitConfig) -> Result<u8> {
    let path = match gate_path(raw_path) {
        Ok(path) => path,
        Err(code) => return Ok(code),
    };

    // The registry is optional context: fail-open to an empty document.
    let registry_path = match registry_override {
        Some(raw) => resolve_path(Path::new(raw), &config.repo_root),
        None => config.tool_registry_path(),
    };
    let registry = loader::load(&registry_path).document();

    tracing::info!(path = %path.display(), "validating role library");

    let result = rulekit_roles::validate_role_library(&path, &registry);

    if result.report.is_valid {
        println!("OK: {} validation passed", path.display());
    } else {
        println!("FAIL: {} validation failed", path.display());
    }
    print_findings(&result.report);

    let summary = LibrarySummary::from_document(&result.document);
    println!();
    println!("Role Library Summary");
    println!("  File:                    {}", path.display());
    println!("  Executive roles:         {}", summary.executive);
    println!("  Specialist roles:        {}", summary.specialist);
    println!("  Total roles:             {}", summary.total());
    println!("  Roles with tool domains: {}", summary.with_tool_domains);
    println!("  Status:                  {}", status_label(&result.report));

    Ok(exit_code(&result.report))
}

fn cmd_mdc(files: &[String], line_limit: Option<usize>, config: &RulekitConfig) -> Result<u8> {
    // Precedence: --line-limit flag > MDC_LINE_LIMIT env > config default.
    let options = match line_limit {
        Some(limit) => LintOptions::new(limit),
        None => LintOptions::from_env(config.line_limit),
    };

    tracing::info!(limit = options.line_limit, files = files.len(), "checking .mdc files");

    let mut passed = 0usize;
    let mut failed = 0usize;

    for raw in files {
        let check = match sanitize(raw) {
            Ok(path) => rulekit_mdc::check_file(&path, &options),
            Err(e) => {
                println!("FAIL: {e}");
                failed += 1;
                continue;
            }
        };

        if !check.is_valid {
            failed += 1;
            if check.line_count > options.line_limit {
                println!(
                    "FAIL: {raw} exceeds limit: {} lines (max: {})",
                    check.line_count, options.line_limit
                );
            } else {
                // Unreadable file: the single warning carries the cause.
                println!("FAIL: {raw}");
            }
        } else if check.warnings.is_empty() {
            passed += 1;
            println!("OK: {raw} within limit: {} lines", check.line_count);
            continue;
        } else {
            passed += 1;
            println!(
                "WARN: {raw} within limit: {} lines (warnings)",
                check.line_count
            );
        }

        for warning in &check.warnings {
            println!("  - {warning}");
        }
    }

    println!();
    if failed == 0 {
        println!("All {passed} files passed validation (limit: {})", options.line_limit);
        Ok(0)
    } else {
        println!(
            "{failed} of {} files failed validation (limit: {})",
            passed + failed,
            options.line_limit
        );
        Ok(1)
    }
}

fn load_json(path: &Path) -> Result<Value, u8> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        println!("FAIL: Error reading {}: {e}", path.display());
        1u8
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        println!("FAIL: Invalid JSON in {}: {e}", path.display());
        1u8
    })
}

fn status_label(report: &ValidationReport) -> &'static str {
    if report.is_valid {
        "VALID"
    } else {
        "INVALID"
    }
}

fn exit_code(report: &ValidationReport) -> u8 {
    if report.is_valid {
        0
    } else {
        1
    }
}

/// Build the technical-domain set from configuration.
pub fn technical_domains(config: &RulekitConfig) -> BTreeSet<String> {
    config.technical_domains.iter().cloned().collect()
}
