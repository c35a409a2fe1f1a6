//! # rulekit CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros for argument parsing; each handler returns the
//! process exit code as a `u8`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rulekit_cli::browse::{run_browse, BrowseArgs};
use rulekit_cli::domains::{run_validate, ValidateArgs};
use rulekit_cli::lint::{run_lint, LintArgs};
use rulekit_cli::new::{run_new, NewArgs};
use rulekit_core::config::find_repo_root;
use rulekit_core::RulekitConfig;

/// rulekit — rule-file toolkit for AI assistant rule systems.
///
/// Validates, generates, and browses `.mdc` rule files and their JSON
/// registries (tool registry, role library).
#[derive(Parser, Debug)]
#[command(name = "rulekit", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (defaults to rulekit.json at the repo root).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lint the tool registry, the role library, or .mdc rule files.
    Lint(LintArgs),

    /// Cross-validate registry domains against the filesystem layout.
    Validate(ValidateArgs),

    /// Generate a new role or domain rule file from a template.
    New(NewArgs),

    /// Browse tools, roles, or domains from the registries.
    Browse(BrowseArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // One correlation ID per invocation groups all log lines of this run.
    let correlation_id = uuid::Uuid::new_v4().simple().to_string()[..8].to_string();
    let span = tracing::info_span!("run", correlation_id = %correlation_id);
    let _guard = span.enter();

    let repo_root = find_repo_root(
        &std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    )
    .unwrap_or_else(|| {
        tracing::warn!("could not locate repository root; using current directory");
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });

    tracing::debug!(repo_root = %repo_root.display(), "resolved repository root");

    let config = RulekitConfig::load(repo_root, cli.config.as_deref());

    let result = match cli.command {
        Commands::Lint(args) => run_lint(&args, &config),
        Commands::Validate(args) => run_validate(&args, &config),
        Commands::New(args) => run_new(&args, &config),
        Commands::Browse(args) => run_browse(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulekit_cli::lint::LintCommand;

    #[test]
    fn cli_parse_lint_registry() {
        let cli = Cli::try_parse_from(["rulekit", "lint", "registry", "tools/registry.json"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Lint(_)));
        if let Commands::Lint(args) = cli.command {
            assert!(matches!(args.command, LintCommand::Registry { .. }));
        }
    }

    #[test]
    fn cli_parse_lint_roles_with_registry_override() {
        let cli = Cli::try_parse_from([
            "rulekit",
            "lint",
            "roles",
            "library.json",
            "--registry",
            "registry.json",
        ])
        .unwrap();
        if let Commands::Lint(args) = cli.command {
            if let LintCommand::Roles { path, registry } = args.command {
                assert_eq!(path, "library.json");
                assert_eq!(registry.as_deref(), Some("registry.json"));
            } else {
                panic!("expected roles subcommand");
            }
        }
    }

    #[test]
    fn cli_parse_lint_mdc_multiple_files() {
        let cli = Cli::try_parse_from([
            "rulekit",
            "lint",
            "mdc",
            "a.mdc",
            "b.mdc",
            "--line-limit",
            "120",
        ])
        .unwrap();
        if let Commands::Lint(args) = cli.command {
            if let LintCommand::Mdc { files, line_limit } = args.command {
                assert_eq!(files.len(), 2);
                assert_eq!(line_limit, Some(120));
            } else {
                panic!("expected mdc subcommand");
            }
        }
    }

    #[test]
    fn cli_parse_lint_mdc_requires_at_least_one_file() {
        assert!(Cli::try_parse_from(["rulekit", "lint", "mdc"]).is_err());
    }

    #[test]
    fn cli_parse_validate_domains() {
        let cli = Cli::try_parse_from(["rulekit", "validate", "domains"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate(_)));
    }

    #[test]
    fn cli_parse_new_role() {
        let cli = Cli::try_parse_from([
            "rulekit", "new", "role", "cfo", "--role-type", "executive", "--strict",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::New(_)));
    }

    #[test]
    fn cli_parse_new_domain() {
        let cli = Cli::try_parse_from([
            "rulekit",
            "new",
            "domain",
            "backend",
            "--category",
            "backend",
            "--description",
            "API rules",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::New(_)));
    }

    #[test]
    fn cli_parse_browse_tools_json() {
        let cli = Cli::try_parse_from(["rulekit", "browse", "tools", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Browse(_)));
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["rulekit", "validate", "domains"]).unwrap();
        assert_eq!(cli0.verbose, 0);

        let cli2 = Cli::try_parse_from(["rulekit", "-vv", "validate", "domains"]).unwrap();
        assert_eq!(cli2.verbose, 2);
    }

    #[test]
    fn cli_parse_config_option() {
        let cli = Cli::try_parse_from([
            "rulekit",
            "--config",
            "custom.json",
            "validate",
            "domains",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.json")));
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["rulekit"]).is_err());
    }

    #[test]
    fn cli_parse_invalid_subcommand_errors() {
        assert!(Cli::try_parse_from(["rulekit", "nonexistent"]).is_err());
    }
}
