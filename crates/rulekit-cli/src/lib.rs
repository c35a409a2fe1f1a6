//! # rulekit-cli — Command-Line Interface
//!
//! Provides the `rulekit` binary, replacing the Python `scripts/` tree
//! (linters, generators, and the library explorer) with one structured
//! CLI.
//!
//! ## Subcommands
//!
//! - `rulekit lint registry|roles|mdc` — Structural and referential
//!   validation of the tool registry, the role library, and `.mdc` files.
//! - `rulekit validate domains` — Filesystem/registry domain consistency.
//! - `rulekit new role|domain` — Generate `.mdc` scaffolds from templates.
//! - `rulekit browse tools|roles|domains` — Read-only registry listings.
//!
//! Every subcommand handler returns `Result<u8>`; `main` maps the value to
//! the process exit code. A run exits 0 only when every validation pass
//! produced zero errors; warnings never fail a run.

pub mod browse;
pub mod domains;
pub mod lint;
pub mod new;

use std::path::{Path, PathBuf};

use rulekit_core::ValidationReport;

/// Resolve a path that may be relative to the repository root.
///
/// If the path is absolute, returns it as-is. If relative and the file
/// exists relative to `repo_root`, uses that. Otherwise returns the path
/// relative to the current directory.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}

/// Print a report's findings: errors as bullets, warnings prefixed.
pub fn print_findings(report: &ValidationReport) {
    for error in &report.errors {
        println!("  - {error}");
    }
    for warning in &report.warnings {
        println!("  warning: {warning}");
    }
}
