//! # Run Configuration
//!
//! [`RulekitConfig`] carries every knob the validators need: the rule-tree
//! paths, the technical-domain allow-list, and the default `.mdc` line
//! limit. It is a plain value constructed once by the CLI entry point and
//! passed down; there is no global configuration singleton.
//!
//! Configuration is read from `rulekit.json` at the repository root. A
//! missing or malformed file falls back to the documented defaults with a
//! logged warning; configuration loading never aborts a run.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default technical domains: registry-only domains that intentionally
/// have no filesystem directory.
pub const DEFAULT_TECHNICAL_DOMAINS: &[&str] =
    &["aws", "python", "database", "data_engineer", "data_analyst"];

/// Default ceiling for `.mdc` line counts.
pub const DEFAULT_LINE_LIMIT: usize = 150;

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct RulekitConfig {
    /// Repository root all relative paths are joined against.
    pub repo_root: PathBuf,
    /// Rule tree root, relative to `repo_root`.
    pub rules_dir: PathBuf,
    /// Tool registry document, relative to `repo_root`.
    pub tool_registry: PathBuf,
    /// Role library document, relative to `repo_root`.
    pub role_library: PathBuf,
    /// Domain rule directories, relative to `repo_root`.
    pub domains_dir: PathBuf,
    /// Output directory for generated role files, relative to `repo_root`.
    pub roles_output_dir: PathBuf,
    /// Domains exempt from the filesystem-directory requirement.
    pub technical_domains: Vec<String>,
    /// Default `.mdc` line limit (environment and CLI flags may override).
    pub line_limit: usize,
}

/// On-disk shape of `rulekit.json`. Every field is optional; absent
/// fields take the defaults.
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    paths: ConfigPaths,
    #[serde(default)]
    validation: ConfigValidation,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigPaths {
    rules_dir: Option<PathBuf>,
    tool_registry: Option<PathBuf>,
    role_library: Option<PathBuf>,
    domains_dir: Option<PathBuf>,
    roles_output_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigValidation {
    technical_domains: Option<Vec<String>>,
    line_limit: Option<usize>,
}

impl RulekitConfig {
    /// Build a configuration from defaults only, rooted at `repo_root`.
    pub fn defaults(repo_root: PathBuf) -> Self {
        Self {
            repo_root,
            rules_dir: PathBuf::from(".cursor/rules"),
            tool_registry: PathBuf::from(".cursor/rules/tools/tool_registry.json"),
            role_library: PathBuf::from(".cursor/rules/tools/role_library.json"),
            domains_dir: PathBuf::from(".cursor/rules/domains"),
            roles_output_dir: PathBuf::from(".cursor/rules/roles"),
            technical_domains: DEFAULT_TECHNICAL_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            line_limit: DEFAULT_LINE_LIMIT,
        }
    }

    /// Load configuration for `repo_root`, reading `rulekit.json` when it
    /// exists. Missing or malformed files fall back to defaults.
    pub fn load(repo_root: PathBuf, config_path: Option<&Path>) -> Self {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => repo_root.join("rulekit.json"),
        };

        let mut config = Self::defaults(repo_root);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return config;
            }
        };

        let file: ConfigFile = match serde_json::from_str(&raw) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "malformed config, using defaults");
                return config;
            }
        };

        if let Some(p) = file.paths.rules_dir {
            config.rules_dir = p;
        }
        if let Some(p) = file.paths.tool_registry {
            config.tool_registry = p;
        }
        if let Some(p) = file.paths.role_library {
            config.role_library = p;
        }
        if let Some(p) = file.paths.domains_dir {
            config.domains_dir = p;
        }
        if let Some(p) = file.paths.roles_output_dir {
            config.roles_output_dir = p;
        }
        if let Some(domains) = file.validation.technical_domains {
            config.technical_domains = domains;
        }
        if let Some(limit) = file.validation.line_limit {
            config.line_limit = limit;
        }
        config
    }

    /// Absolute path of the tool registry document.
    pub fn tool_registry_path(&self) -> PathBuf {
        self.repo_root.join(&self.tool_registry)
    }

    /// Absolute path of the role library document.
    pub fn role_library_path(&self) -> PathBuf {
        self.repo_root.join(&self.role_library)
    }

    /// Absolute path of the domains directory.
    pub fn domains_dir_path(&self) -> PathBuf {
        self.repo_root.join(&self.domains_dir)
    }

    /// Absolute path of the roles output directory.
    pub fn roles_output_path(&self) -> PathBuf {
        self.repo_root.join(&self.roles_output_dir)
    }
}

/// Walk up from `start` looking for a directory that contains
/// `rulekit.json` or a `.cursor/` tree. Returns `None` when no marker is
/// found before the filesystem root.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join("rulekit.json").is_file() || dir.join(".cursor").is_dir() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
