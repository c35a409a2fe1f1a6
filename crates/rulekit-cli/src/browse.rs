//! # Browse Subcommand
//!
//! `rulekit browse tools|roles|domains` — read-only listings over the
//! configured registries. Plain text by default, pretty JSON with
//! `--json` for piping into other tools.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::{json, Map, Value};

use rulekit_core::{RoleKind, RulekitConfig};
use rulekit_registry::loader;

/// Arguments for the `rulekit browse` subcommand.
#[derive(Args, Debug)]
pub struct BrowseArgs {
    #[command(subcommand)]
    pub command: BrowseCommand,
}

/// Browse subcommands.
#[derive(Subcommand, Debug)]
pub enum BrowseCommand {
    /// List tools from the tool registry, grouped by category.
    Tools {
        /// Emit pretty-printed JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List roles from the role library.
    Roles {
        /// Emit pretty-printed JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List domains from the registry metadata.
    Domains {
        /// Emit pretty-printed JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// Execute the browse subcommand.
pub fn run_browse(args: &BrowseArgs, config: &RulekitConfig) -> Result<u8> {
    match args.command {
        BrowseCommand::Tools { json } => cmd_tools(&config.tool_registry_path(), json),
        BrowseCommand::Roles { json } => cmd_roles(&config.role_library_path(), json),
        BrowseCommand::Domains { json } => cmd_domains(&config.tool_registry_path(), json),
    }
}

fn load_or_report(path: &Path, what: &str) -> Result<Value, u8> {
    let outcome = loader::load(path);
    let document = outcome.document();
    if document.as_object().map_or(true, Map::is_empty) {
        if let Some(reason) = outcome.failure() {
            println!("Error: {reason}");
        }
        println!("No {what} found. Ensure {} exists and is correctly formatted.", path.display());
        return Err(1);
    }
    Ok(document)
}

fn cmd_tools(registry_path: &Path, as_json: bool) -> Result<u8> {
    let document = match load_or_report(registry_path, "tools") {
        Ok(document) => document,
        Err(code) => return Ok(code),
    };

    // Rows of (category, tool, category description), sorted.
    let mut rows: Vec<(String, String, String)> = Vec::new();
    if let Some(categories) = document.get("tool_categories").and_then(Value::as_object) {
        for (category, record) in categories {
            let description = record
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("-")
                .to_string();
            let tools = record
                .get("tools")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .filter_map(Value::as_str);
            for tool in tools {
                rows.push((category.clone(), tool.to_string(), description.clone()));
            }
        }
    }
    rows.sort();

    if rows.is_empty() {
        println!("No tools to display.");
        return Ok(1);
    }

    if as_json {
        let items: Vec<Value> = rows
            .iter()
            .map(|(category, tool, description)| {
                json!({ "name": tool, "category": category, "description": description })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(0);
    }

    println!("Tools ({}):", rows.len());
    for (category, tool, description) in &rows {
        println!("  {tool} [{category}] - {description}");
    }
    Ok(0)
}

fn cmd_roles(library_path: &Path, as_json: bool) -> Result<u8> {
    let document = match load_or_report(library_path, "roles") {
        Ok(document) => document,
        Err(code) => return Ok(code),
    };

    if as_json {
        let mut items: Vec<Value> = Vec::new();
        for kind in RoleKind::all() {
            if let Some(roles) = document.get(kind.as_str()).and_then(Value::as_object) {
                for (name, record) in roles {
                    let identity = record.get("identity");
                    items.push(json!({
                        "name": name,
                        "type": kind.as_str(),
                        "seniority": identity.and_then(|i| i.get("seniority")),
                        "scope": identity.and_then(|i| i.get("scope")),
                    }));
                }
            }
        }
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(0);
    }

    for kind in RoleKind::all() {
        let Some(roles) = document.get(kind.as_str()).and_then(Value::as_object) else {
            continue;
        };
        println!("{} roles ({}):", capitalize(kind.as_str()), roles.len());
        for (name, record) in roles {
            let identity = record.get("identity");
            let seniority = identity
                .and_then(|i| i.get("seniority"))
                .and_then(Value::as_str)
                .unwrap_or("-");
            let scope = identity
                .and_then(|i| i.get("scope"))
                .and_then(Value::as_str)
                .unwrap_or("-");
            println!("  {name} - seniority: {seniority}, scope: {scope}");
        }
        println!();
    }
    Ok(0)
}

fn cmd_domains(registry_path: &Path, as_json: bool) -> Result<u8> {
    let document = match load_or_report(registry_path, "domains") {
        Ok(document) => document,
        Err(code) => return Ok(code),
    };

    let metadata = document
        .get("domain_metadata")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let mappings = document
        .get("domain_mappings")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    if metadata.is_empty() && mappings.is_empty() {
        println!("No domains to display.");
        return Ok(1);
    }

    if as_json {
        let items: Vec<Value> = metadata
            .iter()
            .map(|(name, record)| {
                json!({
                    "name": name,
                    "status": record.get("status"),
                    "description": record.get("description"),
                    "categories": mappings.get(name).cloned().unwrap_or(Value::Null),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(0);
    }

    println!("Domains ({}):", metadata.len());
    for (name, record) in &metadata {
        let status = record.get("status").and_then(Value::as_str).unwrap_or("-");
        let description = record
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("-");
        let categories = mappings
            .get(name)
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        println!("  {name} [{status}] - {description} ({categories} categories)");
    }
    Ok(0)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
