//! Configuration types for trigscope map analysis.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file by the command line tool.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`DefinitionsConfig`] - Where the opcode definition table is loaded from.
//! - [`ResolverConfig`] - Alias keys used by cross-reference lookups.
//!
//! # Example
//!
//! ```
//! # use trigscope::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.definitions().path().is_none());
//! assert_eq!(config.resolver().aliases().script_keys[0], "Script");
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use trigscope_parser::LinkAliases;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Opcode definition section.
    #[serde(default)]
    definitions: DefinitionsConfig,

    /// Cross-reference resolver section.
    #[serde(default)]
    resolver: ResolverConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(definitions: DefinitionsConfig, resolver: ResolverConfig) -> Self {
        Self {
            definitions,
            resolver,
        }
    }

    /// Returns the definitions configuration.
    pub fn definitions(&self) -> &DefinitionsConfig {
        &self.definitions
    }

    /// Returns the resolver configuration.
    pub fn resolver(&self) -> &ResolverConfig {
        &self.resolver
    }
}

/// Location of the opcode definition table.
///
/// Without a path, events and actions are described as `Unknown`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefinitionsConfig {
    /// Path to a JSON opcode definition file.
    #[serde(default)]
    path: Option<PathBuf>,
}

impl DefinitionsConfig {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Returns the configured definition file path.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Alias keys for following references from an entity.
///
/// Unset lists fall back to the defaults of [`LinkAliases`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    script_keys: Option<Vec<String>>,

    #[serde(default)]
    task_force_keys: Option<Vec<String>>,
}

impl ResolverConfig {
    pub fn new(script_keys: Option<Vec<String>>, task_force_keys: Option<Vec<String>>) -> Self {
        Self {
            script_keys,
            task_force_keys,
        }
    }

    /// Returns the effective alias lists.
    pub fn aliases(&self) -> LinkAliases {
        let defaults = LinkAliases::default();
        LinkAliases {
            script_keys: self.script_keys.clone().unwrap_or(defaults.script_keys),
            task_force_keys: self
                .task_force_keys
                .clone()
                .unwrap_or(defaults.task_force_keys),
        }
    }
}
