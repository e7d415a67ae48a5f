//! Trigscope - trigger graph analysis for real-time strategy map files.
//!
//! Parses the trigger, tag, event, action and variable sections of a map into
//! a graph of triggers and variables, describes records through an opcode
//! definition table, and looks up auxiliary entities such as teams and their
//! scripts.

pub mod config;
pub mod definitions;
pub mod export;

mod error;

pub use trigscope_core::{identifier, opcode, semantic, waypoint};
pub use trigscope_parser::{Bundle, LinkAliases, MergedEntity, ParsedMap};

pub use error::TrigscopeError;

use log::{debug, info, trace};

use config::AppConfig;
use opcode::OpcodeTable;
use semantic::TriggerNode;
use trigscope_parser::Resolver;

/// Entry point for analysing map files.
///
/// # Examples
///
/// ```rust
/// use trigscope::{MapAnalyzer, config::AppConfig};
///
/// let source = "\
/// [Triggers]
/// 01000000=Soviet,<none>,Intro,0,1,1,1
/// [Tags]
/// 01000001=0,Intro tag,01000000
/// ";
///
/// let analyzer = MapAnalyzer::new(AppConfig::default());
/// let parsed = analyzer.analyze(source);
/// assert_eq!(parsed.model.stats().triggers, 1);
///
/// let report = analyzer.describe(&parsed, "01000000").unwrap();
/// assert!(report.starts_with("Name: Intro"));
/// ```
#[derive(Default)]
pub struct MapAnalyzer {
    config: AppConfig,
    opcodes: OpcodeTable,
}

impl MapAnalyzer {
    /// Create a new analyzer with the given configuration and an empty
    /// opcode table.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            opcodes: OpcodeTable::default(),
        }
    }

    /// Create an analyzer and load the opcode table named by the
    /// configuration, if any.
    ///
    /// # Errors
    ///
    /// Returns `TrigscopeError` if the definition file cannot be read or
    /// parsed.
    pub fn from_config(config: AppConfig) -> Result<Self, TrigscopeError> {
        let opcodes = match config.definitions().path() {
            Some(path) => definitions::load_opcode_table(path)?,
            None => {
                debug!("No opcode definitions configured");
                OpcodeTable::default()
            }
        };
        Ok(Self { config, opcodes })
    }

    /// Replace the opcode table.
    pub fn with_opcodes(mut self, opcodes: OpcodeTable) -> Self {
        self.opcodes = opcodes;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn opcodes(&self) -> &OpcodeTable {
        &self.opcodes
    }

    /// Parse map text into the trigger graph and its warnings.
    ///
    /// This never fails; problems with the map data are reported in
    /// [`ParsedMap::warnings`].
    pub fn analyze(&self, source: &str) -> ParsedMap {
        info!(bytes = source.len(); "Analyzing map");
        let parsed = trigscope_parser::parse(source);
        trace!(stats:? = parsed.model.stats(); "Map analyzed");
        parsed
    }

    /// Render the detail report of node `id`.
    ///
    /// # Errors
    ///
    /// Returns `TrigscopeError::NodeNotFound` when the model has no such node.
    pub fn describe(&self, parsed: &ParsedMap, id: &str) -> Result<String, TrigscopeError> {
        let node = parsed
            .model
            .node(id)
            .ok_or_else(|| TrigscopeError::NodeNotFound(id.to_string()))?;
        Ok(export::text::node_report(node, &self.opcodes))
    }

    /// Triggers whose label or ID contains `query`, ignoring case.
    pub fn search<'a>(&self, parsed: &'a ParsedMap, query: &str) -> Vec<&'a TriggerNode> {
        let found = parsed.model.search(query);
        debug!(query, found = found.len(); "Searched triggers");
        found
    }

    /// Look up entity `id` in `source` and follow its references.
    pub fn inspect<'src>(&self, source: &'src str, id: &str) -> Bundle<'src> {
        info!(id; "Inspecting entity");
        Resolver::new(source, self.config.resolver().aliases()).resolve_bundle(id)
    }
}
