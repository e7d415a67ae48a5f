//! Loading of the opcode definition table.
//!
//! Definition files are JSON documents with an `events` and an `actions`
//! list. Each list is either an array indexed by opcode or an object keyed by
//! opcode; entries carry a `name`, a `description` and, for actions, the
//! per-slot arity list `p`.

use std::{fs, path::Path};

use log::{debug, info};

use trigscope_core::opcode::OpcodeTable;

use crate::TrigscopeError;

/// Parses an opcode table from JSON text.
pub fn parse_opcode_table(json: &str) -> Result<OpcodeTable, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads and parses the opcode table at `path`.
pub fn load_opcode_table(path: &Path) -> Result<OpcodeTable, TrigscopeError> {
    debug!(path:? = path; "Reading opcode definitions");
    let json = fs::read_to_string(path)?;
    let table = parse_opcode_table(&json).map_err(|source| TrigscopeError::Definitions {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path:? = path, empty = table.is_empty(); "Opcode definitions loaded");
    Ok(table)
}
