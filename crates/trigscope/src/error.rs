//! Error types for trigscope operations.
//!
//! Map parsing itself never fails; problems with map data are warnings on
//! the parse result. [`TrigscopeError`] covers the operations around it:
//! reading definition files, looking up nodes and writing exports.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for trigscope operations.
#[derive(Debug, Error)]
pub enum TrigscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid opcode definitions in {}: {source}", path.display())]
    Definitions {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no node with ID `{0}` in this map")]
    NodeNotFound(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for TrigscopeError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
