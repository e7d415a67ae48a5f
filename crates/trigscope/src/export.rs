//! Export functionality for parsed maps.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! writing a [`ParsedMap`] to an output format. It is the final stage in the
//! trigscope processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Map Text
//!     ↓ parse
//! ParsedMap (MapModel + warnings)
//!     ↓ export (this module)
//! Output
//! ```
//!
//! # Available Backends
//!
//! - [`json`] - The graph as a JSON document via [`json::JsonExporter`]
//! - [`text`] - Plain text reports and the summary via [`text::SummaryExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering serialization failures and
//! I/O errors. [`Error`] converts into [`TrigscopeError::Export`] at the
//! crate boundary.
//!
//! [`TrigscopeError::Export`]: crate::TrigscopeError::Export

/// JSON graph export backend.
pub mod json;

/// Plain text reports.
pub mod text;

use trigscope_parser::ParsedMap;

/// Abstraction for map export backends.
pub trait Exporter {
    /// Exports a parsed map to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the map cannot be encoded, or
    /// [`Error::Io`] if writing the output fails.
    fn export_map(&mut self, parsed: &ParsedMap) -> Result<(), Error>;
}

/// Errors that can occur during map export.
#[derive(Debug)]
pub enum Error {
    /// The output document could not be encoded.
    Serialize(serde_json::Error),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "Serialization error: {err}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
