//! # Trigscope Parser
//!
//! Tolerant parser for map files. This crate turns the raw text of a map
//! into a trigger graph and answers cross-reference lookups over the same
//! text.
//!
//! ## Usage
//!
//! ```
//! # use trigscope_parser::parse;
//!
//! let source = "\
//! [Triggers]
//! 01000000=Soviet,<none>,Intro,0,1,1,1
//! [Tags]
//! 01000001=0,Intro tag,01000000
//! ";
//!
//! let parsed = parse(source);
//! assert_eq!(parsed.model.nodes_count(), 1);
//! assert!(parsed.warnings.is_empty());
//! ```

pub mod decode;
mod elaborate;
pub mod error;
pub mod grouping;
pub mod lexer;
pub mod resolve;
pub mod section;
mod span;

pub use elaborate::ParsedMap;
pub use resolve::{Bundle, LinkAliases, Resolver};
pub use section::MergedEntity;
pub use span::Span;

use elaborate::Builder;

/// Parse map source text into a trigger graph.
///
/// This is the main entry point of the crate. It runs the whole pipeline:
///
/// 1. **Lex** - Classify every physical line
/// 2. **Sections** - Build the single-pass section store
/// 3. **Group** - Resolve trigger link chains and attach tags
/// 4. **Elaborate** - Decode parameter streams and build nodes and edges
///
/// Parsing never fails. Problems with the map data are returned as warnings
/// in [`ParsedMap::warnings`] next to a best-effort model.
pub fn parse(source: &str) -> ParsedMap {
    Builder::new(source).build()
}
