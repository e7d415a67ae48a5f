//! Warning diagnostics for the trigscope parser.
//!
//! Map parsing never fails: every data-quality problem becomes a
//! [`Diagnostic`] in the warnings list and the parse continues. A diagnostic
//! carries:
//! - A warning code for documentation and searchability
//! - The primary message, worded for end users
//! - Labeled spans pointing at the offending source lines
//! - Optional help text
//!
//! # Example
//!
//! ```
//! # use trigscope_parser::error::{Diagnostic, WarningCode};
//! # use trigscope_parser::Span;
//!
//! let diag = Diagnostic::warning("Tag 01000004 refers to non-existent trigger!")
//!     .with_code(WarningCode::W102)
//!     .with_label(Span::new(120..148), "tag defined here")
//!     .with_help("point the tag at a trigger listed in [Triggers]");
//! ```

mod collector;
mod diagnostic;
mod label;
mod warning_code;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use label::{Label, LabelRole};
pub use warning_code::WarningCode;
