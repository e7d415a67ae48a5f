//! Adapters for rendering trigscope warnings and errors through miette.
//!
//! This module provides the bridge between the library's plain diagnostic
//! and error types and miette's rich report formatting used in the CLI.
//! Map warnings carry source spans and render with snippets of the map;
//! errors render as plain reports with a code.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, Severity, SourceSpan,
};

use trigscope::TrigscopeError;
use trigscope_parser::{
    Span,
    error::{Diagnostic, LabelRole},
};

/// Adapter for a single map warning.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Map source for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Warning)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            match label.role() {
                LabelRole::Primary => LabeledSpan::new_primary_with_span(message, span),
                LabelRole::Context => LabeledSpan::new_with_span(message, span),
            }
        })))
    }
}

/// Adapter for [`TrigscopeError`].
pub struct ErrorAdapter<'a>(pub &'a TrigscopeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TrigscopeError::Io(_) => "trigscope::io",
            TrigscopeError::Definitions { .. } => "trigscope::definitions",
            TrigscopeError::NodeNotFound(_) => "trigscope::node_not_found",
            TrigscopeError::Export(_) => "trigscope::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            TrigscopeError::NodeNotFound(_) => Some(Box::new(
                "use `search` to list trigger IDs; variables are named L<index> or G<index>",
            )),
            _ => None,
        }
    }
}

/// Convert a parser [`Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Wrap every warning of a parse for rendering against `src`.
pub fn warning_reportables<'a>(
    warnings: &'a [Diagnostic],
    src: &'a str,
) -> Vec<DiagnosticAdapter<'a>> {
    warnings
        .iter()
        .map(|diag| DiagnosticAdapter::new(diag, src))
        .collect()
}

/// Render a report with miette's graphical handler.
///
/// Falls back to the plain message if rendering fails.
pub fn render(report: &dyn MietteDiagnostic) -> String {
    let mut out = String::new();
    match GraphicalReportHandler::new().render_report(&mut out, report) {
        Ok(()) => out,
        Err(_) => report.to_string(),
    }
}
