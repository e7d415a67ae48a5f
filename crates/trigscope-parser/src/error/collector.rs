//! Collector for accumulating warnings during a parse.

use log::debug;

use crate::error::Diagnostic;

/// Accumulates warnings in emission order.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        debug!(code:? = diagnostic.code(); "{}", diagnostic.message());
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection and return the warnings in emission order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
