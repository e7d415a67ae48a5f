//! The warning diagnostic type.

use std::fmt;

use crate::{
    error::{label::Label, warning_code::WarningCode},
    span::Span,
};

/// A warning about the map data, with optional source locations.
///
/// # Example
///
/// ```text
/// warning[W102]: Tag 01000009 refers to non-existent trigger!
///    |
/// 42 | 01000009=0,lost tag,01009999
///    | ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ tag defined here
///    |
///    = help: point the tag at a trigger listed in [Triggers]
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: Option<WarningCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    /// Get the warning code, if any.
    pub fn code(&self) -> Option<WarningCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the warning code.
    pub fn with_code(mut self, code: WarningCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[W100]: message" or "warning: message"
        write!(f, "warning")?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::warning("There are no triggers in this map!");

        assert_eq!(diag.message(), "There are no triggers in this map!");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::warning("ID 01000000 duplicated!")
            .with_code(WarningCode::W101)
            .with_label(Span::new(100..120), "duplicate definition")
            .with_secondary_label(Span::new(50..70), "first defined here")
            .with_help("give every trigger a unique ID");

        assert_eq!(diag.code(), Some(WarningCode::W101));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(diag.help(), Some("give every trigger a unique ID"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::warning("Trigger 01 doesn't have any tags!").with_code(WarningCode::W103);
        assert_eq!(
            diag.to_string(),
            "warning[W103]: Trigger 01 doesn't have any tags!"
        );

        let plain = Diagnostic::warning("something odd");
        assert_eq!(plain.to_string(), "warning: something odd");
    }
}
