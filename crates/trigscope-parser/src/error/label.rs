//! Labeled source spans for warnings.

use crate::span::Span;

/// Whether a label marks the offending line or only adds context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    /// The line the warning is about.
    Primary,
    /// A related line, such as the first definition of a duplicated ID.
    Context,
}

/// A message attached to a span of map source.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    role: LabelRole,
}

impl Label {
    fn with_role(role: LabelRole, span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            role,
        }
    }

    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self::with_role(LabelRole::Primary, span, message)
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self::with_role(LabelRole::Context, span, message)
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn role(&self) -> LabelRole {
        self.role
    }

    pub fn is_primary(&self) -> bool {
        self.role == LabelRole::Primary
    }

    pub fn is_secondary(&self) -> bool {
        self.role == LabelRole::Context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles() {
        let label = Label::primary(Span::new(3..9), "tag defined here");
        assert_eq!(label.role(), LabelRole::Primary);
        assert_eq!(label.span().len(), 6);
        assert_eq!(label.message(), "tag defined here");

        let context = Label::secondary(Span::new(0..3), "first defined here");
        assert!(context.is_secondary());
        assert!(!context.is_primary());
    }
}
