//! Warning codes for the trigscope diagnostic system.
//!
//! Codes are organized by class:
//! - `W1xx` - Structural warnings (missing or inconsistent map data)
//! - `W2xx` - Record decode warnings (malformed event or action streams)

use std::fmt;

/// Codes for categorizing warning diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    // =========================================================================
    // Structural Warnings (W1xx)
    // =========================================================================
    /// The map has no `Triggers` section.
    W100,

    /// An ID was defined more than once.
    ///
    /// The first node created under the ID is kept.
    W101,

    /// A tag references a trigger that does not exist.
    W102,

    /// A trigger group has no tags and is left out of the graph.
    W103,

    /// A trigger links to a trigger that does not exist.
    W104,

    /// A chain of trigger links loops back on itself.
    W105,

    /// A numeric trigger field could not be read.
    W106,

    /// A tag carries a repeat mode other than 0, 1 or 2.
    W107,

    // =========================================================================
    // Record Decode Warnings (W2xx)
    // =========================================================================
    /// An event record could not be fully decoded.
    W200,

    /// An action record could not be fully decoded.
    W201,
}

impl WarningCode {
    /// Returns the code as a string (e.g., "W100").
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::W100 => "W100",
            WarningCode::W101 => "W101",
            WarningCode::W102 => "W102",
            WarningCode::W103 => "W103",
            WarningCode::W104 => "W104",
            WarningCode::W105 => "W105",
            WarningCode::W106 => "W106",
            WarningCode::W107 => "W107",
            WarningCode::W200 => "W200",
            WarningCode::W201 => "W201",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            WarningCode::W100 => "no triggers section",
            WarningCode::W101 => "duplicate id",
            WarningCode::W102 => "tag references missing trigger",
            WarningCode::W103 => "trigger without tags",
            WarningCode::W104 => "link to missing trigger",
            WarningCode::W105 => "cyclic trigger link",
            WarningCode::W106 => "malformed trigger field",
            WarningCode::W107 => "invalid repeat mode",
            WarningCode::W200 => "malformed event record",
            WarningCode::W201 => "malformed action record",
        }
    }

    /// Returns `true` for record decode warnings.
    pub fn is_decode(&self) -> bool {
        matches!(self, WarningCode::W200 | WarningCode::W201)
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_code_display() {
        assert_eq!(WarningCode::W100.to_string(), "W100");
        assert_eq!(WarningCode::W201.to_string(), "W201");
    }

    #[test]
    fn test_warning_code_description() {
        assert_eq!(WarningCode::W103.description(), "trigger without tags");
        assert_eq!(WarningCode::W105.description(), "cyclic trigger link");
    }

    #[test]
    fn test_decode_class() {
        assert!(WarningCode::W200.is_decode());
        assert!(!WarningCode::W101.is_decode());
    }
}
