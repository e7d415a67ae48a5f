//! Decoded event and action records.

use std::fmt;

use serde::Serialize;

/// Number of fixed parameter slots carried by every action record.
pub const ACTION_PARAM_SLOTS: usize = 7;

/// The parameter stream a record was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Event,
    Action,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Event => write!(f, "event"),
            RecordKind::Action => write!(f, "action"),
        }
    }
}

/// A single trigger condition decoded from an `Events` stream.
///
/// `opcode` is `None` when the opcode token was missing or not numeric.
/// `params` holds one token, or two when the stream flag was `2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub opcode: Option<i64>,
    pub params: Vec<String>,
}

impl EventRecord {
    /// Returns the first parameter token, or an empty string.
    pub fn first_param(&self) -> &str {
        self.params.first().map(String::as_str).unwrap_or_default()
    }
}

/// A single trigger effect decoded from an `Actions` stream.
///
/// Every action carries exactly [`ACTION_PARAM_SLOTS`] parameter tokens.
/// Tokens missing from a truncated stream are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    pub opcode: Option<i64>,
    pub params: [String; ACTION_PARAM_SLOTS],
}

impl ActionRecord {
    /// Returns the parameter token in `slot`, or an empty string.
    pub fn param(&self, slot: usize) -> &str {
        self.params.get(slot).map(String::as_str).unwrap_or_default()
    }
}
