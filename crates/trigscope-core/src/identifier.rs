//! Node identifiers for the map graph.
//!
//! Trigger nodes use the trigger key from the `Triggers` section verbatim.
//! Variable nodes use the reserved prefixes `L` (local) and `G` (global)
//! followed by the numeric variable index.

use std::{borrow::Borrow, fmt};

use serde::Serialize;

/// Prefix reserved for local variable nodes.
pub const LOCAL_PREFIX: char = 'L';

/// Prefix reserved for global variable nodes.
pub const GLOBAL_PREFIX: char = 'G';

/// Identifier of a node in the map graph.
///
/// # Examples
///
/// ```
/// use trigscope_core::identifier::NodeId;
///
/// let trigger = NodeId::trigger("01000003");
/// let local = NodeId::local("5");
/// let global = NodeId::global("12");
///
/// assert_eq!(trigger, "01000003");
/// assert_eq!(local, "L5");
/// assert_eq!(global, "G12");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates the identifier of a trigger node from its `Triggers` key.
    pub fn trigger(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Creates the identifier of a local variable node (`L<index>`).
    pub fn local(index: &str) -> Self {
        Self(format!("{LOCAL_PREFIX}{index}"))
    }

    /// Creates the identifier of a global variable node (`G<index>`).
    pub fn global(index: &str) -> Self {
        Self(format!("{GLOBAL_PREFIX}{index}"))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
