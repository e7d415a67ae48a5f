//! Relations between map graph nodes.

use std::fmt;

use serde::Serialize;

use crate::identifier::NodeId;

/// The semantic class of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// The source enables the target trigger, or sets the target variable.
    Enable,
    /// The source disables the target trigger, or clears the target variable.
    Disable,
    /// The source destroys the target trigger.
    Destroy,
    /// The source forces the target trigger to fire.
    Force,
    /// Two triggers share a link chain.
    Link,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdgeKind::Enable => "enable",
            EdgeKind::Disable => "disable",
            EdgeKind::Destroy => "destroy",
            EdgeKind::Force => "force",
            EdgeKind::Link => "link",
        };
        f.write_str(name)
    }
}

/// An edge of the map graph.
///
/// `link` edges are undirected. Every other edge points from the actor to
/// its subject, except variable reads which point from the variable to the
/// trigger whose event reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
    pub directed: bool,
    pub dashed: bool,
}

impl Edge {
    /// Creates a solid directed edge.
    pub fn directed(from: NodeId, to: NodeId, kind: EdgeKind) -> Self {
        Self {
            from,
            to,
            kind,
            directed: true,
            dashed: false,
        }
    }

    /// Creates an undirected `link` edge between two triggers.
    pub fn link(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            kind: EdgeKind::Link,
            directed: false,
            dashed: false,
        }
    }

    /// Marks the edge as dashed. Variable relations are drawn dashed.
    pub fn with_dashes(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_edge_is_undirected() {
        let edge = Edge::link(NodeId::trigger("a"), NodeId::trigger("b"));
        assert_eq!(edge.kind, EdgeKind::Link);
        assert!(!edge.directed);
        assert!(!edge.dashed);
    }

    #[test]
    fn test_directed_dashed_edge() {
        let edge = Edge::directed(NodeId::local("5"), NodeId::trigger("t"), EdgeKind::Enable)
            .with_dashes(true);
        assert!(edge.directed);
        assert!(edge.dashed);
        assert_eq!(edge.from, "L5");
    }

    #[test]
    fn test_edge_kind_display() {
        assert_eq!(EdgeKind::Destroy.to_string(), "destroy");
        assert_eq!(EdgeKind::Force.to_string(), "force");
    }
}
