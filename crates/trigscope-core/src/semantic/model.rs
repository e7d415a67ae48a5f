//! The map graph handed to rendering collaborators.

use indexmap::IndexMap;
use log::trace;
use serde::{Serialize, Serializer};

use crate::{
    identifier::NodeId,
    semantic::{
        edge::Edge,
        node::{Node, TriggerNode, VariableNode, VariableScope},
    },
};

/// Node and edge counts of a [`MapModel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModelStats {
    pub triggers: usize,
    pub local_variables: usize,
    pub global_variables: usize,
    pub edges: usize,
}

impl ModelStats {
    /// Total number of nodes.
    pub fn nodes(&self) -> usize {
        self.triggers + self.local_variables + self.global_variables
    }
}

/// Nodes in creation order plus the accumulated edge list.
///
/// Node IDs are unique: [`MapModel::insert_node`] keeps the first node
/// inserted under an ID.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MapModel {
    #[serde(serialize_with = "serialize_nodes")]
    nodes: IndexMap<NodeId, Node>,
    edges: Vec<Edge>,
}

impl MapModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node` unless a node with the same ID exists.
    ///
    /// Returns `false` when the ID was already taken.
    pub fn insert_node(&mut self, node: Node) -> bool {
        if self.nodes.contains_key(node.id()) {
            return false;
        }
        self.nodes.insert(node.id().clone(), node);
        true
    }

    pub fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn triggers(&self) -> impl Iterator<Item = &TriggerNode> {
        self.nodes.values().filter_map(Node::as_trigger)
    }

    pub fn variables(&self) -> impl Iterator<Item = &VariableNode> {
        self.nodes.values().filter_map(Node::as_variable)
    }

    /// Registers both endpoints of every edge as neighbours of each other.
    ///
    /// Edges with an endpoint that is not a node are left out.
    pub fn link_neighbours(&mut self) {
        for edge in &self.edges {
            if !self.nodes.contains_key(&edge.from) || !self.nodes.contains_key(&edge.to) {
                trace!(from = edge.from.as_str(), to = edge.to.as_str(); "Edge endpoint missing, skipping neighbours");
                continue;
            }
            if let Some(node) = self.nodes.get_mut(&edge.from) {
                node.add_neighbour(edge.to.clone());
            }
            if let Some(node) = self.nodes.get_mut(&edge.to) {
                node.add_neighbour(edge.from.clone());
            }
        }
    }

    /// Finds triggers whose label or ID contains `query`, ignoring case.
    ///
    /// An empty query matches every trigger.
    pub fn search(&self, query: &str) -> Vec<&TriggerNode> {
        let needle = query.to_lowercase();
        self.triggers()
            .filter(|trigger| {
                needle.is_empty()
                    || trigger.label().to_lowercase().contains(&needle)
                    || trigger.id().as_str().to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn stats(&self) -> ModelStats {
        let mut stats = ModelStats {
            edges: self.edges.len(),
            ..ModelStats::default()
        };
        for node in self.nodes.values() {
            match node {
                Node::Trigger(_) => stats.triggers += 1,
                Node::Variable(variable) => match variable.scope() {
                    VariableScope::Local => stats.local_variables += 1,
                    VariableScope::Global => stats.global_variables += 1,
                },
            }
        }
        stats
    }
}

fn serialize_nodes<S>(nodes: &IndexMap<NodeId, Node>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(nodes.values())
}
