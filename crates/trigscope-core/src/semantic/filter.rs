//! Node visibility filtering by kind and difficulty.

use crate::semantic::{model::MapModel, node::Node};

/// Which nodes a viewer shows.
///
/// A trigger is visible when one of its difficulties is selected. With
/// triggers switched off, triggers that neighbour a variable stay visible
/// so variable relations remain readable. Variables follow `variables`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeFilter {
    pub triggers: bool,
    pub variables: bool,
    pub easy: bool,
    pub normal: bool,
    pub hard: bool,
}

impl Default for NodeFilter {
    fn default() -> Self {
        Self {
            triggers: true,
            variables: true,
            easy: true,
            normal: true,
            hard: true,
        }
    }
}

impl NodeFilter {
    /// Returns whether `node` is visible in `model`.
    pub fn accepts(&self, node: &Node, model: &MapModel) -> bool {
        match node {
            Node::Trigger(trigger) => {
                if !self.triggers {
                    let has_variable_neighbour = trigger
                        .neighbours()
                        .iter()
                        .any(|id| matches!(model.node(id.as_str()), Some(Node::Variable(_))));
                    if !has_variable_neighbour {
                        return false;
                    }
                }
                let difficulty = trigger.difficulty();
                (difficulty.easy && self.easy)
                    || (difficulty.normal && self.normal)
                    || (difficulty.hard && self.hard)
            }
            Node::Variable(_) => self.variables,
        }
    }

    /// Returns the visible nodes of `model` in model order.
    pub fn visible<'a>(&self, model: &'a MapModel) -> Vec<&'a Node> {
        model
            .nodes()
            .filter(|node| self.accepts(node, model))
            .collect()
    }
}
