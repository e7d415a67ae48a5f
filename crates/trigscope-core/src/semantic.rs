//! Semantic model types for map trigger graphs.
//!
//! This module contains the typed output of the map model builder:
//! - [`Node`] - A trigger or a variable node
//! - [`Edge`] - A relation between two nodes
//! - [`EventRecord`] and [`ActionRecord`] - Decoded trigger parameter streams
//! - [`MapModel`] - The node and edge collection handed to renderers
//! - [`NodeFilter`] - Difficulty and kind based node visibility

mod edge;
mod filter;
mod model;
mod node;
mod record;

pub use edge::{Edge, EdgeKind};
pub use filter::NodeFilter;
pub use model::{MapModel, ModelStats};
pub use node::{Difficulty, Node, RepeatMode, TriggerNode, VariableNode, VariableScope};
pub use record::{ACTION_PARAM_SLOTS, ActionRecord, EventRecord, RecordKind};
