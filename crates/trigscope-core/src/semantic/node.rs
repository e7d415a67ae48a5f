//! Trigger and variable nodes.

use std::fmt;

use indexmap::IndexSet;
use serde::Serialize;

use crate::{
    identifier::NodeId,
    semantic::record::{ActionRecord, EventRecord},
};

/// How a trigger re-arms after firing, taken from its group's first tag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum RepeatMode {
    /// `0`: fires once, when any event holds.
    #[default]
    OneTimeOr,
    /// `1`: fires once, when all events hold.
    OneTimeAnd,
    /// `2`: fires every time any event holds.
    RepeatingOr,
}

impl RepeatMode {
    /// Maps the numeric tag field to a repeat mode.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::OneTimeOr),
            1 => Some(Self::OneTimeAnd),
            2 => Some(Self::RepeatingOr),
            _ => None,
        }
    }

    /// Returns the numeric tag field value.
    pub fn code(self) -> u8 {
        match self {
            Self::OneTimeOr => 0,
            Self::OneTimeAnd => 1,
            Self::RepeatingOr => 2,
        }
    }

    /// Returns a short human readable meaning.
    pub fn description(self) -> &'static str {
        match self {
            Self::OneTimeOr => "one time OR",
            Self::OneTimeAnd => "one time AND",
            Self::RepeatingOr => "repeating OR",
        }
    }
}

impl From<RepeatMode> for u8 {
    fn from(mode: RepeatMode) -> Self {
        mode.code()
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

/// Difficulty levels a trigger is active on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Difficulty {
    pub easy: bool,
    pub normal: bool,
    pub hard: bool,
}

/// A trigger node.
///
/// Created once per unique trigger ID; after construction only neighbour
/// links are added.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerNode {
    id: NodeId,
    label: String,
    house: String,
    #[serde(flatten)]
    difficulty: Difficulty,
    disabled: bool,
    link: Option<NodeId>,
    repeat: RepeatMode,
    tags: Vec<String>,
    events: Vec<EventRecord>,
    actions: Vec<ActionRecord>,
    neighbours: IndexSet<NodeId>,
}

impl TriggerNode {
    /// Creates a trigger node with no tags, records or link.
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            house: String::new(),
            difficulty: Difficulty::default(),
            disabled: false,
            link: None,
            repeat: RepeatMode::default(),
            tags: Vec::new(),
            events: Vec::new(),
            actions: Vec::new(),
            neighbours: IndexSet::new(),
        }
    }

    pub fn with_house(mut self, house: impl Into<String>) -> Self {
        self.house = house.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_link(mut self, link: Option<NodeId>) -> Self {
        self.link = link;
        self
    }

    pub fn with_repeat(mut self, repeat: RepeatMode) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_events(mut self, events: Vec<EventRecord>) -> Self {
        self.events = events;
        self
    }

    pub fn with_actions(mut self, actions: Vec<ActionRecord>) -> Self {
        self.actions = actions;
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn house(&self) -> &str {
        &self.house
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Returns the linked trigger, or `None` for `<none>`.
    pub fn link(&self) -> Option<&NodeId> {
        self.link.as_ref()
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    pub fn neighbours(&self) -> &IndexSet<NodeId> {
        &self.neighbours
    }
}

/// Whether a variable is local to the map or global to the campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableScope {
    Local,
    Global,
}

/// A local or global variable node.
#[derive(Debug, Clone, Serialize)]
pub struct VariableNode {
    id: NodeId,
    label: String,
    scope: VariableScope,
    init_value: Option<String>,
    neighbours: IndexSet<NodeId>,
}

impl VariableNode {
    /// Creates a local variable node declared in `VariableNames`.
    pub fn local(index: &str, label: impl Into<String>, init_value: Option<String>) -> Self {
        Self {
            id: NodeId::local(index),
            label: label.into(),
            scope: VariableScope::Local,
            init_value,
            neighbours: IndexSet::new(),
        }
    }

    /// Creates a global variable node first referenced by a trigger.
    pub fn global(index: &str) -> Self {
        Self {
            id: NodeId::global(index),
            label: format!("Global Variable {index}"),
            scope: VariableScope::Global,
            init_value: None,
            neighbours: IndexSet::new(),
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn scope(&self) -> VariableScope {
        self.scope
    }

    pub fn init_value(&self) -> Option<&str> {
        self.init_value.as_deref()
    }

    pub fn neighbours(&self) -> &IndexSet<NodeId> {
        &self.neighbours
    }
}

/// A node of the map graph.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Trigger(TriggerNode),
    Variable(VariableNode),
}

impl Node {
    pub fn id(&self) -> &NodeId {
        match self {
            Node::Trigger(trigger) => trigger.id(),
            Node::Variable(variable) => variable.id(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Node::Trigger(trigger) => trigger.label(),
            Node::Variable(variable) => variable.label(),
        }
    }

    pub fn neighbours(&self) -> &IndexSet<NodeId> {
        match self {
            Node::Trigger(trigger) => trigger.neighbours(),
            Node::Variable(variable) => variable.neighbours(),
        }
    }

    pub fn as_trigger(&self) -> Option<&TriggerNode> {
        match self {
            Node::Trigger(trigger) => Some(trigger),
            Node::Variable(_) => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableNode> {
        match self {
            Node::Trigger(_) => None,
            Node::Variable(variable) => Some(variable),
        }
    }

    pub(crate) fn add_neighbour(&mut self, id: NodeId) {
        match self {
            Node::Trigger(trigger) => trigger.neighbours.insert(id),
            Node::Variable(variable) => variable.neighbours.insert(id),
        };
    }
}
