//! Event and action parameter stream decoding.
//!
//! Both streams are comma separated token lists stored as the value of a
//! trigger's entry in the `Events` or `Actions` section.
//!
//! - Event streams start with a record count that is not used for traversal.
//!   Each record is `opcode,flag,param` or, when `flag` is `2`,
//!   `opcode,flag,param,param`. Decoding runs to the end of the stream.
//! - Action streams start with the declared record count `n`. Each record is
//!   an opcode followed by seven parameter slots. Decoding stops after `n`
//!   records even when more tokens follow.
//!
//! Decoding never fails. A record with a bad opcode or missing tokens is
//! still produced with best-effort fields, wrapped in [`Decoded::Partial`].
//!
//! Which records also relate two graph nodes is data, not code: see
//! [`EVENT_EDGE_RULES`] and [`ACTION_EDGE_RULES`].

use log::trace;
use thiserror::Error;

use trigscope_core::{
    identifier::NodeId,
    semantic::{ACTION_PARAM_SLOTS, ActionRecord, Edge, EdgeKind, EventRecord},
};

/// Tokens per action record: the opcode and its parameter slots.
const ACTION_RECORD_TOKENS: usize = 1 + ACTION_PARAM_SLOTS;

/// Event flag value announcing a second parameter token.
const TWO_PARAM_FLAG: i64 = 2;

/// Why a record or stream decoded only partially.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeIssue {
    #[error("opcode `{0}` is not a number")]
    InvalidOpcode(String),

    #[error("expected {expected} parameter tokens, found {found}")]
    MissingParams { expected: usize, found: usize },

    #[error("action count `{0}` is not a number")]
    InvalidCount(String),

    #[error("{declared} actions declared but only {found} present")]
    Truncated { declared: usize, found: usize },
}

/// A decoded record together with how completely it decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    Complete(T),
    Partial { record: T, issue: DecodeIssue },
}

impl<T> Decoded<T> {
    fn new(record: T, issue: Option<DecodeIssue>) -> Self {
        match issue {
            Some(issue) => Decoded::Partial { record, issue },
            None => Decoded::Complete(record),
        }
    }

    pub fn record(&self) -> &T {
        match self {
            Decoded::Complete(record) | Decoded::Partial { record, .. } => record,
        }
    }

    pub fn into_record(self) -> T {
        match self {
            Decoded::Complete(record) | Decoded::Partial { record, .. } => record,
        }
    }

    pub fn issue(&self) -> Option<&DecodeIssue> {
        match self {
            Decoded::Complete(_) => None,
            Decoded::Partial { issue, .. } => Some(issue),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Decoded::Complete(_))
    }
}

/// Decoded action stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionStream {
    pub records: Vec<Decoded<ActionRecord>>,
    /// A problem with the stream as a whole, such as a bad record count.
    pub issue: Option<DecodeIssue>,
}

/// Which node an edge rule connects the owning trigger to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeTarget {
    /// The trigger whose ID is the parameter.
    Trigger,
    /// The local variable `L<param>`.
    Local,
    /// The global variable `G<param>`, created on first reference.
    Global,
}

/// How one opcode relates its trigger to another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRule {
    pub opcode: i64,
    pub kind: EdgeKind,
    pub target: EdgeTarget,
    pub dashed: bool,
}

impl EdgeRule {
    const fn new(opcode: i64, kind: EdgeKind, target: EdgeTarget) -> Self {
        Self {
            opcode,
            kind,
            target,
            dashed: !matches!(target, EdgeTarget::Trigger),
        }
    }
}

/// Events that read a variable. Edges run from the variable to the trigger.
pub const EVENT_EDGE_RULES: &[EdgeRule] = &[
    EdgeRule::new(36, EdgeKind::Enable, EdgeTarget::Local),
    EdgeRule::new(37, EdgeKind::Disable, EdgeTarget::Local),
    EdgeRule::new(27, EdgeKind::Enable, EdgeTarget::Global),
    EdgeRule::new(28, EdgeKind::Disable, EdgeTarget::Global),
];

/// Actions that affect another node. Edges run from the trigger to the
/// affected node, which is named by parameter slot 1.
pub const ACTION_EDGE_RULES: &[EdgeRule] = &[
    EdgeRule::new(12, EdgeKind::Destroy, EdgeTarget::Trigger),
    EdgeRule::new(22, EdgeKind::Force, EdgeTarget::Trigger),
    EdgeRule::new(53, EdgeKind::Enable, EdgeTarget::Trigger),
    EdgeRule::new(54, EdgeKind::Disable, EdgeTarget::Trigger),
    EdgeRule::new(56, EdgeKind::Enable, EdgeTarget::Local),
    EdgeRule::new(57, EdgeKind::Disable, EdgeTarget::Local),
    EdgeRule::new(28, EdgeKind::Enable, EdgeTarget::Global),
    EdgeRule::new(29, EdgeKind::Disable, EdgeTarget::Global),
];

/// Parameter slot naming the affected node of an action.
const ACTION_TARGET_SLOT: usize = 1;

/// An edge implied by a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEdge {
    pub edge: Edge,
    /// Global variable index the edge needs to exist, if any.
    pub global: Option<String>,
}

fn rule_for(rules: &[EdgeRule], opcode: Option<i64>) -> Option<&EdgeRule> {
    let opcode = opcode?;
    rules.iter().find(|rule| rule.opcode == opcode)
}

fn target_id(target: EdgeTarget, param: &str) -> NodeId {
    match target {
        EdgeTarget::Trigger => NodeId::trigger(param),
        EdgeTarget::Local => NodeId::local(param),
        EdgeTarget::Global => NodeId::global(param),
    }
}

fn plan(rule: &EdgeRule, param: &str, from_trigger: bool, owner: &NodeId) -> Option<PlannedEdge> {
    let param = param.trim();
    if param.is_empty() {
        return None;
    }
    let other = target_id(rule.target, param);
    let (from, to) = if from_trigger {
        (owner.clone(), other)
    } else {
        (other, owner.clone())
    };
    let global = (rule.target == EdgeTarget::Global).then(|| param.to_string());

    Some(PlannedEdge {
        edge: Edge::directed(from, to, rule.kind).with_dashes(rule.dashed),
        global,
    })
}

/// The edge an event of trigger `owner` implies, if any.
pub fn event_edge(event: &EventRecord, owner: &NodeId) -> Option<PlannedEdge> {
    let rule = rule_for(EVENT_EDGE_RULES, event.opcode)?;
    plan(rule, event.first_param(), false, owner)
}

/// The edge an action of trigger `owner` implies, if any.
pub fn action_edge(action: &ActionRecord, owner: &NodeId) -> Option<PlannedEdge> {
    let rule = rule_for(ACTION_EDGE_RULES, action.opcode)?;
    plan(rule, action.param(ACTION_TARGET_SLOT), true, owner)
}

fn parse_int(token: &str) -> Option<i64> {
    token.trim().parse().ok()
}

/// Decode the opcode token at `index`; `None` if absent or not numeric.
fn opcode_at(tokens: &[&str], index: usize) -> (Option<i64>, Option<DecodeIssue>) {
    match tokens.get(index) {
        Some(token) => match parse_int(token) {
            Some(opcode) => (Some(opcode), None),
            None => (None, Some(DecodeIssue::InvalidOpcode(token.trim().to_string()))),
        },
        None => (None, Some(DecodeIssue::InvalidOpcode(String::new()))),
    }
}

/// Decode an `Events` stream.
pub fn decode_events(stream: &str) -> Vec<Decoded<EventRecord>> {
    let tokens: Vec<&str> = stream.split(',').collect();
    let mut records = Vec::new();
    let mut index = 1;

    while index < tokens.len() {
        let (opcode, mut issue) = opcode_at(&tokens, index);
        let flag = tokens.get(index + 1).and_then(|token| parse_int(token));
        let arity = if flag == Some(TWO_PARAM_FLAG) { 2 } else { 1 };

        let first = index + 2;
        let present = tokens.len().saturating_sub(first).min(arity);
        let params: Vec<String> = (0..arity)
            .map(|offset| {
                tokens
                    .get(first + offset)
                    .map(|token| token.trim().to_string())
                    .unwrap_or_default()
            })
            .collect();
        if issue.is_none() && present < arity {
            issue = Some(DecodeIssue::MissingParams {
                expected: arity,
                found: present,
            });
        }

        trace!(opcode:?, arity; "Decoded event");
        records.push(Decoded::new(EventRecord { opcode, params }, issue));
        index += 2 + arity;
    }

    records
}

/// Decode an `Actions` stream.
pub fn decode_actions(stream: &str) -> ActionStream {
    let tokens: Vec<&str> = stream.split(',').collect();
    let count_token = tokens.first().map(|token| token.trim()).unwrap_or_default();

    let declared = match parse_int(count_token) {
        Some(count) => usize::try_from(count).unwrap_or(0),
        None => {
            return ActionStream {
                records: Vec::new(),
                issue: Some(DecodeIssue::InvalidCount(count_token.to_string())),
            };
        }
    };

    let mut records = Vec::with_capacity(declared.min(tokens.len()));
    let mut index = 1;
    while index < tokens.len() && records.len() < declared {
        let (opcode, mut issue) = opcode_at(&tokens, index);

        let params: [String; ACTION_PARAM_SLOTS] = std::array::from_fn(|slot| {
            tokens
                .get(index + 1 + slot)
                .map(|token| token.trim().to_string())
                .unwrap_or_default()
        });
        let present = tokens
            .len()
            .saturating_sub(index + 1)
            .min(ACTION_PARAM_SLOTS);
        if issue.is_none() && present < ACTION_PARAM_SLOTS {
            issue = Some(DecodeIssue::MissingParams {
                expected: ACTION_PARAM_SLOTS,
                found: present,
            });
        }

        trace!(opcode:?; "Decoded action");
        records.push(Decoded::new(ActionRecord { opcode, params }, issue));
        index += ACTION_RECORD_TOKENS;
    }

    let issue = (records.len() < declared).then_some(DecodeIssue::Truncated {
        declared,
        found: records.len(),
    });
    ActionStream { records, issue }
}
