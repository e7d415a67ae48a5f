//! The opcode definition table.
//!
//! The table maps event and action opcodes to a display name, a description
//! and, for actions, the arity of each of the seven parameter slots. It is
//! supplied from outside (usually a JSON file) and only read here. Opcodes
//! without an entry resolve to [`OpcodeDefinition::unknown`].
//!
//! Two serialized layouts are accepted for each list: an array where the
//! element index is the opcode, or a map keyed by opcode.
//!
//! ```
//! # use trigscope_core::opcode::OpcodeTable;
//! let table = OpcodeTable::default();
//! assert_eq!(table.action(53).name(), "Unknown");
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{
    semantic::{ACTION_PARAM_SLOTS, ActionRecord, EventRecord},
    waypoint::decode_waypoint,
};

/// Name, description and slot arity of one opcode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OpcodeDefinition {
    #[serde(default)]
    name: String,

    #[serde(default)]
    description: String,

    /// Per-slot arity; a positive value marks the slot as meaningful.
    #[serde(default, alias = "p")]
    params: Vec<i32>,
}

impl OpcodeDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, params: Vec<i32>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params,
        }
    }

    /// The definition used for opcodes missing from the table.
    pub fn unknown() -> Self {
        Self::new("Unknown", "", Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the arity of `slot`; absent slots have arity 0.
    pub fn arity(&self, slot: usize) -> i32 {
        self.params.get(slot).copied().unwrap_or(0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DefinitionList {
    Indexed(Vec<Option<OpcodeDefinition>>),
    Keyed(BTreeMap<i64, OpcodeDefinition>),
}

impl Default for DefinitionList {
    fn default() -> Self {
        Self::Keyed(BTreeMap::new())
    }
}

impl From<DefinitionList> for BTreeMap<i64, OpcodeDefinition> {
    fn from(list: DefinitionList) -> Self {
        match list {
            DefinitionList::Indexed(entries) => entries
                .into_iter()
                .enumerate()
                .filter_map(|(opcode, def)| def.map(|def| (opcode as i64, def)))
                .collect(),
            DefinitionList::Keyed(entries) => entries,
        }
    }
}

#[derive(Deserialize)]
struct RawOpcodeTable {
    #[serde(default)]
    events: DefinitionList,
    #[serde(default)]
    actions: DefinitionList,
}

/// Opcode definitions for events and actions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawOpcodeTable")]
pub struct OpcodeTable {
    events: BTreeMap<i64, OpcodeDefinition>,
    actions: BTreeMap<i64, OpcodeDefinition>,
    unknown: OpcodeDefinition,
}

impl From<RawOpcodeTable> for OpcodeTable {
    fn from(raw: RawOpcodeTable) -> Self {
        Self::new(raw.events.into(), raw.actions.into())
    }
}

impl OpcodeTable {
    pub fn new(
        events: BTreeMap<i64, OpcodeDefinition>,
        actions: BTreeMap<i64, OpcodeDefinition>,
    ) -> Self {
        Self {
            events,
            actions,
            unknown: OpcodeDefinition::unknown(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.actions.is_empty()
    }

    /// Returns the event definition for `opcode`, or the unknown definition.
    pub fn event(&self, opcode: i64) -> &OpcodeDefinition {
        self.events.get(&opcode).unwrap_or(&self.unknown)
    }

    /// Returns the action definition for `opcode`, or the unknown definition.
    pub fn action(&self, opcode: i64) -> &OpcodeDefinition {
        self.actions.get(&opcode).unwrap_or(&self.unknown)
    }

    /// Renders an event as `<name> <params...>`.
    pub fn describe_event(&self, event: &EventRecord) -> String {
        let def = event
            .opcode
            .map_or(&self.unknown, |opcode| self.event(opcode));
        let mut text = def.name().to_string();
        for param in &event.params {
            text.push(' ');
            text.push_str(param);
        }
        text
    }

    /// Renders an action as its name followed by its meaningful slots.
    ///
    /// The last slot holds a waypoint token and is rendered as `@<index>`.
    pub fn describe_action(&self, action: &ActionRecord) -> String {
        let def = action
            .opcode
            .map_or(&self.unknown, |opcode| self.action(opcode));
        let mut text = def.name().to_string();
        for slot in 0..ACTION_PARAM_SLOTS {
            if def.arity(slot) <= 0 {
                continue;
            }
            let token = action.param(slot);
            if slot == ACTION_PARAM_SLOTS - 1 {
                match decode_waypoint(token) {
                    Ok(waypoint) => text.push_str(&format!(" @{waypoint}")),
                    Err(_) => text.push_str(&format!(" @{token}")),
                }
            } else {
                text.push(' ');
                text.push_str(token);
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> OpcodeTable {
        let mut events = BTreeMap::new();
        events.insert(36, OpcodeDefinition::new("Local is set", "", Vec::new()));
        let mut actions = BTreeMap::new();
        actions.insert(
            53,
            OpcodeDefinition::new("Enable trigger", "Enables a trigger", vec![0, 1, 0, 0, 0, 0, 0]),
        );
        actions.insert(
            46,
            OpcodeDefinition::new("Move to waypoint", "", vec![0, 1, 0, 0, 0, 0, 1]),
        );
        OpcodeTable::new(events, actions)
    }

    fn action(opcode: i64, params: [&str; ACTION_PARAM_SLOTS]) -> ActionRecord {
        ActionRecord {
            opcode: Some(opcode),
            params: params.map(String::from),
        }
    }

    #[test]
    fn test_unknown_opcode() {
        let table = table();
        assert_eq!(table.action(999).name(), "Unknown");
        assert_eq!(table.action(999).arity(0), 0);
        assert_eq!(
            table.describe_action(&action(999, ["1", "2", "3", "4", "5", "6", "A"])),
            "Unknown"
        );
    }

    #[test]
    fn test_describe_event() {
        let table = table();
        let event = EventRecord {
            opcode: Some(36),
            params: vec!["5".into()],
        };
        assert_eq!(table.describe_event(&event), "Local is set 5");

        let unparsed = EventRecord {
            opcode: None,
            params: vec!["0".into(), "7".into()],
        };
        assert_eq!(table.describe_event(&unparsed), "Unknown 0 7");
    }

    #[test]
    fn test_describe_action_slots() {
        let table = table();
        assert_eq!(
            table.describe_action(&action(53, ["0", "01000002", "0", "0", "0", "0", "A"])),
            "Enable trigger 01000002"
        );
        assert_eq!(
            table.describe_action(&action(46, ["0", "3", "0", "0", "0", "0", "AB"])),
            "Move to waypoint 3 @27"
        );
        assert_eq!(
            table.describe_action(&action(46, ["0", "3", "0", "0", "0", "0", ""])),
            "Move to waypoint 3 @"
        );
    }
}
