//! Map model elaboration.
//!
//! This module turns the section store of a map into the trigger graph. It
//! groups triggers, attaches tags, decodes parameter streams, creates
//! variable nodes and wires neighbour sets. Every data problem becomes a
//! warning; the build itself always succeeds.

use std::collections::HashSet;

use log::{debug, info, trace};

use trigscope_core::{
    identifier::NodeId,
    semantic::{
        ActionRecord, Difficulty, Edge, EventRecord, MapModel, Node, RepeatMode, TriggerNode,
        VariableNode,
    },
};

use crate::{
    decode::{self, Decoded, PlannedEdge},
    error::{Diagnostic, DiagnosticCollector, WarningCode},
    grouping::{LinkIssue, TriggerGroups},
    section::{Entry, SectionStore},
    span::Span,
};

const TRIGGERS: &str = "Triggers";
const TAGS: &str = "Tags";
const EVENTS: &str = "Events";
const ACTIONS: &str = "Actions";
const VARIABLE_NAMES: &str = "VariableNames";

/// Link value of a trigger that is not part of a chain.
const NO_LINK: &str = "<none>";

/// Field positions of a `Triggers` entry value.
mod field {
    pub const HOUSE: usize = 0;
    pub const LINK: usize = 1;
    pub const NAME: usize = 2;
    pub const DISABLED: usize = 3;
    pub const EASY: usize = 4;
    pub const NORMAL: usize = 5;
    pub const HARD: usize = 6;

    /// Field position of the trigger reference in a `Tags` entry value.
    pub const TAG_TRIGGER: usize = 2;
}

/// The result of parsing a map: the graph and every warning raised.
#[derive(Debug, Clone, Default)]
pub struct ParsedMap {
    pub model: MapModel,
    /// Warnings in the order they were raised.
    pub warnings: Vec<Diagnostic>,
}

impl ParsedMap {
    /// Warning messages without codes or labels.
    pub fn warning_messages(&self) -> impl Iterator<Item = &str> {
        self.warnings.iter().map(Diagnostic::message)
    }
}

pub struct Builder<'src> {
    store: SectionStore<'src>,
    model: MapModel,
    globals: HashSet<String>,
    diagnostics: DiagnosticCollector,
}

impl<'src> Builder<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            store: SectionStore::parse(source),
            model: MapModel::new(),
            globals: HashSet::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    // ============================================================================
    // Main Entry Methods
    // ============================================================================

    pub fn build(mut self) -> ParsedMap {
        debug!("Building map model");

        let has_triggers = self.store.section(TRIGGERS).is_some();
        let triggers = self.entries(TRIGGERS);
        let tags = self.entries(TAGS);
        trace!(triggers = triggers.len(), tags = tags.len(); "Sections read");

        self.report_duplicate_triggers();

        let mut groups = TriggerGroups::new(
            triggers
                .iter()
                .map(|entry| (entry.key, link_field(&entry.fields()))),
        );
        self.report_link_issues(&groups, &triggers);

        debug!("Attaching tags");
        for tag in &tags {
            let fields = tag.fields();
            let target = fields.get(field::TAG_TRIGGER).map(|t| t.trim()).unwrap_or_default();
            if groups.attach_tag(tag.key, target).is_none() {
                self.diagnostics.emit(
                    Diagnostic::warning(format!("Tag {} refers to non-existent trigger!", tag.key))
                        .with_code(WarningCode::W102)
                        .with_label(tag.span, "tag defined here")
                        .with_help("point the tag at a trigger listed in [Triggers]"),
                );
            }
        }

        debug!("Building trigger nodes");
        for entry in &triggers {
            self.build_trigger(&mut groups, entry);
        }

        debug!("Building local variable nodes");
        for entry in self.entries(VARIABLE_NAMES) {
            self.build_local(&entry);
        }

        self.model.link_neighbours();

        if !has_triggers {
            self.diagnostics.emit(
                Diagnostic::warning("There are no triggers in this map!")
                    .with_code(WarningCode::W100),
            );
        }

        let warnings = self.diagnostics.finish();
        info!(
            nodes = self.model.nodes_count(),
            edges = self.model.edges().len(),
            warnings = warnings.len();
            "Map model built",
        );
        ParsedMap {
            model: self.model,
            warnings,
        }
    }

    /// Entries of section `name`, copied out of the store.
    fn entries(&self, name: &str) -> Vec<Entry<'src>> {
        self.store
            .section(name)
            .map(|section| section.entries().copied().collect())
            .unwrap_or_default()
    }

    fn entry(&self, section: &str, key: &str) -> Option<Entry<'src>> {
        self.store.section(section)?.get(key).copied()
    }

    // ============================================================================
    // Structural Checks
    // ============================================================================

    fn report_duplicate_triggers(&mut self) {
        let duplicates = self
            .store
            .section(TRIGGERS)
            .map(|section| section.duplicates().to_vec())
            .unwrap_or_default();

        for duplicate in duplicates {
            self.diagnostics.emit(
                Diagnostic::warning(format!("ID {} duplicated!", duplicate.key))
                    .with_code(WarningCode::W101)
                    .with_label(duplicate.span, "redefined here")
                    .with_secondary_label(duplicate.previous, "first defined here")
                    .with_help("the last definition in [Triggers] is used"),
            );
        }
    }

    fn report_link_issues(&mut self, groups: &TriggerGroups<'src>, triggers: &[Entry<'src>]) {
        let span_of = |id: &str| {
            triggers
                .iter()
                .find(|entry| entry.key == id)
                .map(|entry| entry.span)
        };

        for issue in groups.issues() {
            let diagnostic = match *issue {
                LinkIssue::Dangling { trigger, link } => Diagnostic::warning(format!(
                    "Trigger {trigger} links to non-existent trigger {link}!"
                ))
                .with_code(WarningCode::W104)
                .with_help("the trigger is grouped on its own"),
                LinkIssue::Cycle { root } => Diagnostic::warning(format!(
                    "Trigger links through {root} form a cycle!"
                ))
                .with_code(WarningCode::W105)
                .with_help(format!("the chain is cut at {root}")),
            };
            let trigger = match *issue {
                LinkIssue::Dangling { trigger, .. } => trigger,
                LinkIssue::Cycle { root } => root,
            };
            let diagnostic = match span_of(trigger) {
                Some(span) => diagnostic.with_label(span, "link defined here"),
                None => diagnostic,
            };
            self.diagnostics.emit(diagnostic);
        }
    }

    // ============================================================================
    // Node Builders
    // ============================================================================

    fn build_trigger(&mut self, groups: &mut TriggerGroups<'src>, entry: &Entry<'src>) {
        let id = entry.key;
        let tags: Vec<&'src str> = groups.tags(id).to_vec();

        let Some(&first_tag) = tags.first() else {
            self.diagnostics.emit(
                Diagnostic::warning(format!("Trigger {id} doesn't have any tags!"))
                    .with_code(WarningCode::W103)
                    .with_label(entry.span, "trigger defined here")
                    .with_help("add a [Tags] entry referencing this trigger or its link chain"),
            );
            return;
        };

        trace!(id; "Building trigger");
        let fields = entry.fields();
        let value_at = |index: usize| fields.get(index).map(|value| value.trim());

        let repeat = self.repeat_mode(first_tag);
        let difficulty = Difficulty {
            easy: self.flag(entry, "easy", value_at(field::EASY)),
            normal: self.flag(entry, "normal", value_at(field::NORMAL)),
            hard: self.flag(entry, "hard", value_at(field::HARD)),
        };
        let disabled = self.flag(entry, "disabled", value_at(field::DISABLED));

        let node_id = NodeId::trigger(id);
        let events = self.decode_events(&node_id, entry.span);
        let actions = self.decode_actions(&node_id, entry.span);

        let link = link_field(&fields);
        if let Some(link) = link.filter(|link| groups.contains(link)) {
            self.model
                .push_edge(Edge::link(node_id.clone(), NodeId::trigger(link)));
        }

        let trigger = TriggerNode::new(node_id, value_at(field::NAME).unwrap_or_default())
            .with_house(value_at(field::HOUSE).unwrap_or_default())
            .with_difficulty(difficulty)
            .with_disabled(disabled)
            .with_link(link.map(NodeId::trigger))
            .with_repeat(repeat)
            .with_tags(tags.iter().map(|tag| tag.to_string()).collect())
            .with_events(events)
            .with_actions(actions);

        if !self.model.insert_node(Node::Trigger(trigger)) {
            self.duplicate_node(id, entry.span);
        }
    }

    fn build_local(&mut self, entry: &Entry<'src>) {
        let fields = entry.fields();
        let name = fields.first().map(|name| name.trim()).unwrap_or_default();
        let init_value = fields.get(1).map(|value| value.trim().to_string());

        let variable = VariableNode::local(entry.key, name, init_value);
        if !self.model.insert_node(Node::Variable(variable)) {
            self.duplicate_node(&NodeId::local(entry.key).to_string(), entry.span);
        }
    }

    /// Creates the global variable node `G<index>` on first reference.
    fn ensure_global(&mut self, index: &str, referenced_at: Span) {
        if !self.globals.insert(index.to_string()) {
            return;
        }
        trace!(index; "Creating global variable");
        if !self.model.insert_node(Node::Variable(VariableNode::global(index))) {
            self.duplicate_node(&NodeId::global(index).to_string(), referenced_at);
        }
    }

    fn duplicate_node(&mut self, id: &str, span: Span) {
        self.diagnostics.emit(
            Diagnostic::warning(format!("ID {id} duplicated!"))
                .with_code(WarningCode::W101)
                .with_label(span, "defined again here")
                .with_help("the first node created with this ID is kept"),
        );
    }

    // ============================================================================
    // Field Helpers
    // ============================================================================

    /// Repeat mode from the first field of `tag`, falling back to one time OR.
    fn repeat_mode(&mut self, tag: &str) -> RepeatMode {
        let Some(entry) = self.entry(TAGS, tag) else {
            return RepeatMode::OneTimeOr;
        };
        let fields = entry.fields();
        let raw = fields.first().map(|value| value.trim()).unwrap_or_default();

        match raw.parse().ok().and_then(RepeatMode::from_code) {
            Some(mode) => mode,
            None => {
                self.diagnostics.emit(
                    Diagnostic::warning(format!("Tag {tag} has invalid repeat mode `{raw}`"))
                        .with_code(WarningCode::W107)
                        .with_label(entry.span, "tag defined here")
                        .with_help("repeat mode must be 0, 1 or 2; using 0"),
                );
                RepeatMode::OneTimeOr
            }
        }
    }

    /// Integer flag coercion: non-zero is `true`.
    fn flag(&mut self, entry: &Entry<'src>, name: &str, raw: Option<&str>) -> bool {
        match raw.and_then(|value| value.parse::<i64>().ok()) {
            Some(value) => value != 0,
            None => {
                self.diagnostics.emit(
                    Diagnostic::warning(format!(
                        "Trigger {} has malformed {name} field `{}`",
                        entry.key,
                        raw.unwrap_or_default()
                    ))
                    .with_code(WarningCode::W106)
                    .with_label(entry.span, "trigger defined here")
                    .with_help("expected an integer; treating it as 0"),
                );
                false
            }
        }
    }

    // ============================================================================
    // Parameter Streams
    // ============================================================================

    fn decode_events(
        &mut self,
        owner: &NodeId,
        trigger_span: Span,
    ) -> Vec<EventRecord> {
        let Some(entry) = self.entry(EVENTS, owner.as_str()) else {
            return Vec::new();
        };

        let mut events = Vec::new();
        for (index, decoded) in decode::decode_events(entry.value).into_iter().enumerate() {
            if let Decoded::Partial { issue, .. } = &decoded {
                self.decode_warning(owner, WarningCode::W200, index, issue, entry.span);
            }
            let event = decoded.into_record();
            if let Some(planned) = decode::event_edge(&event, owner) {
                self.apply_edge(planned, trigger_span);
            }
            events.push(event);
        }
        events
    }

    fn decode_actions(
        &mut self,
        owner: &NodeId,
        trigger_span: Span,
    ) -> Vec<ActionRecord> {
        let Some(entry) = self.entry(ACTIONS, owner.as_str()) else {
            return Vec::new();
        };

        let stream = decode::decode_actions(entry.value);
        let mut actions = Vec::with_capacity(stream.records.len());
        for (index, decoded) in stream.records.into_iter().enumerate() {
            if let Decoded::Partial { issue, .. } = &decoded {
                self.decode_warning(owner, WarningCode::W201, index, issue, entry.span);
            }
            let action = decoded.into_record();
            if let Some(planned) = decode::action_edge(&action, owner) {
                self.apply_edge(planned, trigger_span);
            }
            actions.push(action);
        }

        if let Some(issue) = stream.issue {
            self.diagnostics.emit(
                Diagnostic::warning(format!(
                    "Trigger {owner} has error in events or actions: actions: {issue}"
                ))
                .with_code(WarningCode::W201)
                .with_label(entry.span, "actions defined here"),
            );
        }
        actions
    }

    fn decode_warning(
        &mut self,
        owner: &NodeId,
        code: WarningCode,
        index: usize,
        issue: &decode::DecodeIssue,
        span: Span,
    ) {
        let stream = if code == WarningCode::W200 {
            "event"
        } else {
            "action"
        };
        self.diagnostics.emit(
            Diagnostic::warning(format!(
                "Trigger {owner} has error in events or actions: {stream} {}: {issue}",
                index + 1
            ))
            .with_code(code)
            .with_label(span, format!("{stream}s defined here")),
        );
    }

    fn apply_edge(&mut self, planned: PlannedEdge, trigger_span: Span) {
        let PlannedEdge { edge, global } = planned;
        if let Some(index) = global {
            self.ensure_global(&index, trigger_span);
        }
        self.model.push_edge(edge);
    }
}

/// The linked trigger ID of a `Triggers` entry, if it names one.
fn link_field<'src>(fields: &[&'src str]) -> Option<&'src str> {
    fields
        .get(field::LINK)
        .map(|link| link.trim())
        .filter(|link| !link.is_empty() && *link != NO_LINK)
}

#[cfg(test)]
mod tests {
    use trigscope_core::semantic::{EdgeKind, VariableScope};

    use super::*;

    fn build(source: &str) -> ParsedMap {
        Builder::new(source).build()
    }

    fn codes(parsed: &ParsedMap) -> Vec<WarningCode> {
        parsed.warnings.iter().filter_map(Diagnostic::code).collect()
    }

    #[test]
    fn test_linked_triggers_share_tags() {
        let parsed = build(
            "\
[Triggers]
T1=Soviet,T2,First,0,1,1,1
T2=Soviet,<none>,Second,0,1,1,1
[Tags]
G1=2,group tag,T2
",
        );
        assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);

        let first = parsed.model.node("T1").and_then(Node::as_trigger).unwrap();
        assert_eq!(first.tags(), &["G1".to_string()]);
        assert_eq!(first.repeat(), RepeatMode::RepeatingOr);
        assert_eq!(first.link(), Some(&NodeId::trigger("T2")));

        let links: Vec<_> = parsed
            .model
            .edges()
            .iter()
            .filter(|edge| edge.kind == EdgeKind::Link)
            .collect();
        assert_eq!(links.len(), 1);
        assert!(!links[0].directed);
        assert!(first.neighbours().contains("T2"));
    }

    #[test]
    fn test_tag_to_missing_trigger() {
        let parsed = build("[Triggers]\nT1=Soviet,<none>,A,0,1,1,1\n[Tags]\nX=0,x,T1\nY=0,y,T9\n");
        assert_eq!(codes(&parsed), vec![WarningCode::W102]);
        assert_eq!(
            parsed.warnings[0].message(),
            "Tag Y refers to non-existent trigger!"
        );
    }

    #[test]
    fn test_global_created_before_trigger() {
        let parsed = build(
            "\
[Triggers]
T1=Soviet,<none>,A,0,1,1,1
[Tags]
X=0,x,T1
[Events]
T1=1,27,0,3
[Actions]
T1=1,28,0,3,0,0,0,0,A
",
        );
        let ids: Vec<_> = parsed.model.nodes().map(|node| node.id().as_str()).collect();
        assert_eq!(ids, vec!["G3", "T1"]);

        let global = parsed.model.node("G3").and_then(Node::as_variable).unwrap();
        assert_eq!(global.scope(), VariableScope::Global);
        assert_eq!(global.label(), "Global Variable 3");
        assert_eq!(parsed.model.edges().len(), 2);
        assert_eq!(global.neighbours().len(), 1);
    }

    #[test]
    fn test_dangling_link_warns_without_edge() {
        let parsed = build("[Triggers]\nT1=Soviet,T404,A,0,1,1,1\n[Tags]\nX=0,x,T1\n");
        assert_eq!(codes(&parsed), vec![WarningCode::W104]);
        assert!(parsed.model.contains("T1"));
        assert!(parsed.model.edges().is_empty());
    }

    #[test]
    fn test_cyclic_links_are_grouped() {
        let parsed = build(
            "\
[Triggers]
T1=Soviet,T2,A,0,1,1,1
T2=Soviet,T1,B,0,1,1,1
[Tags]
X=1,x,T2
",
        );
        assert_eq!(codes(&parsed), vec![WarningCode::W105]);
        assert!(parsed.model.contains("T1"));
        assert!(parsed.model.contains("T2"));
    }

    #[test]
    fn test_malformed_flags_and_repeat() {
        let parsed = build("[Triggers]\nT1=Soviet,<none>,A,x,1,1\n[Tags]\nX=9,x,T1\n");
        assert_eq!(
            codes(&parsed),
            vec![WarningCode::W107, WarningCode::W106, WarningCode::W106]
        );
        let trigger = parsed.model.node("T1").and_then(Node::as_trigger).unwrap();
        assert_eq!(trigger.repeat(), RepeatMode::OneTimeOr);
        assert!(!trigger.disabled());
        assert!(!trigger.difficulty().hard);
    }

    #[test]
    fn test_decode_errors_keep_trigger() {
        let parsed = build(
            "\
[Triggers]
T1=Soviet,<none>,A,0,1,1,1
[Tags]
X=0,x,T1
[Events]
T1=1,oops,0,1
[Actions]
T1=3,53,0,T1,0,0,0,0,A
",
        );
        assert_eq!(
            codes(&parsed),
            vec![WarningCode::W200, WarningCode::W201]
        );
        assert!(
            parsed
                .warning_messages()
                .all(|message| message.starts_with("Trigger T1 has error in events or actions"))
        );
        let trigger = parsed.model.node("T1").and_then(Node::as_trigger).unwrap();
        assert_eq!(trigger.events().len(), 1);
        assert_eq!(trigger.actions().len(), 1);
    }

    #[test]
    fn test_duplicate_trigger_key() {
        let parsed = build(
            "[Triggers]\nT1=Soviet,<none>,Old,0,1,1,1\nT1=Allied,<none>,New,0,1,1,1\n[Tags]\nX=0,x,T1\n",
        );
        assert_eq!(codes(&parsed), vec![WarningCode::W101]);
        assert_eq!(parsed.warnings[0].message(), "ID T1 duplicated!");
        assert_eq!(parsed.model.nodes_count(), 1);
        assert_eq!(parsed.model.node("T1").map(|node| node.label()), Some("New"));
    }

    #[test]
    fn test_local_variables_without_triggers() {
        let parsed = build("[VariableNames]\n0=base_found,1\n1=alarm\n");
        assert_eq!(codes(&parsed), vec![WarningCode::W100]);

        let found = parsed.model.node("L0").and_then(Node::as_variable).unwrap();
        assert_eq!(found.label(), "base_found");
        assert_eq!(found.init_value(), Some("1"));

        let alarm = parsed.model.node("L1").and_then(Node::as_variable).unwrap();
        assert_eq!(alarm.init_value(), None);
    }
}
