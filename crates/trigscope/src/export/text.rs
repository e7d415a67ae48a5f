use std::{
    fmt::{self, Display, Formatter},
    io::Write,
};

use trigscope_core::{
    opcode::OpcodeTable,
    semantic::{Node, TriggerNode, VariableNode},
};
use trigscope_parser::{Bundle, MergedEntity, ParsedMap};

use crate::export::{Error, Exporter};

/// Value shown for unset fields.
const NOT_SET: &str = "(not set)";

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Node counts, edge count and warnings of a parsed map.
pub fn summary(parsed: &ParsedMap) -> String {
    Summary(parsed).to_string()
}

struct Summary<'a>(&'a ParsedMap);

impl Display for Summary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let stats = self.0.model.stats();
        writeln!(f, "Triggers & Variables: {}", stats.nodes())?;
        writeln!(f, "  Triggers: {}", stats.triggers)?;
        writeln!(f, "  Local variables: {}", stats.local_variables)?;
        writeln!(f, "  Global variables: {}", stats.global_variables)?;
        writeln!(f, "Links: {}", stats.edges)?;

        let warnings = &self.0.warnings;
        if !warnings.is_empty() {
            writeln!(f, "Warnings: {}", warnings.len())?;
            for warning in warnings {
                writeln!(f, "  {}", warning.message())?;
            }
        }
        Ok(())
    }
}

/// The detail report of a trigger, with records described through `opcodes`.
pub fn trigger_report(trigger: &TriggerNode, opcodes: &OpcodeTable) -> String {
    TriggerReport { trigger, opcodes }.to_string()
}

struct TriggerReport<'a> {
    trigger: &'a TriggerNode,
    opcodes: &'a OpcodeTable,
}

impl Display for TriggerReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let trigger = self.trigger;
        writeln!(f, "Name: {}", trigger.label())?;
        writeln!(f, "ID: {}", trigger.id())?;
        writeln!(f, "House: {}", trigger.house())?;
        writeln!(f, "Repeat: {}", trigger.repeat())?;
        writeln!(f, "Tags: {}", trigger.tags().join(", "))?;
        if let Some(link) = trigger.link() {
            writeln!(f, "Link Trigger: {link}")?;
        }
        let difficulty = trigger.difficulty();
        writeln!(
            f,
            "Difficulty: easy={} normal={} hard={}",
            yes_no(difficulty.easy),
            yes_no(difficulty.normal),
            yes_no(difficulty.hard)
        )?;
        writeln!(
            f,
            "Disabled: {}",
            if trigger.disabled() { "True" } else { "False" }
        )?;

        writeln!(f, "Events:")?;
        for (index, event) in trigger.events().iter().enumerate() {
            writeln!(f, "  Event {index}: {}", self.opcodes.describe_event(event))?;
        }
        writeln!(f, "Actions:")?;
        for (index, action) in trigger.actions().iter().enumerate() {
            writeln!(f, "  Action {index}: {}", self.opcodes.describe_action(action))?;
        }
        Ok(())
    }
}

/// The detail report of a variable.
pub fn variable_report(variable: &VariableNode) -> String {
    let init_value = variable
        .init_value()
        .filter(|value| !value.is_empty())
        .unwrap_or("N/A");
    [
        "Variable".to_string(),
        format!("Name: {}", variable.label()),
        format!("ID: {}", variable.id()),
        format!("Initial Value: {init_value}"),
        String::new(),
    ]
    .join("\n")
}

/// The detail report of any node.
pub fn node_report(node: &Node, opcodes: &OpcodeTable) -> String {
    match node {
        Node::Trigger(trigger) => trigger_report(trigger, opcodes),
        Node::Variable(variable) => variable_report(variable),
    }
}

/// One titled entity of a bundle report.
struct EntitySection<'a, 'src> {
    title: &'a str,
    entity: Option<&'a MergedEntity<'src>>,
}

impl Display for EntitySection<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let title = self.title;
        let Some(entity) = self.entity else {
            return writeln!(f, "{title}: {NOT_SET}");
        };
        writeln!(
            f,
            "{title}: {} ({} occurrence{})",
            entity.id(),
            entity.occurrences(),
            if entity.occurrences() == 1 { "" } else { "s" }
        )?;
        for entry in entity.entries() {
            writeln!(f, "  {:>5} | {}={}", entry.line, entry.key, entry.value)?;
        }
        Ok(())
    }
}

/// The report of a cross-reference bundle.
pub fn bundle_report(bundle: &Bundle<'_>) -> String {
    let primary = bundle.primary.is_found().then_some(&bundle.primary);
    [
        EntitySection {
            title: "Entity",
            entity: primary,
        },
        EntitySection {
            title: "Script",
            entity: bundle.script.as_ref(),
        },
        EntitySection {
            title: "Task force",
            entity: bundle.task_force.as_ref(),
        },
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

/// Writes [`summary`] to a writer.
pub struct SummaryExporter<W> {
    writer: W,
}

impl<W: Write> SummaryExporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> Exporter for SummaryExporter<W> {
    fn export_map(&mut self, parsed: &ParsedMap) -> Result<(), Error> {
        write!(self.writer, "{}", Summary(parsed))?;
        self.writer.flush()?;
        Ok(())
    }
}
