//! Cross-reference lookups for entities that are not graph nodes.
//!
//! Teams, scripts and task forces live in sections named after their IDs.
//! [`Resolver`] merges every occurrence of such a section and follows a
//! team's script and task force fields to the sections they name.

use log::debug;

use crate::section::{EntityIndex, MergedEntity};

/// Keys that may hold a reference to a related entity, in lookup order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAliases {
    pub script_keys: Vec<String>,
    pub task_force_keys: Vec<String>,
}

impl Default for LinkAliases {
    fn default() -> Self {
        Self {
            script_keys: ["Script", "ScriptTypeId", "ScriptId"]
                .map(String::from)
                .to_vec(),
            task_force_keys: ["TaskForce", "TaskForceId", "Taskforce"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// An entity with the entities its fields reference.
///
/// A slot is `None` when no alias key is set or the referenced entity has no
/// section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle<'src> {
    pub primary: MergedEntity<'src>,
    pub script: Option<MergedEntity<'src>>,
    pub task_force: Option<MergedEntity<'src>>,
}

/// Read-only cross-reference resolver over one source text.
#[derive(Debug, Clone)]
pub struct Resolver<'src> {
    index: EntityIndex<'src>,
    aliases: LinkAliases,
}

impl<'src> Resolver<'src> {
    pub fn new(source: &'src str, aliases: LinkAliases) -> Self {
        Self {
            index: EntityIndex::new(source),
            aliases,
        }
    }

    /// Every occurrence of the section `id`, merged.
    pub fn entity(&self, id: &str) -> MergedEntity<'src> {
        self.index.lookup(id)
    }

    /// Resolves `id` and the script and task force it references.
    pub fn resolve_bundle(&self, id: &str) -> Bundle<'src> {
        let primary = self.entity(id);
        let script = self.follow(&primary, &self.aliases.script_keys);
        let task_force = self.follow(&primary, &self.aliases.task_force_keys);

        debug!(
            id,
            occurrences = primary.occurrences(),
            script = script.is_some(),
            task_force = task_force.is_some();
            "Resolved entity bundle",
        );
        Bundle {
            primary,
            script,
            task_force,
        }
    }

    fn follow(&self, entity: &MergedEntity<'src>, keys: &[String]) -> Option<MergedEntity<'src>> {
        let value = keys.iter().find_map(|key| entity.get(key))?;
        let target = reference_id(value)?;
        let related = self.entity(target);
        related.is_found().then_some(related)
    }
}

/// The ID at the start of a field value that may carry trailing notes.
fn reference_id(value: &str) -> Option<&str> {
    value
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '(' | ')'))
        .find(|token| !token.is_empty())
}
