//! The section store.
//!
//! Two read modes exist over the same classified lines:
//!
//! - [`SectionStore`] is the single-pass mode used for bulk map parsing.
//!   Every section name maps to one key/value table. A repeated header
//!   reopens the same table: colliding keys are overwritten, other keys of
//!   the earlier occurrence survive. A blank line closes the current
//!   section; entries that follow it, up to the next header, land in the
//!   root table.
//! - [`EntityIndex`] is the multi-occurrence merge mode used for
//!   cross-reference lookups. It treats a section name as an entity ID,
//!   finds every header for that ID and concatenates their bodies in
//!   document order. Blank lines do not end a body there.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::{
    lexer::{LineKind, SourceLine, tokenize},
    span::Span,
};

/// A key/value line of a section body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'src> {
    pub key: &'src str,
    pub value: &'src str,
    /// 1-based source line number.
    pub line: usize,
    pub span: Span,
}

impl<'src> Entry<'src> {
    /// Splits the value on commas.
    pub fn fields(&self) -> Vec<&'src str> {
        self.value.split(',').collect()
    }
}

/// A key that appeared again in the same section and replaced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duplicate<'src> {
    pub key: &'src str,
    /// Span of the entry that was replaced.
    pub previous: Span,
    /// Span of the replacing entry.
    pub span: Span,
}

/// One logical section of the single-pass store.
#[derive(Debug, Clone, Default)]
pub struct Section<'src> {
    entries: IndexMap<&'src str, Entry<'src>>,
    duplicates: Vec<Duplicate<'src>>,
}

impl<'src> Section<'src> {
    fn insert(&mut self, entry: Entry<'src>) {
        if let Some(previous) = self.entries.insert(entry.key, entry) {
            self.duplicates.push(Duplicate {
                key: entry.key,
                previous: previous.span,
                span: entry.span,
            });
        }
    }

    /// Returns the entry for `key`; the last value written wins.
    pub fn get(&self, key: &str) -> Option<&Entry<'src>> {
        self.entries.get(key)
    }

    /// Returns the value for `key`.
    pub fn value(&self, key: &str) -> Option<&'src str> {
        self.entries.get(key).map(|entry| entry.value)
    }

    /// Entries in first-appearance key order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry<'src>> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys that were written more than once, in document order.
    pub fn duplicates(&self) -> &[Duplicate<'src>] {
        &self.duplicates
    }
}

/// Single-pass section store over a whole map.
#[derive(Debug, Clone, Default)]
pub struct SectionStore<'src> {
    sections: IndexMap<&'src str, Section<'src>>,
    root: Section<'src>,
}

impl<'src> SectionStore<'src> {
    /// Parses `source` into sections.
    pub fn parse(source: &'src str) -> Self {
        Self::from_lines(&tokenize(source))
    }

    /// Builds the store from already classified lines.
    pub fn from_lines(lines: &[SourceLine<'src>]) -> Self {
        let mut store = Self::default();
        let mut current: Option<&'src str> = None;

        for line in lines {
            match line.kind {
                LineKind::Header(name) => {
                    trace!(section = name, line = line.number; "Opening section");
                    store.sections.entry(name).or_default();
                    current = Some(name);
                }
                LineKind::Entry { key, value } => {
                    let entry = Entry {
                        key,
                        value,
                        line: line.number,
                        span: line.span,
                    };
                    match current.and_then(|name| store.sections.get_mut(name)) {
                        Some(section) => section.insert(entry),
                        None => store.root.insert(entry),
                    }
                }
                LineKind::Blank => current = None,
                LineKind::Comment | LineKind::Malformed => {}
            }
        }

        debug!(sections = store.sections.len(); "Section store built");
        store
    }

    /// Returns the section called `name`.
    pub fn section(&self, name: &str) -> Option<&Section<'src>> {
        self.sections.get(name)
    }

    /// Entries written outside any section.
    pub fn root(&self) -> &Section<'src> {
        &self.root
    }

    /// Section names in first-appearance order.
    pub fn names(&self) -> impl Iterator<Item = &'src str> + '_ {
        self.sections.keys().copied()
    }
}

/// All occurrences of one entity's section, merged in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedEntity<'src> {
    id: String,
    occurrences: usize,
    entries: Vec<Entry<'src>>,
    values: IndexMap<&'src str, &'src str>,
}

impl<'src> MergedEntity<'src> {
    /// Creates an entity with no occurrences.
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Appends one occurrence body; its keys override earlier ones.
    pub fn push_occurrence(&mut self, body: impl IntoIterator<Item = Entry<'src>>) {
        self.occurrences += 1;
        for entry in body {
            self.values.insert(entry.key, entry.value);
            self.entries.push(entry);
        }
    }

    /// Appends every occurrence of `other` after this entity's occurrences.
    pub fn merge(mut self, other: MergedEntity<'src>) -> Self {
        self.occurrences += other.occurrences;
        for entry in other.entries {
            self.values.insert(entry.key, entry.value);
            self.entries.push(entry);
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of headers found for this entity.
    pub fn occurrences(&self) -> usize {
        self.occurrences
    }

    pub fn is_found(&self) -> bool {
        self.occurrences > 0
    }

    /// Every entry of every occurrence, in document order.
    pub fn entries(&self) -> &[Entry<'src>] {
        &self.entries
    }

    /// Returns the last value written for `key`.
    pub fn get(&self, key: &str) -> Option<&'src str> {
        self.values.get(key).copied()
    }

    /// The last-wins key/value map, in first-appearance key order.
    pub fn values(&self) -> &IndexMap<&'src str, &'src str> {
        &self.values
    }
}

/// Header index for multi-occurrence lookups over one source text.
#[derive(Debug, Clone)]
pub struct EntityIndex<'src> {
    lines: Vec<SourceLine<'src>>,
    /// Line indices of every header, in document order.
    headers: Vec<usize>,
    /// Header ordinals keyed by the raw, untrimmed header line.
    exact: HashMap<&'src str, Vec<usize>>,
    /// Header ordinals keyed by the trimmed section name.
    by_name: HashMap<&'src str, Vec<usize>>,
}

impl<'src> EntityIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::from_lines(tokenize(source))
    }

    pub fn from_lines(lines: Vec<SourceLine<'src>>) -> Self {
        let mut headers = Vec::new();
        let mut exact: HashMap<&'src str, Vec<usize>> = HashMap::new();
        let mut by_name: HashMap<&'src str, Vec<usize>> = HashMap::new();

        for (index, line) in lines.iter().enumerate() {
            if let LineKind::Header(name) = line.kind {
                let ordinal = headers.len();
                headers.push(index);
                exact.entry(line.text).or_default().push(ordinal);
                by_name.entry(name).or_default().push(ordinal);
            }
        }

        debug!(headers = headers.len(); "Entity index built");
        Self {
            lines,
            headers,
            exact,
            by_name,
        }
    }

    /// Merges every occurrence of the section named `id`.
    ///
    /// Headers written exactly as `[id]` are preferred. When there are none,
    /// headers whose trimmed name equals `id` are used. No occurrence yields
    /// an empty entity.
    pub fn lookup(&self, id: &str) -> MergedEntity<'src> {
        let mut merged = MergedEntity::empty(id);

        let exact_header = format!("[{id}]");
        let ordinals = self
            .exact
            .get(exact_header.as_str())
            .or_else(|| self.by_name.get(id.trim()));
        let Some(ordinals) = ordinals else {
            trace!(id; "No section occurrences");
            return merged;
        };

        for &ordinal in ordinals {
            merged.push_occurrence(self.body(ordinal));
        }
        trace!(id, occurrences = merged.occurrences(); "Merged section occurrences");
        merged
    }

    /// Entries between header `ordinal` and the next header.
    fn body(&self, ordinal: usize) -> impl Iterator<Item = Entry<'src>> + '_ {
        let start = self.headers[ordinal] + 1;
        let end = self
            .headers
            .get(ordinal + 1)
            .copied()
            .unwrap_or(self.lines.len());

        self.lines[start..end].iter().filter_map(|line| match line.kind {
            LineKind::Entry { key, value } => Some(Entry {
                key,
                value,
                line: line.number,
                span: line.span,
            }),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pass_sections() {
        let source = "\
[Triggers]
01000000=Soviet,<none>,Intro,0,1,1,1
01000001=Allied,<none>,Ambush,0,1,1,1
; comment=ignored
garbage line
[Tags]
01000002=0,Intro tag,01000000
";
        let store = SectionStore::parse(source);
        let triggers = store.section("Triggers").unwrap();
        assert_eq!(triggers.len(), 2);
        assert_eq!(
            triggers.value("01000001"),
            Some("Allied,<none>,Ambush,0,1,1,1")
        );
        assert_eq!(triggers.get("01000000").unwrap().line, 2);
        assert!(triggers.get("; comment").is_none());
        assert_eq!(store.section("Tags").unwrap().len(), 1);
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["Triggers", "Tags"]);
    }

    #[test]
    fn test_duplicate_headers_merge_colliding_keys() {
        let source = "\
[Basic]
Name=First
Player=Americans
[Basic]
Name=Second
Theme=Grinder
";
        let store = SectionStore::parse(source);
        let basic = store.section("Basic").unwrap();
        assert_eq!(basic.value("Name"), Some("Second"));
        assert_eq!(basic.value("Player"), Some("Americans"));
        assert_eq!(basic.value("Theme"), Some("Grinder"));

        let keys: Vec<_> = basic.entries().map(|entry| entry.key).collect();
        assert_eq!(keys, vec!["Name", "Player", "Theme"]);

        assert_eq!(basic.duplicates().len(), 1);
        assert_eq!(basic.duplicates()[0].key, "Name");
    }

    #[test]
    fn test_last_key_wins_within_one_body() {
        let store = SectionStore::parse("[Triggers]\nA=1\nA=2\n");
        let triggers = store.section("Triggers").unwrap();
        assert_eq!(triggers.value("A"), Some("2"));
        assert_eq!(triggers.duplicates().len(), 1);
    }

    #[test]
    fn test_blank_line_closes_section() {
        let store = SectionStore::parse("[Triggers]\nA=1\n\nB=2\n[Tags]\nC=3\n");
        let triggers = store.section("Triggers").unwrap();
        assert_eq!(triggers.value("A"), Some("1"));
        assert!(triggers.value("B").is_none());
        assert_eq!(store.root().value("B"), Some("2"));
        assert_eq!(store.section("Tags").unwrap().value("C"), Some("3"));
    }

    #[test]
    fn test_whitespace_line_keeps_section_open() {
        let store = SectionStore::parse("[Triggers]\nA=1\n   \t\nB=2\n");
        let triggers = store.section("Triggers").unwrap();
        assert_eq!(triggers.value("B"), Some("2"));
        assert!(store.root().is_empty());
    }

    #[test]
    fn test_entry_fields() {
        let store = SectionStore::parse("[VariableNames]\n0=base_found,0\n");
        let entry = store.section("VariableNames").unwrap().get("0").unwrap();
        assert_eq!(entry.fields(), vec!["base_found", "0"]);
    }

    #[test]
    fn test_entity_lookup_merges_occurrences() {
        let source = "\
[Team1]
Name=Strike
Script=Script1

[Other]
Name=x
[Team1]
Script=Script9
Max=5
";
        let index = EntityIndex::new(source);
        let team = index.lookup("Team1");
        assert_eq!(team.occurrences(), 2);
        assert_eq!(team.get("Script"), Some("Script9"));
        assert_eq!(team.get("Name"), Some("Strike"));
        assert_eq!(team.get("Max"), Some("5"));
        assert_eq!(team.entries().len(), 4);
        assert_eq!(team.entries()[0].line, 2);
    }

    #[test]
    fn test_entity_lookup_blank_lines_do_not_end_body() {
        let index = EntityIndex::new("[Script9]\n0=1,2\n\n1=3,4\n[Next]\n");
        let script = index.lookup("Script9");
        assert_eq!(script.entries().len(), 2);
        assert_eq!(script.get("1"), Some("3,4"));
    }

    #[test]
    fn test_entity_lookup_prefers_exact_headers() {
        let source = "[ Team1 ]\nName=Loose\n[Team1]\nName=Exact\n";
        let index = EntityIndex::new(source);
        let team = index.lookup("Team1");
        assert_eq!(team.occurrences(), 1);
        assert_eq!(team.get("Name"), Some("Exact"));
    }

    #[test]
    fn test_entity_lookup_whitespace_tolerant_fallback() {
        let index = EntityIndex::new("  [ Team2 ]  \nName=Loose\n");
        let team = index.lookup("Team2");
        assert_eq!(team.occurrences(), 1);
        assert_eq!(team.get("Name"), Some("Loose"));
    }

    #[test]
    fn test_entity_lookup_missing() {
        let index = EntityIndex::new("[Team1]\nName=x\n");
        let missing = index.lookup("Script404");
        assert!(!missing.is_found());
        assert!(missing.entries().is_empty());
        assert_eq!(missing.id(), "Script404");
    }
}
