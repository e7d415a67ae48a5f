//! Trigger grouping through `link` chains.
//!
//! Every trigger points at the trigger named by its `link` field, or at
//! itself when the link is `<none>`. Following those pointers to a fixed
//! point yields the group representative. Tags reference a single trigger
//! but belong to the whole group, so they are attached to the representative.
//!
//! The parent table is an index arena owned by one parse. Lookups compress
//! paths iteratively. Chains that point at a missing trigger stop at the
//! trigger holding the dangling link, and cyclic chains are broken at the
//! first node the walk visits twice. Both are recorded as [`LinkIssue`]s.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, trace};

/// A malformed link chain found while grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkIssue<'src> {
    /// `trigger` links to `link`, which is not a declared trigger.
    Dangling { trigger: &'src str, link: &'src str },
    /// A chain loops back on itself; `root` now represents the whole loop.
    Cycle { root: &'src str },
}

/// Disjoint trigger groups keyed by trigger ID.
#[derive(Debug, Clone)]
pub struct TriggerGroups<'src> {
    index: IndexMap<&'src str, usize>,
    parent: Vec<usize>,
    /// Tag IDs attached to each representative, in attach order.
    tags: Vec<Vec<&'src str>>,
    issues: Vec<LinkIssue<'src>>,
}

impl<'src> TriggerGroups<'src> {
    /// Builds the groups from `(trigger, link)` pairs.
    ///
    /// A `None` link makes the trigger its own representative. Every chain is
    /// resolved once here, so all link issues are known on return.
    pub fn new<I>(links: I) -> Self
    where
        I: IntoIterator<Item = (&'src str, Option<&'src str>)>,
    {
        let links: Vec<_> = links.into_iter().collect();

        let mut index = IndexMap::with_capacity(links.len());
        for &(trigger, _) in &links {
            let next = index.len();
            index.entry(trigger).or_insert(next);
        }

        let mut groups = Self {
            parent: (0..index.len()).collect(),
            tags: vec![Vec::new(); index.len()],
            index,
            issues: Vec::new(),
        };

        for (trigger, link) in links {
            let Some(link) = link else { continue };
            let Some(&from) = groups.index.get(trigger) else {
                continue;
            };
            match groups.index.get(link) {
                Some(&to) => groups.parent[from] = to,
                None => {
                    trace!(trigger, link; "Dangling trigger link");
                    groups.issues.push(LinkIssue::Dangling { trigger, link });
                }
            }
        }

        for node in 0..groups.parent.len() {
            groups.find_index(node);
        }

        debug!(
            triggers = groups.parent.len(),
            issues = groups.issues.len();
            "Trigger groups built",
        );
        groups
    }

    /// Returns the representative of `trigger`'s group.
    ///
    /// Unknown IDs have no group.
    pub fn find(&mut self, trigger: &str) -> Option<&'src str> {
        let &node = self.index.get(trigger)?;
        let root = self.find_index(node);
        self.id(root)
    }

    /// Whether `trigger` was declared.
    pub fn contains(&self, trigger: &str) -> bool {
        self.index.contains_key(trigger)
    }

    /// Attaches `tag` to the group of `trigger`.
    ///
    /// Returns the representative, or `None` when `trigger` is not declared
    /// and the tag was dropped.
    pub fn attach_tag(&mut self, tag: &'src str, trigger: &str) -> Option<&'src str> {
        let &node = self.index.get(trigger)?;
        let root = self.find_index(node);
        self.tags[root].push(tag);
        self.id(root)
    }

    /// Tags attached to `trigger`'s group, in attach order.
    pub fn tags(&mut self, trigger: &str) -> &[&'src str] {
        match self.index.get(trigger) {
            Some(&node) => {
                let root = self.find_index(node);
                &self.tags[root]
            }
            None => &[],
        }
    }

    /// Malformed chains found while building the groups.
    pub fn issues(&self) -> &[LinkIssue<'src>] {
        &self.issues
    }

    fn id(&self, node: usize) -> Option<&'src str> {
        self.index.get_index(node).map(|(id, _)| *id)
    }

    /// Walks parent pointers to the root and compresses the walked path.
    fn find_index(&mut self, start: usize) -> usize {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut node = start;

        let root = loop {
            let parent = self.parent[node];
            if parent == node {
                break node;
            }
            if !seen.insert(node) {
                // Revisited: break the cycle here.
                self.parent[node] = node;
                if let Some(root) = self.id(node) {
                    trace!(root; "Breaking cyclic trigger link");
                    self.issues.push(LinkIssue::Cycle { root });
                }
                break node;
            }
            path.push(node);
            node = parent;
        };

        for node in path {
            self.parent[node] = root;
        }
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlinked_triggers_are_their_own_groups() {
        let mut groups = TriggerGroups::new([("a", None), ("b", None)]);
        assert_eq!(groups.find("a"), Some("a"));
        assert_eq!(groups.find("b"), Some("b"));
        assert!(groups.issues().is_empty());
    }

    #[test]
    fn test_chain_resolves_transitively() {
        let mut groups = TriggerGroups::new([("a", Some("b")), ("b", Some("c")), ("c", None)]);
        assert_eq!(groups.find("a"), Some("c"));
        assert_eq!(groups.find("b"), Some("c"));
        assert_eq!(groups.find("c"), Some("c"));
    }

    #[test]
    fn test_unknown_trigger_has_no_group() {
        let mut groups = TriggerGroups::new([("a", None)]);
        assert_eq!(groups.find("zzz"), None);
        assert!(!groups.contains("zzz"));
        assert!(groups.tags("zzz").is_empty());
    }

    #[test]
    fn test_tags_attach_to_representative_in_order() {
        let mut groups = TriggerGroups::new([("a", Some("b")), ("b", None), ("c", None)]);
        assert_eq!(groups.attach_tag("t1", "a"), Some("b"));
        assert_eq!(groups.attach_tag("t2", "b"), Some("b"));
        assert_eq!(groups.attach_tag("t3", "missing"), None);

        assert_eq!(groups.tags("a"), &["t1", "t2"]);
        assert_eq!(groups.tags("b"), &["t1", "t2"]);
        assert!(groups.tags("c").is_empty());
    }

    #[test]
    fn test_dangling_link_stops_at_holder() {
        let mut groups = TriggerGroups::new([("a", Some("b")), ("b", Some("ghost"))]);
        assert_eq!(groups.find("a"), Some("b"));
        assert_eq!(groups.find("b"), Some("b"));
        assert_eq!(
            groups.issues(),
            &[LinkIssue::Dangling {
                trigger: "b",
                link: "ghost"
            }]
        );
    }

    #[test]
    fn test_cycle_is_broken_and_reported_once() {
        let mut groups = TriggerGroups::new([("a", Some("b")), ("b", Some("c")), ("c", Some("a"))]);
        assert_eq!(groups.issues(), &[LinkIssue::Cycle { root: "a" }]);

        let root = groups.find("a");
        assert_eq!(groups.find("b"), root);
        assert_eq!(groups.find("c"), root);
        assert_eq!(groups.issues().len(), 1);
    }

    #[test]
    fn test_self_link_is_not_a_cycle() {
        let mut groups = TriggerGroups::new([("a", Some("a"))]);
        assert_eq!(groups.find("a"), Some("a"));
        assert!(groups.issues().is_empty());
    }

    #[test]
    fn test_duplicate_ids_share_one_slot() {
        let mut groups = TriggerGroups::new([("a", None), ("a", Some("b")), ("b", None)]);
        assert_eq!(groups.find("a"), Some("b"));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    const IDS: [&str; 8] = ["t0", "t1", "t2", "t3", "t4", "t5", "t6", "t7"];
    const GHOSTS: [&str; 2] = ["ghost0", "ghost1"];

    /// Strategy for a link table over up to eight triggers. Each link is
    /// absent, points at any declared trigger, or points at a missing one.
    fn links_strategy() -> impl Strategy<Value = Vec<Option<usize>>> {
        (1..=IDS.len()).prop_flat_map(|count| {
            prop::collection::vec(prop::option::of(0..count + GHOSTS.len()), count)
        })
    }

    fn build(links: &[Option<usize>]) -> TriggerGroups<'static> {
        let count = links.len();
        TriggerGroups::new(links.iter().enumerate().map(|(i, link)| {
            let target = link.map(|t| if t < count { IDS[t] } else { GHOSTS[t - count] });
            (IDS[i], target)
        }))
    }

    /// find(find(t)) == find(t) for every declared trigger.
    fn check_find_idempotent(links: Vec<Option<usize>>) -> Result<(), TestCaseError> {
        let mut groups = build(&links);
        for &id in &IDS[..links.len()] {
            let root = groups.find(id).unwrap();
            prop_assert_eq!(groups.find(root), Some(root));
            prop_assert_eq!(groups.find(id), Some(root));
        }
        Ok(())
    }

    /// A trigger linking to another declared trigger shares its group.
    fn check_links_share_groups(links: Vec<Option<usize>>) -> Result<(), TestCaseError> {
        let mut groups = build(&links);
        for (i, link) in links.iter().enumerate() {
            if let Some(&t) = link.as_ref().filter(|&&t| t < links.len()) {
                prop_assert_eq!(groups.find(IDS[i]), groups.find(IDS[t]));
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn find_idempotent(links in links_strategy()) {
            check_find_idempotent(links)?;
        }

        #[test]
        fn links_share_groups(links in links_strategy()) {
            check_links_share_groups(links)?;
        }
    }
}
