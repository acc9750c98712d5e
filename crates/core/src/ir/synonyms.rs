//! Synonym classes over function names.
//!
//! A flat union-find: every class is a slot in `sets`, and `index` maps each
//! name to the slot currently holding its class. A merge moves the smaller
//! class into the larger one and repoints the moved names, so a lookup is a
//! single map access.
//!
//! Lookups are only meaningful once every alias has been added.

use std::collections::{BTreeSet, HashMap};

/// Name -> set of every name known to be synonymous with it.
#[derive(Debug, Clone, Default)]
pub struct SynonymMap {
    sets: Vec<BTreeSet<String>>,
    index: HashMap<String, usize>,
}

impl SynonymMap {
    /// Make sure `name` has a class, creating `{name}` if it has none.
    /// Returns the slot holding the class.
    pub fn add_singleton(&mut self, name: &str) -> usize {
        if let Some(&slot) = self.index.get(name) {
            return slot;
        }
        let slot = self.sets.len();
        self.sets.push(BTreeSet::from([name.to_string()]));
        self.index.insert(name.to_string(), slot);
        slot
    }

    /// Record that `name` and `alias` denote the same function, merging
    /// their classes.
    pub fn add_alias(&mut self, name: &str, alias: &str) {
        let a = self.add_singleton(name);
        let b = self.add_singleton(alias);
        if a == b {
            return;
        }
        let (keep, absorb) = if self.sets[a].len() >= self.sets[b].len() {
            (a, b)
        } else {
            (b, a)
        };
        let moved = std::mem::take(&mut self.sets[absorb]);
        for member in &moved {
            self.index.insert(member.clone(), keep);
        }
        self.sets[keep].extend(moved);
    }

    /// Every name synonymous with `name`, itself included.
    pub fn get_synonyms_for(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.index.get(name).map(|&slot| &self.sets[slot])
    }

    /// Whether `a` and `b` are in the same class.
    #[cfg(test)]
    pub fn are_synonyms(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Number of names with a class.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no name has been added.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn names(map: &SynonymMap, name: &str) -> Vec<String> {
        map.get_synonyms_for(name)
            .unwrap()
            .iter()
            .cloned()
            .collect()
    }

    #[test]
    fn test_singleton_is_reflexive_and_idempotent() {
        let mut map = SynonymMap::default();
        let first = map.add_singleton("Foo");
        let second = map.add_singleton("Foo");
        assert_eq!(first, second);
        assert_eq!(names(&map, "Foo"), ["Foo"]);
        assert_eq!(map.len(), 1);
        assert!(map.get_synonyms_for("Bar").is_none());
    }

    #[test]
    fn test_alias_creates_both_names() {
        let mut map = SynonymMap::default();
        map.add_alias("MapBuffer", "MapBufferARB");
        assert_eq!(names(&map, "MapBuffer"), ["MapBuffer", "MapBufferARB"]);
        assert_eq!(names(&map, "MapBufferARB"), ["MapBuffer", "MapBufferARB"]);
    }

    #[test]
    fn test_merge_is_transitive() {
        let mut map = SynonymMap::default();
        map.add_alias("A", "B");
        map.add_alias("C", "D");
        map.add_singleton("E");
        assert!(!map.are_synonyms("A", "C"));

        map.add_alias("D", "B");
        for name in ["A", "B", "C", "D"] {
            assert_eq!(names(&map, name), ["A", "B", "C", "D"]);
        }
        assert!(map.are_synonyms("A", "D"));
        assert!(!map.are_synonyms("A", "E"));
        assert_eq!(names(&map, "E"), ["E"]);
    }

    #[test]
    fn test_repeated_alias_is_harmless() {
        let mut map = SynonymMap::default();
        map.add_alias("A", "B");
        map.add_alias("B", "A");
        map.add_alias("A", "A");
        assert_eq!(names(&map, "A"), ["A", "B"]);
        assert_eq!(map.len(), 2);
    }
}
