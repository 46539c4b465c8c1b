//! Deferred keep bookkeeping
//!
//! Keep rules never delete anything while rules are being walked. Each one
//! records the key it wants preserved against the object that holds it, and
//! the objects are pruned down to their recorded keys once every rule has run.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

/// Per-object accumulator of field names preserved by keep rules
///
/// Objects are identified by their full segment path from the root. Paths are
/// stored as segment vectors, so `["a.b"]` and `["a", "b"]` stay distinct.
#[derive(Debug, Default)]
pub struct KeepSets {
    sets: BTreeMap<Vec<String>, BTreeSet<String>>,
}

impl KeepSets {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` as kept in the object at `parent`
    pub fn keep(&mut self, parent: &[String], key: &str) {
        if let Some(set) = self.sets.get_mut(parent) {
            set.insert(key.to_owned());
        } else {
            self.sets
                .insert(parent.to_vec(), BTreeSet::from([key.to_owned()]));
        }
    }

    /// Field names kept in the object at `parent`, if any keep rule reached it
    pub fn get(&self, parent: &[String]) -> Option<&BTreeSet<String>> {
        self.sets.get(parent)
    }

    /// Number of objects with a keep-set
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if no keep rule applied
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Remove every key not in its object's keep-set
    ///
    /// Objects that no keep rule reached are untouched. An object that has been
    /// removed by a drop rule since it was recorded is skipped.
    ///
    /// Returns the number of keys removed.
    pub fn prune(&self, root: &mut Map<String, Value>) -> usize {
        let mut removed = 0;

        for (path, keep) in &self.sets {
            let Some(object) = resolve_mut(root, path) else {
                trace!(path = ?path, "Kept object no longer present");
                continue;
            };

            let before = object.len();
            object.retain(|key, _| keep.contains(key));
            removed += before - object.len();
        }

        removed
    }
}

fn resolve_mut<'a>(
    root: &'a mut Map<String, Value>,
    path: &[String],
) -> Option<&'a mut Map<String, Value>> {
    let mut current = root;
    for key in path {
        current = current.get_mut(key)?.as_object_mut()?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_keep_is_union() {
        let mut sets = KeepSets::new();
        sets.keep(&path(&["a"]), "b");
        sets.keep(&path(&["a"]), "c");
        sets.keep(&path(&["a"]), "b");

        assert_eq!(sets.len(), 1);
        let kept: Vec<_> = sets.get(&path(&["a"])).unwrap().iter().cloned().collect();
        assert_eq!(kept, vec!["b", "c"]);
    }

    #[test]
    fn test_dotted_segment_is_distinct_context() {
        let mut sets = KeepSets::new();
        sets.keep(&path(&["a.b"]), "x");
        sets.keep(&path(&["a", "b"]), "y");

        assert_eq!(sets.len(), 2);
    }

    #[test]
    fn test_prune_counts_and_skips_missing() {
        let mut doc = json!({"a": {"b": 1, "c": 2, "d": 3}, "e": 4});
        let mut sets = KeepSets::new();
        sets.keep(&path(&["a"]), "b");
        sets.keep(&path(&["gone"]), "x");

        let removed = sets.prune(doc.as_object_mut().unwrap());

        assert_eq!(removed, 2);
        assert_eq!(doc, json!({"a": {"b": 1}, "e": 4}));
    }
}
