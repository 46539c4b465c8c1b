//! Tree filter
//!
//! Applies an ordered [`RuleSet`] to a decoded document in place.
//!
//! Drop rules delete their field as soon as they are walked. Keep rules are
//! declarative: they collect an allow-list per object and everything outside
//! it is pruned after the last rule. The asymmetry is observable, e.g. a keep
//! rule cannot bring back a field an earlier drop rule removed.
//!
//! A rule whose path runs through a missing key or a non-object value is
//! skipped without affecting the other rules. Filtering never fails.

mod keep_set;

pub use keep_set::KeepSets;

use crate::rule::{FilterRule, Polarity, RuleSet};
use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

/// `kind` value marking a collection document
pub const LIST_KIND: &str = "List";

/// Filter a decoded document in place
///
/// `None`, `null` and non-object roots are left alone. A collection document
/// (`kind: List` with an `items` sequence) has each object item filtered
/// independently; `kind`, `items` and the other wrapper fields are untouched.
#[instrument(level = "debug", skip_all, fields(rules = rules.len()))]
pub fn apply(document: Option<&mut Value>, rules: &RuleSet) {
    let Some(Value::Object(root)) = document else {
        return;
    };
    if rules.is_empty() {
        return;
    }

    if let Some(items) = collection_items(root) {
        debug!(items = items.len(), "Filtering collection document");
        for item in items.iter_mut().filter_map(Value::as_object_mut) {
            filter_object(item, rules);
        }
        return;
    }

    filter_object(root, rules);
}

/// Check if an object is a collection document
pub fn is_collection(object: &Map<String, Value>) -> bool {
    object.get("kind").and_then(Value::as_str) == Some(LIST_KIND)
        && object.get("items").is_some_and(Value::is_array)
}

fn collection_items(object: &mut Map<String, Value>) -> Option<&mut Vec<Value>> {
    if !is_collection(object) {
        return None;
    }
    object.get_mut("items").and_then(Value::as_array_mut)
}

/// Apply rules to a single object, ignoring any collection wrapper
pub fn filter_object(object: &mut Map<String, Value>, rules: &RuleSet) {
    let mut keep_sets = KeepSets::new();

    for rule in rules {
        walk(object, rule, &mut keep_sets);
    }

    if !keep_sets.is_empty() {
        let removed = keep_sets.prune(object);
        trace!(objects = keep_sets.len(), removed, "Pruned unkept fields");
    }
}

fn walk(root: &mut Map<String, Value>, rule: &FilterRule, keep_sets: &mut KeepSets) {
    let Some((last, parents)) = rule.path.split_last() else {
        return;
    };

    let mut current = root;
    for (depth, key) in parents.iter().enumerate() {
        let Some(Value::Object(child)) = current.get_mut(key) else {
            trace!(rule = %rule, segment = %key, "Rule path not present, skipping");
            return;
        };
        if rule.is_keep() {
            keep_sets.keep(&rule.path[..depth], key);
        }
        current = child;
    }

    match rule.polarity {
        Polarity::Drop => {
            if current.shift_remove(last).is_some() {
                trace!(rule = %rule, "Dropped field");
            }
        }
        Polarity::Keep => keep_sets.keep(parents, last),
    }
}
