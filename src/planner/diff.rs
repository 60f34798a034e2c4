//! Field-level diff between two resource states.
//!
//! This module computes which top-level attributes differ between a
//! resource's `before` and `after` states.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use crate::plan::Attributes;

use super::compare::values_equal;

/// Engine for computing field diffs between resource states.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiffEngine;

/// How a single field differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldChangeKind {
    /// Present only in `after`.
    Added,
    /// Present only in `before`.
    Removed,
    /// Present on both sides with different values.
    Changed,
}

/// A field that differs between two states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    /// Attribute name.
    pub key: String,
    /// Type of difference.
    pub kind: FieldChangeKind,
}

/// The set of differing fields, sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldDiff {
    changes: Vec<FieldChange>,
}

impl DiffEngine {
    /// Creates a new diff engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes the fields whose values differ between `before` and `after`.
    ///
    /// Every key of either side is considered once. Keys with equal values on
    /// both sides are omitted.
    #[must_use]
    pub fn changed_fields(&self, before: &Attributes, after: &Attributes) -> FieldDiff {
        let keys: BTreeSet<&str> = before
            .keys()
            .chain(after.keys())
            .map(String::as_str)
            .collect();

        let changes: Vec<FieldChange> = keys
            .into_iter()
            .filter_map(|key| {
                let kind = match (before.get(key), after.get(key)) {
                    (None, Some(_)) => FieldChangeKind::Added,
                    (Some(_), None) => FieldChangeKind::Removed,
                    (Some(old), Some(new)) if !values_equal(old, new) => FieldChangeKind::Changed,
                    _ => return None,
                };
                Some(FieldChange {
                    key: key.to_string(),
                    kind,
                })
            })
            .collect();

        debug!("{} of the fields differ", changes.len());
        FieldDiff { changes }
    }
}

impl FieldDiff {
    /// Returns true if no field differs.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns the number of differing fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.changes.len()
    }

    /// Iterates over the differing keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.changes.iter().map(|c| c.key.as_str())
    }

    /// Returns how the given key differs, if it does.
    #[must_use]
    pub fn kind_of(&self, key: &str) -> Option<FieldChangeKind> {
        self.changes
            .binary_search_by(|c| c.key.as_str().cmp(key))
            .ok()
            .map(|i| self.changes[i].kind)
    }
}

impl std::fmt::Display for FieldDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, change) in self.changes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", change.key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::AttrValue;
    use serde_json::json;

    fn attrs(value: serde_json::Value) -> Attributes {
        match AttrValue::from(value) {
            AttrValue::Map(map) => map,
            other => panic!("expected an object, got {other:?}"),
        }
    }

    #[test]
    fn test_identical_states_have_no_diff() {
        let state = attrs(json!({"ami": "ami-1", "tags": {"env": "prod"}, "ports": [80]}));
        let copy = attrs(json!({"ports": [80], "tags": {"env": "prod"}, "ami": "ami-1"}));
        let engine = DiffEngine::new();

        assert!(engine.changed_fields(&state, &state).is_empty());
        assert!(engine.changed_fields(&state, &copy).is_empty());
    }

    #[test]
    fn test_changed_field() {
        let diff = DiffEngine::new().changed_fields(
            &attrs(json!({"ami": "ami-1"})),
            &attrs(json!({"ami": "ami-2"})),
        );

        assert_eq!(diff.keys().collect::<Vec<_>>(), vec!["ami"]);
        assert_eq!(diff.kind_of("ami"), Some(FieldChangeKind::Changed));
    }

    #[test]
    fn test_added_and_removed_fields() {
        let diff = DiffEngine::new().changed_fields(
            &attrs(json!({"old": 1, "same": true})),
            &attrs(json!({"new": 2, "same": true})),
        );

        assert_eq!(diff.len(), 2);
        assert_eq!(diff.kind_of("new"), Some(FieldChangeKind::Added));
        assert_eq!(diff.kind_of("old"), Some(FieldChangeKind::Removed));
        assert_eq!(diff.kind_of("same"), None);
    }

    #[test]
    fn test_null_to_value_is_a_change() {
        let diff = DiffEngine::new().changed_fields(
            &attrs(json!({"description": null})),
            &attrs(json!({"description": "web"})),
        );
        assert_eq!(diff.kind_of("description"), Some(FieldChangeKind::Changed));
    }

    #[test]
    fn test_keys_are_sorted() {
        let diff = DiffEngine::new().changed_fields(
            &attrs(json!({"zeta": 1, "alpha": 1, "mid": 1})),
            &attrs(json!({"zeta": 2, "alpha": 2, "beta": 0})),
        );

        assert_eq!(
            diff.keys().collect::<Vec<_>>(),
            vec!["alpha", "beta", "mid", "zeta"]
        );
        assert_eq!(diff.to_string(), "alpha, beta, mid, zeta");
    }

    #[test]
    fn test_serializes_as_list() {
        let diff = DiffEngine::new()
            .changed_fields(&attrs(json!({})), &attrs(json!({"name": "web"})));
        let json = serde_json::to_value(&diff).expect("diff serializes");

        assert_eq!(json, json!([{"key": "name", "kind": "added"}]));
    }
}
