//! Reconciler for planned changes and observed drift.
//!
//! Terraform reports the resources it will change and, separately, the
//! resources it saw drift out of band. A resource deleted out of band that the
//! plan creates again is really being replaced. This module classifies each
//! planned change accordingly and counts the drift that remains independent.

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::plan::{ChangeAction, ChangeRecord};

/// The action shown for a change in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolvedAction {
    /// The resource will be created.
    Create,
    /// The resource will be updated in place.
    Update,
    /// The resource will be destroyed.
    Delete,
    /// The resource will be destroyed and created again.
    Replace,
    /// Nothing to show; also used for actions without their own display.
    NoOp,
}

/// A planned change together with its resolved action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedChange<'a> {
    /// The record from the plan.
    pub record: &'a ChangeRecord,
    /// The action to display.
    pub action: ResolvedAction,
}

/// Classifies planned changes against observed drift.
#[derive(Debug, Default, Clone, Copy)]
pub struct Reconciler;

/// Result of a reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationResult<'a> {
    /// Surviving changes in plan order.
    pub changes: Vec<ClassifiedChange<'a>>,
    /// Number of drift records not absorbed into a replace.
    pub drift_count: usize,
    /// Addresses whose drift deletion was absorbed into a replace, in drift order.
    pub absorbed: Vec<&'a str>,
    /// Number of no-op changes that were dropped.
    pub dropped: usize,
}

impl ResolvedAction {
    /// Resolves the display action of a primitive action.
    #[must_use]
    pub const fn from_action(action: &ChangeAction) -> Self {
        match action {
            ChangeAction::Create => Self::Create,
            ChangeAction::Update => Self::Update,
            ChangeAction::Delete => Self::Delete,
            ChangeAction::Read | ChangeAction::NoOp | ChangeAction::Other(_) => Self::NoOp,
        }
    }

    /// Returns the display class (also the CSS class) of this action.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Replace => "replace",
            Self::NoOp => "no-op",
        }
    }

    /// Returns the upper-case badge label of this action.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Replace => "REPLACE",
            Self::NoOp => "NO-OP",
        }
    }
}

impl Reconciler {
    /// Creates a new reconciler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Classifies `plan_changes` against `drift`.
    ///
    /// No-op changes are dropped. A change whose authoritative action is
    /// create is promoted to replace when a drift record at the same address
    /// is a delete; duplicates are promoted independently. The drift count
    /// excludes every drift record at an address absorbed this way.
    #[must_use]
    pub fn reconcile<'a>(
        &self,
        plan_changes: &'a [ChangeRecord],
        drift: &'a [ChangeRecord],
    ) -> ReconciliationResult<'a> {
        let drift_deletes: HashSet<&str> = drift
            .iter()
            .filter(|d| *d.authoritative_action() == ChangeAction::Delete)
            .map(|d| d.address.as_str())
            .collect();

        let mut dropped = 0;
        let mut changes = Vec::with_capacity(plan_changes.len());
        for record in plan_changes {
            let action = record.authoritative_action();
            if *action == ChangeAction::NoOp {
                dropped += 1;
                continue;
            }

            let resolved = if *action == ChangeAction::Create
                && drift_deletes.contains(record.address.as_str())
            {
                debug!(
                    "{} is deleted in drift and created in plan, marking as replace",
                    record.address
                );
                ResolvedAction::Replace
            } else {
                ResolvedAction::from_action(action)
            };

            changes.push(ClassifiedChange {
                record,
                action: resolved,
            });
        }

        let absorbed = absorbed_addresses(plan_changes, drift);
        let drift_count = drift
            .iter()
            .filter(|d| !absorbed.contains(&d.address.as_str()))
            .count();

        info!(
            "Reconciled {} changes ({} no-op dropped), {} drift records, {} absorbed into replace",
            changes.len(),
            dropped,
            drift_count,
            absorbed.len()
        );

        ReconciliationResult {
            changes,
            drift_count,
            absorbed,
            dropped,
        }
    }
}

/// Addresses that are a drift delete and a planned create, without repeats.
fn absorbed_addresses<'a>(
    plan_changes: &'a [ChangeRecord],
    drift: &'a [ChangeRecord],
) -> Vec<&'a str> {
    let planned_creates: HashSet<&str> = plan_changes
        .iter()
        .filter(|c| *c.authoritative_action() == ChangeAction::Create)
        .map(|c| c.address.as_str())
        .collect();

    let mut seen = HashSet::new();
    drift
        .iter()
        .filter(|d| *d.authoritative_action() == ChangeAction::Delete)
        .map(|d| d.address.as_str())
        .filter(|address| planned_creates.contains(address) && seen.insert(*address))
        .collect()
}

impl ReconciliationResult<'_> {
    /// Returns the number of changes that will be rendered.
    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.changes.len()
    }

    /// Counts the changes resolved to the given action.
    #[must_use]
    pub fn count(&self, action: ResolvedAction) -> usize {
        self.changes.iter().filter(|c| c.action == action).count()
    }
}

impl std::fmt::Display for ResolvedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.css_class())
    }
}

impl std::fmt::Display for ReconciliationResult<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Resource changes: {}", self.total_changes())?;
        writeln!(f, "  Create: {}", self.count(ResolvedAction::Create))?;
        writeln!(f, "  Update: {}", self.count(ResolvedAction::Update))?;
        writeln!(f, "  Delete: {}", self.count(ResolvedAction::Delete))?;
        writeln!(f, "  Replace: {}", self.count(ResolvedAction::Replace))?;
        write!(f, "Resource drift: {}", self.drift_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(address: &str, actions: &[&str]) -> ChangeRecord {
        ChangeRecord::new(address, actions.iter().map(|a| ChangeAction::parse(a)).collect())
    }

    #[test]
    fn test_create_with_drift_delete_is_replace() {
        let plan = vec![record("aws_instance.web", &["create"])];
        let drift = vec![record("aws_instance.web", &["delete"])];

        let result = Reconciler::new().reconcile(&plan, &drift);

        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].action, ResolvedAction::Replace);
        assert_eq!(result.drift_count, 0);
        assert_eq!(result.absorbed, vec!["aws_instance.web"]);
    }

    #[test]
    fn test_noop_is_dropped() {
        let plan = vec![
            record("a", &["no-op"]),
            record("b", &["update"]),
            record("c", &[]),
        ];

        let result = Reconciler::new().reconcile(&plan, &[]);

        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].record.address, "b");
        assert_eq!(result.dropped, 2);
    }

    #[test]
    fn test_only_first_action_is_authoritative() {
        let plan = vec![
            record("a", &["delete", "create"]),
            record("b", &["create", "delete"]),
        ];
        let drift = vec![record("a", &["delete"]), record("b", &["delete"])];

        let result = Reconciler::new().reconcile(&plan, &drift);

        assert_eq!(result.changes[0].action, ResolvedAction::Delete);
        assert_eq!(result.changes[1].action, ResolvedAction::Replace);
        assert_eq!(result.drift_count, 1);
    }

    #[test]
    fn test_drift_update_does_not_promote() {
        let plan = vec![record("a", &["create"])];
        let drift = vec![record("a", &["update"])];

        let result = Reconciler::new().reconcile(&plan, &drift);

        assert_eq!(result.changes[0].action, ResolvedAction::Create);
        assert_eq!(result.drift_count, 1);
        assert!(result.absorbed.is_empty());
    }

    #[test]
    fn test_drift_delete_without_create_is_counted() {
        let plan = vec![record("a", &["update"])];
        let drift = vec![record("a", &["delete"]), record("b", &["delete"])];

        let result = Reconciler::new().reconcile(&plan, &drift);

        assert_eq!(result.changes[0].action, ResolvedAction::Update);
        assert_eq!(result.drift_count, 2);
    }

    #[test]
    fn test_absorbed_address_excludes_all_its_drift() {
        let plan = vec![record("a", &["create"])];
        let drift = vec![
            record("a", &["update"]),
            record("a", &["delete"]),
            record("b", &["update"]),
        ];

        let result = Reconciler::new().reconcile(&plan, &drift);

        assert_eq!(result.drift_count, 1);
    }

    #[test]
    fn test_duplicate_addresses_promoted_per_record() {
        let plan = vec![
            record("a", &["create"]),
            record("a", &["create"]),
            record("a", &["update"]),
        ];
        let drift = vec![record("a", &["delete"]), record("a", &["delete"])];

        let result = Reconciler::new().reconcile(&plan, &drift);

        let actions: Vec<_> = result.changes.iter().map(|c| c.action).collect();
        assert_eq!(
            actions,
            vec![ResolvedAction::Replace, ResolvedAction::Replace, ResolvedAction::Update]
        );
        assert_eq!(result.absorbed, vec!["a"]);
        assert_eq!(result.drift_count, 0);
    }

    #[test]
    fn test_noop_create_is_not_a_planned_create() {
        let plan = vec![record("a", &["no-op", "create"])];
        let drift = vec![record("a", &["delete"])];

        let result = Reconciler::new().reconcile(&plan, &drift);

        assert!(result.changes.is_empty());
        assert_eq!(result.drift_count, 1);
    }

    #[test]
    fn test_read_and_unknown_actions_display_as_noop() {
        let plan = vec![record("data.x", &["read"]), record("y", &["forget"])];

        let result = Reconciler::new().reconcile(&plan, &[]);

        assert_eq!(result.changes.len(), 2);
        assert!(result.changes.iter().all(|c| c.action == ResolvedAction::NoOp));
    }

    #[test]
    fn test_order_is_preserved() {
        let plan = vec![
            record("c", &["create"]),
            record("a", &["delete"]),
            record("b", &["update"]),
        ];

        let result = Reconciler::new().reconcile(&plan, &[]);

        let addresses: Vec<_> = result.changes.iter().map(|c| c.record.address.as_str()).collect();
        assert_eq!(addresses, vec!["c", "a", "b"]);
        assert_eq!(result.count(ResolvedAction::Create), 1);
    }

    #[test]
    fn test_empty_inputs() {
        let result = Reconciler::new().reconcile(&[], &[]);

        assert_eq!(result.total_changes(), 0);
        assert_eq!(result.drift_count, 0);
        assert!(result.to_string().contains("Resource drift: 0"));
    }
}
