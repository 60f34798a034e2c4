//! Report construction.
//!
//! A [`Report`] is everything the output layer needs: one entry per surviving
//! change with its resolved action, badges and detail fragment, plus the
//! totals. It is built in one pass over the plan document.

mod html;

pub use html::HtmlRenderer;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::ReportConfig;
use crate::plan::PlanDocument;
use crate::planner::{ChangeFormatter, FieldDiff, ValueNormalizer};
use crate::reconciler::{ClassifiedChange, ReconciliationResult, Reconciler, ResolvedAction};

/// A rendered plan report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Report title.
    pub title: String,
    /// Terraform version that produced the plan, when known.
    pub terraform_version: Option<String>,
    /// Plan format version, when known.
    pub format_version: Option<String>,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Rendered changes in plan order.
    pub entries: Vec<ReportEntry>,
    /// Per-action totals.
    pub summary: ActionSummary,
    /// Drift records not absorbed into a replace.
    pub drift_count: usize,
}

/// One rendered change.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    /// Resource address.
    pub address: String,
    /// Resource type, when known.
    pub resource_type: Option<String>,
    /// Resolved display action.
    pub action: ResolvedAction,
    /// Action badges, in display order.
    pub badges: Vec<ActionBadge>,
    /// Differing fields, for updates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_fields: Option<FieldDiff>,
    /// Detail fragment (HTML).
    pub detail: String,
}

/// A single action badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionBadge {
    /// Display class.
    pub class: &'static str,
    /// Upper-case label.
    pub label: String,
}

/// Totals per resolved action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActionSummary {
    /// All rendered changes.
    pub total: usize,
    /// Creates.
    pub create: usize,
    /// In-place updates.
    pub update: usize,
    /// Deletes.
    pub delete: usize,
    /// Replaces.
    pub replace: usize,
    /// Changes without a display action of their own (e.g. reads).
    pub other: usize,
}

/// Builds reports from plan documents.
#[derive(Debug)]
pub struct ReportBuilder {
    /// Report title.
    title: String,
    /// Reconciler.
    reconciler: Reconciler,
    /// Detail fragment formatter.
    formatter: ChangeFormatter,
}

impl ReportBuilder {
    /// Creates a builder from report settings.
    #[must_use]
    pub fn new(config: &ReportConfig) -> Self {
        let normalizer = ValueNormalizer::new().with_max_chars(config.max_value_chars);
        Self {
            title: config.title.clone(),
            reconciler: Reconciler::new(),
            formatter: ChangeFormatter::new()
                .with_normalizer(normalizer)
                .with_unknown_placeholder(config.unknown_placeholder.clone()),
        }
    }

    /// Builds the report for a plan document.
    #[must_use]
    pub fn build(&self, document: &PlanDocument) -> Report {
        let result = self
            .reconciler
            .reconcile(&document.resource_changes, &document.resource_drift);

        let entries: Vec<ReportEntry> = result.changes.iter().map(|c| self.entry(c)).collect();
        debug!("Built {} report entries", entries.len());

        Report {
            title: self.title.clone(),
            terraform_version: document.terraform_version.clone(),
            format_version: document.format_version.clone(),
            generated_at: Utc::now(),
            summary: ActionSummary::from(&result),
            drift_count: result.drift_count,
            entries,
        }
    }

    fn entry(&self, change: &ClassifiedChange<'_>) -> ReportEntry {
        let record = change.record;
        let changed_fields = self.formatter.changed_fields(change);
        let detail = self
            .formatter
            .format_with_diff(change, changed_fields.as_ref());

        ReportEntry {
            address: record.address.clone(),
            resource_type: record.resource_type.clone(),
            action: change.action,
            badges: badges(change),
            changed_fields,
            detail,
        }
    }
}

/// A replace shows one badge; anything else shows each primitive action.
fn badges(change: &ClassifiedChange<'_>) -> Vec<ActionBadge> {
    if change.action == ResolvedAction::Replace {
        return vec![ActionBadge {
            class: ResolvedAction::Replace.css_class(),
            label: String::from(ResolvedAction::Replace.label()),
        }];
    }

    change
        .record
        .actions
        .iter()
        .map(|action| ActionBadge {
            class: ResolvedAction::from_action(action).css_class(),
            label: action.as_str().to_uppercase(),
        })
        .collect()
}

impl From<&ReconciliationResult<'_>> for ActionSummary {
    fn from(result: &ReconciliationResult<'_>) -> Self {
        Self {
            total: result.total_changes(),
            create: result.count(ResolvedAction::Create),
            update: result.count(ResolvedAction::Update),
            delete: result.count(ResolvedAction::Delete),
            replace: result.count(ResolvedAction::Replace),
            other: result.count(ResolvedAction::NoOp),
        }
    }
}

impl Report {
    /// Returns true if the report has nothing to show.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.drift_count == 0
    }
}
