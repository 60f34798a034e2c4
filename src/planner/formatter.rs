//! Detail fragments for classified changes.
//!
//! Each classified change gets an HTML fragment describing its attributes.
//! What the fragment shows depends on the resolved action:
//!
//! - replace: the full prior state, the full planned state, unknown fields
//! - create: the full planned state and unknown fields
//! - delete: the full prior state
//! - update: only the fields that differ, before and after side by side
//!
//! Everything else renders an empty fragment.

use std::fmt::Write;

use crate::plan::{AttrValue, Attributes, ChangeRecord};
use crate::reconciler::{ClassifiedChange, ResolvedAction};

use super::diff::{DiffEngine, FieldDiff};
use super::normalize::ValueNormalizer;

/// Default text shown for fields only known after apply.
pub const DEFAULT_UNKNOWN_PLACEHOLDER: &str = "known after creation";

const ADDED_CLASS: &str = "attribute-added";
const REMOVED_CLASS: &str = "attribute-removed";
const COMPUTED_CLASS: &str = "attribute-computed";

/// Renders detail fragments for classified changes.
#[derive(Debug, Clone)]
pub struct ChangeFormatter {
    /// Value normalizer.
    normalizer: ValueNormalizer,
    /// Diff engine for updates.
    diff_engine: DiffEngine,
    /// Text shown for unknown fields.
    unknown_placeholder: String,
}

impl Default for ChangeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFormatter {
    /// Creates a formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            normalizer: ValueNormalizer::new(),
            diff_engine: DiffEngine::new(),
            unknown_placeholder: String::from(DEFAULT_UNKNOWN_PLACEHOLDER),
        }
    }

    /// Sets the value normalizer.
    #[must_use]
    pub const fn with_normalizer(mut self, normalizer: ValueNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Sets the text shown for unknown fields.
    #[must_use]
    pub fn with_unknown_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.unknown_placeholder = placeholder.into();
        self
    }

    /// Renders the detail fragment for a classified change.
    #[must_use]
    pub fn format(&self, change: &ClassifiedChange<'_>) -> String {
        self.format_with_diff(change, self.changed_fields(change).as_ref())
    }

    /// Computes the changed fields of an update with both states present.
    #[must_use]
    pub fn changed_fields(&self, change: &ClassifiedChange<'_>) -> Option<FieldDiff> {
        match (change.action, &change.record.before, &change.record.after) {
            (ResolvedAction::Update, Some(before), Some(after)) => {
                Some(self.diff_engine.changed_fields(before, after))
            }
            _ => None,
        }
    }

    /// Renders the detail fragment using an already computed update diff.
    ///
    /// `diff` is only read for updates; an update without one renders nothing.
    #[must_use]
    pub fn format_with_diff(
        &self,
        change: &ClassifiedChange<'_>,
        diff: Option<&FieldDiff>,
    ) -> String {
        let record = change.record;
        let mut out = String::new();

        match change.action {
            ResolvedAction::Replace => {
                write_heading(&mut out, "Resource Replacement:");
                if let Some(before) = &record.before {
                    write_heading(&mut out, "Current State (to be removed):");
                    self.write_attributes(&mut out, before, REMOVED_CLASS);
                }
                if let Some(after) = &record.after {
                    write_heading(&mut out, "New State (to be created):");
                    self.write_attributes(&mut out, after, ADDED_CLASS);
                }
                self.write_unknown_section(&mut out, record);
            }
            ResolvedAction::Create => {
                if let Some(after) = &record.after {
                    write_heading(&mut out, "New Resource:");
                    self.write_attributes(&mut out, after, ADDED_CLASS);
                }
                self.write_unknown_section(&mut out, record);
            }
            ResolvedAction::Delete => {
                if let Some(before) = &record.before {
                    write_heading(&mut out, "Resource to Delete:");
                    self.write_attributes(&mut out, before, REMOVED_CLASS);
                }
            }
            ResolvedAction::Update => {
                if let (Some(before), Some(after), Some(diff)) =
                    (&record.before, &record.after, diff)
                {
                    self.write_update(&mut out, before, after, diff);
                }
            }
            ResolvedAction::NoOp => {}
        }

        out
    }

    /// Writes every field of a state. Values that render empty are skipped.
    fn write_attributes(&self, out: &mut String, attrs: &Attributes, class: &str) {
        for (key, value) in attrs {
            let rendered = self.normalizer.normalize(value);
            if !rendered.is_empty() {
                write_attribute(out, class, key, &rendered);
            }
        }
    }

    fn write_unknown_section(&self, out: &mut String, record: &ChangeRecord) {
        if let Some(unknown) = &record.after_unknown {
            write_heading(out, "Computed Fields:");
            for (key, marker) in unknown {
                if is_unknown_marker(marker) {
                    write_attribute(out, COMPUTED_CLASS, key, &self.unknown_placeholder);
                }
            }
        }
    }

    /// Writes the changed fields as two columns.
    ///
    /// A key absent from one side renders nothing in that column.
    fn write_update(
        &self,
        out: &mut String,
        before: &Attributes,
        after: &Attributes,
        diff: &FieldDiff,
    ) {
        if diff.is_empty() {
            return;
        }

        out.push_str("<div class=\"diff-container\">");
        for (header, side, class) in [
            ("Before", before, REMOVED_CLASS),
            ("After", after, ADDED_CLASS),
        ] {
            let _ = write!(
                out,
                "<div class=\"diff-column\"><div class=\"diff-header\">{header}</div>"
            );
            for key in diff.keys() {
                if let Some(value) = side.get(key) {
                    write_attribute(out, class, key, &self.normalizer.normalize(value));
                }
            }
            out.push_str("</div>");
        }
        out.push_str("</div>");
    }
}

/// True for `after_unknown` entries that mark a field as unknown.
const fn is_unknown_marker(marker: &AttrValue) -> bool {
    matches!(
        marker,
        AttrValue::Bool(true) | AttrValue::Map(_) | AttrValue::List(_)
    )
}

fn write_heading(out: &mut String, text: &str) {
    let _ = write!(
        out,
        "<div class=\"attribute-item\"><span class=\"attribute-key\">{}</span></div>",
        html_escape(text)
    );
}

/// Multi-line values go in a `<pre>` so their indentation survives.
fn write_attribute(out: &mut String, class: &str, key: &str, value: &str) {
    let tag = if value.contains('\n') { "pre" } else { "span" };
    let _ = write!(
        out,
        "<div class=\"attribute-item {class}\"><span class=\"attribute-key\">{}:</span>\
         <{tag} class=\"attribute-value\">{}</{tag}></div>",
        html_escape(key),
        html_escape(value)
    );
}

/// Escapes HTML special characters.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
