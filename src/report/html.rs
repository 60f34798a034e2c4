//! Full HTML page rendering.

use std::fmt::Write;

use crate::planner::html_escape;

use super::{ActionSummary, Report, ReportEntry};

const STYLESHEET: &str = r"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; padding: 24px; background: #f6f8fa; color: #24292f; }
h1 { margin: 0 0 4px 0; }
.meta { color: #57606a; font-size: 0.9em; margin-bottom: 20px; }
.summary { display: flex; gap: 12px; flex-wrap: wrap; margin-bottom: 24px; }
.summary-box { background: #fff; border: 1px solid #d0d7de; border-radius: 6px; padding: 12px 16px; min-width: 110px; }
.summary-box .count { font-size: 1.6em; font-weight: 600; }
.summary-box .label { color: #57606a; font-size: 0.85em; text-transform: uppercase; }
.resource-item { background: #fff; border: 1px solid #d0d7de; border-left-width: 4px; border-radius: 6px; margin-bottom: 8px; }
.resource-item summary { cursor: pointer; padding: 10px 12px; font-family: monospace; }
.resource-item.create { border-left-color: #2da44e; }
.resource-item.update { border-left-color: #bf8700; }
.resource-item.delete { border-left-color: #cf222e; }
.resource-item.replace { border-left-color: #8250df; }
.resource-item.no-op { border-left-color: #8c959f; }
.action { display: inline-block; font-size: 0.75em; font-weight: 600; padding: 2px 6px; border-radius: 4px; margin-right: 4px; color: #fff; font-family: sans-serif; }
.action-create { background: #2da44e; }
.action-update { background: #bf8700; }
.action-delete { background: #cf222e; }
.action-replace { background: #8250df; }
.action-no-op { background: #8c959f; }
.resource-type { color: #57606a; margin-left: 6px; }
.resource-attributes { padding: 8px 16px 12px 16px; border-top: 1px solid #d0d7de; }
.attribute-item { margin: 3px 0; font-family: monospace; }
.attribute-key { font-weight: 600; margin-right: 6px; }
.attribute-value { white-space: pre-wrap; word-break: break-all; }
pre.attribute-value { margin: 2px 0 2px 16px; }
.attribute-added { color: #116329; }
.attribute-removed { color: #a40e26; }
.attribute-computed { color: #57606a; font-style: italic; }
.diff-container { display: flex; gap: 16px; }
.diff-column { flex: 1; min-width: 0; }
.diff-header { font-weight: 600; border-bottom: 1px solid #d0d7de; margin-bottom: 4px; }
";

/// Renders a [`Report`] as a self-contained HTML page.
#[derive(Debug, Clone, Copy)]
pub struct HtmlRenderer {
    /// Whether resource items start collapsed.
    collapse_resources: bool,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    /// Creates a renderer with collapsed resource items.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            collapse_resources: true,
        }
    }

    /// Sets whether resource items start collapsed.
    #[must_use]
    pub const fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapse_resources = collapsed;
        self
    }

    /// Renders the page.
    #[must_use]
    pub fn render(&self, report: &Report) -> String {
        let title = html_escape(&report.title);
        let mut out = String::with_capacity(4096 + report.entries.len() * 512);

        let _ = writeln!(
            out,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{title}</title>\n<style>{STYLESHEET}</style>\n</head>\n<body>\n\
             <h1>{title}</h1>"
        );

        out.push_str("<div class=\"meta\">");
        if let Some(version) = &report.terraform_version {
            let _ = write!(out, "Terraform {} &middot; ", html_escape(version));
        }
        let _ = writeln!(
            out,
            "Generated {}</div>",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );

        write_summary(&mut out, &report.summary, report.drift_count);

        let _ = writeln!(
            out,
            "<h2>Resource Changes ({} total)</h2>",
            report.summary.total
        );
        if report.entries.is_empty() {
            out.push_str("<p>No resource changes detected.</p>\n");
        } else {
            for entry in &report.entries {
                self.write_entry(&mut out, entry);
            }
        }

        let _ = writeln!(
            out,
            "<h2>Resource Drift ({} total)</h2>",
            report.drift_count
        );

        out.push_str("</body>\n</html>\n");
        out
    }

    fn write_entry(&self, out: &mut String, entry: &ReportEntry) {
        let open = if self.collapse_resources { "" } else { " open" };
        let _ = write!(
            out,
            "<details class=\"resource-item {}\"{open}>\n<summary>",
            entry.action.css_class()
        );

        for badge in &entry.badges {
            let _ = write!(
                out,
                "<span class=\"action action-{}\">{}</span>",
                badge.class,
                html_escape(&badge.label)
            );
        }
        out.push_str(&html_escape(&entry.address));
        if let Some(resource_type) = &entry.resource_type {
            let _ = write!(
                out,
                "<span class=\"resource-type\">{}</span>",
                html_escape(resource_type)
            );
        }
        out.push_str("</summary>\n");

        let _ = writeln!(
            out,
            "<div class=\"resource-attributes\">{}</div>\n</details>",
            entry.detail
        );
    }
}

fn write_summary(out: &mut String, summary: &ActionSummary, drift_count: usize) {
    out.push_str("<div class=\"summary\">\n");
    for (label, count) in [
        ("Total", summary.total),
        ("Create", summary.create),
        ("Update", summary.update),
        ("Delete", summary.delete),
        ("Replace", summary.replace),
        ("Drift", drift_count),
    ] {
        let _ = writeln!(
            out,
            "<div class=\"summary-box\"><div class=\"count\">{count}</div>\
             <div class=\"label\">{label}</div></div>"
        );
    }
    out.push_str("</div>\n");
}
