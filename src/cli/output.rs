//! Output formatting for the CLI.
//!
//! This module turns a [`Report`] into the selected output format and
//! writes it to its destination.

use colored::Colorize;
use std::fmt::Write;
use std::path::Path;
use tabled::{Table, Tabled};
use tracing::info;

use crate::error::{RenderError, Result, VisualizerError};
use crate::reconciler::ResolvedAction;
use crate::report::{HtmlRenderer, Report, ReportEntry};

use super::commands::OutputFormat;

/// Longest address shown in the terminal table.
const MAX_ADDRESS_LEN: usize = 60;
/// Longest changed-field list shown in the terminal table.
const MAX_FIELDS_LEN: usize = 40;

/// Output formatter for the CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
    /// Page renderer for HTML output.
    html: HtmlRenderer,
}

/// Change row for table display.
#[derive(Tabled)]
struct ChangeRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Resource")]
    address: String,
    #[tabled(rename = "Type")]
    resource_type: String,
    #[tabled(rename = "Changed fields")]
    fields: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self {
            format,
            html: HtmlRenderer::new(),
        }
    }

    /// Sets the renderer used for HTML output.
    #[must_use]
    pub const fn with_html_renderer(mut self, html: HtmlRenderer) -> Self {
        self.html = html;
        self
    }

    /// Returns the output format.
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Renders a report in the configured format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, report: &Report) -> Result<String> {
        match self.format {
            OutputFormat::Html => Ok(self.html.render(report)),
            OutputFormat::Text => Ok(Self::format_text(report)),
            OutputFormat::Json => serde_json::to_string_pretty(report).map_err(|e| {
                VisualizerError::Render(RenderError::Serialization {
                    message: e.to_string(),
                })
            }),
        }
    }

    /// Formats a report as a terminal summary.
    fn format_text(report: &Report) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "\n{}", report.title.bold());
        if let Some(version) = &report.terraform_version {
            let _ = writeln!(output, "   Terraform {version}");
        }
        output.push('\n');

        if report.entries.is_empty() {
            let _ = writeln!(output, "{} No resource changes detected.", "✓".green());
        } else {
            let rows: Vec<ChangeRow> = report
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| ChangeRow {
                    index: i + 1,
                    action: Self::format_action(entry),
                    address: Self::truncate(&entry.address, MAX_ADDRESS_LEN),
                    resource_type: entry.resource_type.clone().unwrap_or_default(),
                    fields: entry
                        .changed_fields
                        .as_ref()
                        .map(|diff| Self::truncate(&diff.to_string(), MAX_FIELDS_LEN))
                        .unwrap_or_default(),
                })
                .collect();

            output.push_str(&Table::new(rows).to_string());
            output.push('\n');
        }

        let summary = &report.summary;
        let _ = writeln!(
            output,
            "\nPlan: {} to create, {} to update, {} to delete, {} to replace",
            summary.create.to_string().green(),
            summary.update.to_string().yellow(),
            summary.delete.to_string().red(),
            summary.replace.to_string().magenta()
        );
        let _ = writeln!(
            output,
            "Changes: {} total, drift: {}",
            summary.total, report.drift_count
        );

        output
    }

    fn format_action(entry: &ReportEntry) -> String {
        let label = entry
            .badges
            .iter()
            .map(|b| b.label.to_lowercase())
            .collect::<Vec<_>>()
            .join(", ");

        match entry.action {
            ResolvedAction::Create => format!("+{label}").green().to_string(),
            ResolvedAction::Update => format!("~{label}").yellow().to_string(),
            ResolvedAction::Delete => format!("-{label}").red().to_string(),
            ResolvedAction::Replace => format!("±{label}").magenta().to_string(),
            ResolvedAction::NoOp => label.dimmed().to_string(),
        }
    }

    /// Truncates a string to a maximum length in characters.
    fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else {
            let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
            format!("{head}...")
        }
    }
}

/// Writes rendered output to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .map_err(|e| VisualizerError::Render(RenderError::write_failed(path, e.to_string())))?;
    info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::plan::PlanDocument;
    use crate::report::ReportBuilder;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_report() -> Report {
        let document = PlanDocument::from_json(&json!({
            "terraform_version": "1.8.0",
            "resource_changes": [
                {"address": "aws_instance.web", "type": "aws_instance",
                 "change": {"actions": ["update"], "before": {"ami": "ami-1"}, "after": {"ami": "ami-2"}}},
                {"address": "aws_s3_bucket.logs", "type": "aws_s3_bucket",
                 "change": {"actions": ["create"], "after": {"bucket": "logs"}}}
            ]
        }))
        .expect("valid plan");
        ReportBuilder::new(&ReportConfig::default()).build(&document)
    }

    #[test]
    fn test_text_summary() {
        colored::control::set_override(false);
        let output = OutputFormatter::new(OutputFormat::Text)
            .render(&sample_report())
            .expect("text renders");

        assert!(output.contains("Terraform Plan"));
        assert!(output.contains("aws_instance.web"));
        assert!(output.contains("~update"));
        assert!(output.contains("+create"));
        assert!(output.contains("ami"));
        assert!(output.contains("Plan: 1 to create, 1 to update, 0 to delete, 0 to replace"));
        assert!(output.contains("Changes: 2 total, drift: 0"));
    }

    #[test]
    fn test_text_summary_empty() {
        colored::control::set_override(false);
        let document = PlanDocument::from_json(&json!({})).expect("valid plan");
        let report = ReportBuilder::new(&ReportConfig::default()).build(&document);

        let output = OutputFormatter::new(OutputFormat::Text)
            .render(&report)
            .expect("text renders");
        assert!(output.contains("No resource changes detected."));
    }

    #[test]
    fn test_json_output() {
        let output = OutputFormatter::new(OutputFormat::Json)
            .render(&sample_report())
            .expect("json renders");

        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert_eq!(value["entries"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["terraform_version"], "1.8.0");
    }

    #[test]
    fn test_html_output_respects_renderer() {
        let output = OutputFormatter::new(OutputFormat::Html)
            .with_html_renderer(HtmlRenderer::new().with_collapsed(false))
            .render(&sample_report())
            .expect("html renders");

        assert!(output.contains("<details class=\"resource-item update\" open>"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(OutputFormatter::truncate("short", 10), "short");
        assert_eq!(OutputFormatter::truncate("abcdefghijkl", 8), "abcde...");
    }

    #[test]
    fn test_write_output() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let path = temp.path().join("index.html");

        write_output(&path, "<html></html>").expect("write succeeds");
        assert_eq!(
            std::fs::read_to_string(&path).expect("Failed to read output"),
            "<html></html>"
        );
    }

    #[test]
    fn test_write_output_to_missing_dir() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let path = temp.path().join("missing").join("index.html");

        let result = write_output(&path, "x");
        assert!(matches!(
            result,
            Err(VisualizerError::Render(RenderError::WriteFailed { .. }))
        ));
    }
}
