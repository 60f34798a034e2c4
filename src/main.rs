//! Terraform plan visualizer entrypoint.
//!
//! This is the main entrypoint for the terraform-plan-visualizer command-line tool.

use std::path::Path;
use std::process::ExitCode;

use tfplan_visualizer::cli::{BuildInfo, Cli, OutputFormat, OutputFormatter, write_output};
use tfplan_visualizer::config::{ConfigParser, ConfigValidator, ReportConfig};
use tfplan_visualizer::error::{InputError, Result, VisualizerError};
use tfplan_visualizer::plan::PlanDocument;
use tfplan_visualizer::report::{HtmlRenderer, ReportBuilder};

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if cli.version {
        println!("{}", BuildInfo::CURRENT);
        return ExitCode::SUCCESS;
    }

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is_usage_error() {
                eprintln!("Usage: terraform-plan-visualizer -i <plan.json> [-o <index.html>]");
                eprintln!("Run with --help for all options.");
            }
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system. Logs go to stderr so stdout stays clean.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Renders the plan given on the command line.
fn run(cli: &Cli) -> Result<()> {
    let input = cli
        .input
        .as_deref()
        .ok_or(VisualizerError::Input(InputError::Missing))?;

    let config = load_config(cli.config.as_deref())?;

    info!("Reading plan: {}", input.display());
    let document = PlanDocument::load_file(input)?;

    let report = ReportBuilder::new(&config).build(&document);
    info!(
        "Classified {} changes ({} drift records outstanding)",
        report.summary.total, report.drift_count
    );

    let formatter = OutputFormatter::new(cli.format)
        .with_html_renderer(HtmlRenderer::new().with_collapsed(config.collapse_resources));
    let rendered = formatter.render(&report)?;
    debug!("Rendered {} bytes", rendered.len());

    match (formatter.format(), cli.explicit_output()) {
        (OutputFormat::Html, _) => {
            let output = cli.resolve_output(&config.default_output);
            write_output(&output, &rendered)?;
            eprintln!("Report written to {}", output.display());
        }
        (_, Some(output)) => write_output(output, &rendered)?,
        (_, None) => print!("{rendered}"),
    }

    Ok(())
}

/// Loads and validates the report configuration.
fn load_config(explicit: Option<&Path>) -> Result<ReportConfig> {
    let config = ConfigParser::new().load(explicit)?;

    let result = ConfigValidator::new().validate(&config)?;
    for warning in &result.warnings {
        warn!("{warning}");
    }

    Ok(config)
}
