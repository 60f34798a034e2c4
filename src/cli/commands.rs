//! CLI argument definitions.
//!
//! This module defines the command-line arguments using clap, along with the
//! build metadata printed by `-v/--version`.

use clap::Parser;
use std::path::{Path, PathBuf};

/// Terraform plan visualizer - renders a plan JSON document as a report.
#[derive(Parser, Debug)]
#[command(name = "terraform-plan-visualizer")]
#[command(author, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Path to the Terraform plan JSON (`terraform show -json plan.out`).
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file path.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output file path for the HTML report (`-o` takes precedence).
    #[arg(long, value_name = "FILE")]
    pub output_html_path: Option<PathBuf>,

    /// Print version information and exit.
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub verbose: bool,

    /// Path to the report configuration file.
    #[arg(short, long, value_name = "FILE", env = "TFPV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Self-contained HTML page.
    #[default]
    Html,
    /// Terminal summary table.
    Text,
    /// Report as JSON.
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The output path given on the command line, if any. `-o` wins.
    #[must_use]
    pub fn explicit_output(&self) -> Option<&Path> {
        self.output
            .as_deref()
            .or(self.output_html_path.as_deref())
    }

    /// The output path to use, falling back to `default`.
    #[must_use]
    pub fn resolve_output(&self, default: &Path) -> PathBuf {
        self.explicit_output()
            .unwrap_or(default)
            .to_path_buf()
    }
}

/// Build metadata embedded at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    /// Package version.
    pub version: &'static str,
    /// Build timestamp, from `TFPV_BUILD_TIME`.
    pub build_time: &'static str,
    /// Git commit, from `TFPV_GIT_COMMIT`.
    pub git_commit: &'static str,
    /// Target operating system.
    pub os: &'static str,
    /// Target architecture.
    pub arch: &'static str,
}

impl BuildInfo {
    /// Build metadata of this binary.
    pub const CURRENT: Self = Self {
        version: env!("CARGO_PKG_VERSION"),
        build_time: or_unknown(option_env!("TFPV_BUILD_TIME")),
        git_commit: or_unknown(option_env!("TFPV_GIT_COMMIT")),
        os: std::env::consts::OS,
        arch: std::env::consts::ARCH,
    };
}

const fn or_unknown(value: Option<&'static str>) -> &'static str {
    match value {
        Some(v) => v,
        None => "unknown",
    }
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "terraform-plan-visualizer {}", self.version)?;
        writeln!(f, "  built:    {}", self.build_time)?;
        writeln!(f, "  commit:   {}", self.git_commit)?;
        write!(f, "  platform: {}/{}", self.os, self.arch)
    }
}
