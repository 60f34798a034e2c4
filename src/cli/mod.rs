//! CLI module for the plan visualizer.
//!
//! This module provides the command-line arguments and the output
//! formatting for the `terraform-plan-visualizer` binary.

mod commands;
mod output;

pub use commands::{BuildInfo, Cli, OutputFormat};
pub use output::{OutputFormatter, write_output};
