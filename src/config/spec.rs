//! Report configuration types.
//!
//! This module defines the struct that maps to the `.tfpv.yaml` file. Every
//! field has a default, so an empty file and no file at all are both valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::planner::{DEFAULT_MAX_VALUE_CHARS, DEFAULT_UNKNOWN_PLACEHOLDER};

/// Settings that shape the generated report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Page title and heading.
    pub title: String,
    /// Longest scalar string shown before truncation, in characters.
    pub max_value_chars: usize,
    /// Text shown for fields that are only known after apply.
    pub unknown_placeholder: String,
    /// Output path used when none is given on the command line.
    pub default_output: PathBuf,
    /// Whether resource items start collapsed in the HTML page.
    pub collapse_resources: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: String::from("Terraform Plan"),
            max_value_chars: DEFAULT_MAX_VALUE_CHARS,
            unknown_placeholder: String::from(DEFAULT_UNKNOWN_PLACEHOLDER),
            default_output: PathBuf::from("index.html"),
            collapse_resources: true,
        }
    }
}
