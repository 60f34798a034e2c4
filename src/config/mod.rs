//! Configuration module for the plan visualizer.
//!
//! This module handles report settings:
//! - Parsing `.tfpv.yaml` and applying `TFPV_*` environment overrides
//! - Validation of configuration values

mod parser;
mod spec;
mod validator;

pub use parser::{
    ConfigParser, DEFAULT_CONFIG_FILES, ENV_DEFAULT_OUTPUT, ENV_MAX_VALUE_CHARS, ENV_TITLE,
    ENV_UNKNOWN_PLACEHOLDER, apply_env_overrides, find_config_file,
};
pub use spec::ReportConfig;
pub use validator::{ConfigValidator, ValidationError, ValidationResult};
