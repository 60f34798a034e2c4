//! Error types for the plan visualizer.
//!
//! This module provides the error hierarchy for every stage of a run:
//! configuration loading, reading the plan document, and writing the report.
//! Recoverable conditions (missing lists, unserializable values) never reach
//! this module; they degrade the output instead.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the plan visualizer.
#[derive(Debug, Error)]
pub enum VisualizerError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors reading or interpreting the plan document.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Errors producing or writing the report.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },

    /// An environment override could not be applied.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvValue {
        /// Name of the variable.
        name: String,
        /// The rejected value.
        value: String,
    },
}

/// Errors reading or interpreting the plan document.
#[derive(Debug, Error)]
pub enum InputError {
    /// No input path was given.
    #[error("input file is required")]
    Missing,

    /// The input file does not exist.
    #[error("input file '{path}' does not exist")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The input file exists but cannot be read.
    #[error("cannot read input file '{path}': {message}")]
    Unreadable {
        /// Path to the unreadable file.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },

    /// The input is not valid JSON.
    #[error("parsing plan JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The document parsed but its top level is not an object.
    #[error("Invalid plan data format: expected an object at the top level, found {found}")]
    InvalidShape {
        /// Kind of value found at the top level.
        found: String,
    },
}

/// Errors producing or writing the report.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The report could not be serialized.
    #[error("Failed to serialize report: {message}")]
    Serialization {
        /// Description of the serialization error.
        message: String,
    },

    /// The report could not be written.
    #[error("failed to write report file {path}: {message}")]
    WriteFailed {
        /// Destination path.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },
}

/// Result type alias for visualizer operations.
pub type Result<T> = std::result::Result<T, VisualizerError>;

impl VisualizerError {
    /// Returns true if the error was caused by the command-line input itself
    /// rather than by the document or the environment.
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::Input(InputError::Missing | InputError::FileNotFound { .. })
        )
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

impl InputError {
    /// Creates a parse error with the given message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }
}

impl RenderError {
    /// Creates a write error for the given destination.
    #[must_use]
    pub fn write_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::WriteFailed {
            path: path.into(),
            message: message.into(),
        }
    }
}
