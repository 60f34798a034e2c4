//! Configuration validation for report settings.

use crate::error::{ConfigError, Result, VisualizerError};
use tracing::debug;

use super::spec::ReportConfig;

/// Validator for report configurations.
#[derive(Debug, Default)]
pub struct ConfigValidator;

/// Validation result containing all errors found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl ConfigValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a report configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error, if any.
    pub fn validate(&self, config: &ReportConfig) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();

        if config.max_value_chars == 0 {
            result.errors.push(ValidationError {
                field: String::from("max_value_chars"),
                message: String::from("max_value_chars must be at least 1"),
            });
        }

        if config.unknown_placeholder.trim().is_empty() {
            result.errors.push(ValidationError {
                field: String::from("unknown_placeholder"),
                message: String::from("unknown_placeholder cannot be empty"),
            });
        }

        if config.default_output.as_os_str().is_empty() {
            result.errors.push(ValidationError {
                field: String::from("default_output"),
                message: String::from("default_output cannot be empty"),
            });
        }

        if config.title.trim().is_empty() {
            result
                .warnings
                .push(String::from("title is empty; the report will have no heading"));
        }

        match result.errors.first() {
            None => {
                debug!("Configuration validation passed");
                Ok(result)
            }
            Some(first_error) => Err(VisualizerError::Config(ConfigError::validation(
                first_error.message.clone(),
                first_error.field.clone(),
            ))),
        }
    }
}

impl ValidationResult {
    /// Returns true if validation passed (no errors).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let result = ConfigValidator::new()
            .validate(&ReportConfig::default())
            .expect("defaults are valid");
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_zero_length_rejected() {
        let config = ReportConfig {
            max_value_chars: 0,
            ..ReportConfig::default()
        };

        let err = ConfigValidator::new().validate(&config).expect_err("zero is invalid");
        assert!(matches!(
            err,
            VisualizerError::Config(ConfigError::ValidationError { field: Some(ref f), .. })
                if f == "max_value_chars"
        ));
    }

    #[test]
    fn test_empty_placeholder_rejected() {
        let config = ReportConfig {
            unknown_placeholder: String::from("  "),
            ..ReportConfig::default()
        };

        assert!(ConfigValidator::new().validate(&config).is_err());
    }

    #[test]
    fn test_empty_title_warns() {
        let config = ReportConfig {
            title: String::new(),
            ..ReportConfig::default()
        };

        let result = ConfigValidator::new().validate(&config).expect("only a warning");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_validation_error_display() {
        let error = ValidationError {
            field: String::from("title"),
            message: String::from("bad"),
        };
        assert_eq!(error.to_string(), "title: bad");
    }
}
