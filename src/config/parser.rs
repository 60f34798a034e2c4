//! Configuration parser for loading report settings.
//!
//! Settings come from, in increasing precedence: built-in defaults, a YAML
//! file, and `TFPV_*` environment variables (optionally loaded from `.env`).

use crate::error::{ConfigError, Result, VisualizerError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::spec::ReportConfig;

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[".tfpv.yaml", ".tfpv.yml", "tfpv.yaml"];

/// Environment variable overriding the report title.
pub const ENV_TITLE: &str = "TFPV_TITLE";
/// Environment variable overriding the string truncation length.
pub const ENV_MAX_VALUE_CHARS: &str = "TFPV_MAX_VALUE_CHARS";
/// Environment variable overriding the unknown-field placeholder.
pub const ENV_UNKNOWN_PLACEHOLDER: &str = "TFPV_UNKNOWN_PLACEHOLDER";
/// Environment variable overriding the default output path.
pub const ENV_DEFAULT_OUTPUT: &str = "TFPV_DEFAULT_OUTPUT";

/// Configuration parser for loading report settings.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving `.env` and searching for config files.
    base_path: Option<PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving relative paths.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    fn base_dir(&self) -> &Path {
        self.base_path.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Resolves and loads the configuration.
    ///
    /// An explicit path must exist. Without one, the nearest default config
    /// file is used, or the defaults when there is none. Environment overrides
    /// are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, or an override
    /// has an invalid value.
    pub fn load(&self, explicit: Option<&Path>) -> Result<ReportConfig> {
        self.load_dotenv()?;

        let mut config = match explicit {
            Some(path) => self.load_file(path)?,
            None => match find_config_file(self.base_dir()) {
                Some(path) => self.load_file(path)?,
                None => {
                    debug!("No configuration file found, using defaults");
                    ReportConfig::default()
                }
            },
        };

        apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ReportConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(VisualizerError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            VisualizerError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses configuration from a YAML string. Empty input yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<ReportConfig> {
        debug!("Parsing YAML configuration");

        if content.trim().is_empty() {
            return Ok(ReportConfig::default());
        }

        serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            VisualizerError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self.base_dir().join(".env");

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                VisualizerError::Config(ConfigError::ParseError {
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

/// Applies `TFPV_*` overrides read through `lookup`.
///
/// # Errors
///
/// Returns an error if `TFPV_MAX_VALUE_CHARS` is not a non-negative integer.
pub fn apply_env_overrides(
    config: &mut ReportConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(title) = lookup(ENV_TITLE) {
        debug!("Overriding title from environment");
        config.title = title;
    }

    if let Some(raw) = lookup(ENV_MAX_VALUE_CHARS) {
        debug!("Overriding max_value_chars from environment");
        config.max_value_chars = raw.trim().parse().map_err(|_| {
            VisualizerError::Config(ConfigError::InvalidEnvValue {
                name: String::from(ENV_MAX_VALUE_CHARS),
                value: raw.clone(),
            })
        })?;
    }

    if let Some(placeholder) = lookup(ENV_UNKNOWN_PLACEHOLDER) {
        debug!("Overriding unknown_placeholder from environment");
        config.unknown_placeholder = placeholder;
    }

    if let Some(output) = lookup(ENV_DEFAULT_OUTPUT) {
        debug!("Overriding default_output from environment");
        config.default_output = PathBuf::from(output);
    }

    Ok(())
}

/// Finds a configuration file in the given directory or its parents.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let start = start_dir.as_ref();
    let mut current = std::path::absolute(start).unwrap_or_else(|_| start.to_path_buf());

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.is_file() {
                info!("Found configuration file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
