use certkid_crypto::ArmorPolicy;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "certkid.yaml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "CERTKID_";

/// Tool configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. certkid.yaml file (if exists)
/// 3. Environment variables with CERTKID_ prefix
/// 4. Command-line flags (applied by the caller)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub armor: ArmorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive (e.g. "warn", "certkid_crypto=debug").
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArmorConfig {
    /// How inconsistent certificate markers are handled (default: strict).
    #[serde(default)]
    pub policy: ArmorPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Output layout on stdout (default: text).
    #[serde(default)]
    pub format: OutputFormat,
}

/// Layout of the results printed on stdout.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `kid:` and `publicKey:` sections.
    #[default]
    Text,
    /// A single JSON object.
    Json,
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from the default file and the environment.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// A missing file is not an error; its layer is simply empty.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.level cannot be empty. Set CERTKID_LOGGING__LEVEL or configure in certkid.yaml.".into(),
            ));
        }

        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not a valid filter: {e}",
                self.logging.level
            )));
        }

        Ok(())
    }
}
