//! Layered configuration
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. a TOML file: an explicit path, `STAVE_CONFIG_PATH`, or `./stave.toml`
//! 3. environment variables, `STAVE__ENGINE__MAX_STEPS=5000` style
//! 4. programmatic overrides from [`ConfigBuilder`]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::engine::script::DEFAULT_MAX_STEPS;
use crate::engine::EngineConfig;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "STAVE_CONFIG_PATH";
/// Config file looked up in the working directory when none is named
pub const DEFAULT_CONFIG_FILE: &str = "stave.toml";
const ENV_PREFIX: &str = "STAVE";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Interpreter step budget per render; 0 disables the limit
    pub max_steps: u64,
    /// Run semantic validation when compiling
    pub validate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            validate: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Load from the default file locations and the environment
    pub fn load() -> Result<Self> {
        Self::builder().build()
    }

    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_steps: match self.engine.max_steps {
                0 => None,
                n => Some(n),
            },
            validate: self.engine.validate,
        }
    }

    /// The effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration as TOML")
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    max_steps: Option<u64>,
    validate: Option<bool>,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Read this file instead of searching; the file must exist
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn validate(mut self, validate: Option<bool>) -> Self {
        self.validate = validate;
        self
    }

    /// Ignore `STAVE__*` variables and `STAVE_CONFIG_PATH`
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    pub fn build(self) -> Result<Config> {
        let mut builder = config::Config::builder();

        let explicit = self.config_path.clone().or_else(|| {
            if self.skip_env {
                None
            } else {
                env::var_os(CONFIG_PATH_ENV).map(PathBuf::from)
            }
        });
        builder = match &explicit {
            Some(path) => builder.add_source(config::File::from(path.as_path()).required(true)),
            None => builder.add_source(
                config::File::new(DEFAULT_CONFIG_FILE, config::FileFormat::Toml).required(false),
            ),
        };

        if !self.skip_env {
            builder = builder.add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            );
        }

        builder = builder
            .set_override_option("engine.max_steps", self.max_steps)
            .context("Invalid max_steps override")?
            .set_override_option("engine.validate", self.validate)
            .context("Invalid validate override")?;

        let settings = builder.build().with_context(|| match &explicit {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Failed to load configuration".to_string(),
        })?;

        settings
            .try_deserialize()
            .context("Configuration has invalid values")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("stave-{}-{}.toml", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.engine.max_steps, DEFAULT_MAX_STEPS);
        assert!(config.engine.validate);
        assert_eq!(config.to_engine_config(), EngineConfig::default());
    }

    #[test]
    fn test_file_values_and_overrides() {
        let path = write_temp(
            "file",
            "[engine]\nmax_steps = 500\nvalidate = false\n\n[logging]\nfilter = \"debug\"\n",
        );

        let config = Config::builder()
            .config_path(Some(path.clone()))
            .skip_env()
            .build()
            .unwrap();
        assert_eq!(config.engine.max_steps, 500);
        assert!(!config.engine.validate);
        assert_eq!(config.logging.filter, "debug");

        let config = Config::builder()
            .config_path(Some(path.clone()))
            .max_steps(Some(42))
            .skip_env()
            .build()
            .unwrap();
        assert_eq!(config.engine.max_steps, 42);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = write_temp("partial", "[logging]\nfilter = \"info\"\n");
        let config = Config::builder()
            .config_path(Some(path.clone()))
            .skip_env()
            .build()
            .unwrap();
        assert_eq!(config.engine, EngineSettings::default());
        assert_eq!(config.logging.filter, "info");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Config::builder()
            .config_path(Some(PathBuf::from("/nonexistent/stave.toml")))
            .skip_env()
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/stave.toml"));
    }

    #[test]
    fn test_zero_disables_step_limit() {
        let mut config = Config::default();
        config.engine.max_steps = 0;
        assert_eq!(config.to_engine_config().max_steps, None);
    }

    #[test]
    fn test_toml_rendering() {
        let rendered = Config::default().to_toml().unwrap();
        assert!(rendered.contains("[engine]"));
        assert!(rendered.contains("max_steps = 1000000"));
        assert!(rendered.contains("filter = \"warn\""));
    }
}
