use crate::error::Result;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SupervisorConfig {
    pub logging: LoggingConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default log level when no CLI flag or RUST_LOG is given
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: pretty, compact or json
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DemoConfig {
    /// Register the demo component
    #[serde(default = "default_demo_enabled")]
    pub enabled: bool,

    /// Time each step sleeps, in milliseconds
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,

    /// Successful steps before the demo component reports a failure
    #[serde(default = "default_steps_per_cycle")]
    pub steps_per_cycle: u32,
}

impl SupervisorConfig {
    /// Load configuration from a specific file path.
    ///
    /// The file is optional; values fall back to the built-in defaults and can be
    /// overridden with `STAGEVISOR_<SECTION>__<KEY>` environment variables. Runs before
    /// logging is set up, so it logs nothing itself.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();

        let settings = Config::builder()
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .set_default("demo.enabled", default_demo_enabled())?
            .set_default("demo.step_interval_ms", default_step_interval_ms() as i64)?
            .set_default("demo.steps_per_cycle", default_steps_per_cycle() as i64)?
            .add_source(File::with_name(&path_str).required(false))
            .add_source(
                Environment::with_prefix("STAGEVISOR")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Message(format!(
                "Unknown log level '{}', expected one of {:?}",
                self.logging.level, LOG_LEVELS
            )));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::Message(format!(
                "Unknown log format '{}', expected one of {:?}",
                self.logging.format, LOG_FORMATS
            )));
        }

        if self.demo.step_interval_ms == 0 {
            return Err(ConfigError::Message(
                "Demo step_interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.demo.steps_per_cycle == 0 {
            return Err(ConfigError::Message(
                "Demo steps_per_cycle must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            demo: DemoConfig {
                enabled: default_demo_enabled(),
                step_interval_ms: default_step_interval_ms(),
                steps_per_cycle: default_steps_per_cycle(),
            },
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_demo_enabled() -> bool {
    true
}
fn default_step_interval_ms() -> u64 {
    1000
}
fn default_steps_per_cycle() -> u32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SupervisorConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.demo.step_interval_ms, 1000);
        assert_eq!(config.demo.steps_per_cycle, 5);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = SupervisorConfig::load_from_file(&path).unwrap();
        assert_eq!(config, SupervisorConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[logging]
format = "json"

[demo]
step_interval_ms = 250
"#
        )
        .unwrap();

        let config = SupervisorConfig::load_from_file(file.path()).unwrap();

        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.demo.step_interval_ms, 250);
        assert_eq!(config.demo.steps_per_cycle, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SupervisorConfig::default();

        config.demo.steps_per_cycle = 0;
        assert!(config.validate().is_err());
        config.demo.steps_per_cycle = 3;
        assert!(config.validate().is_ok());

        config.demo.step_interval_ms = 0;
        assert!(config.validate().is_err());
        config.demo.step_interval_ms = 10;

        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
        config.logging.level = "debug".to_string();

        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
        config.logging.format = "compact".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_serializes_to_toml() {
        let rendered = SupervisorConfig::default().to_toml().unwrap();

        assert!(rendered.contains("[logging]"));
        assert!(rendered.contains("[demo]"));
        assert!(rendered.contains("steps_per_cycle = 5"));

        let parsed: SupervisorConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, SupervisorConfig::default());
    }
}
