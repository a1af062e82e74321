use crate::store::DEFAULT_TASK_FILE;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

pub const ENV_PREFIX: &str = "TASK_CLI";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_file")]
    pub file: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: default_file(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads configuration from `TASK_CLI_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_builder(
            config::Config::builder().add_source(config::Environment::with_prefix(ENV_PREFIX)),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        let settings = builder.build()?;
        let config: Config = settings.try_deserialize()?;
        config.level_filter()?;
        Ok(config)
    }

    pub fn level_filter(&self) -> anyhow::Result<LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid log level '{}'", self.log_level))
    }
}

fn default_file() -> PathBuf {
    PathBuf::from(DEFAULT_TASK_FILE)
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_is_set() {
        // Act
        let config = Config::from_builder(config::Config::builder()).unwrap();

        // Assert
        assert_eq!(config, Config::default());
        assert_eq!(config.file, PathBuf::from("task.json"));
        assert_eq!(config.level_filter().unwrap(), LevelFilter::WARN);
    }

    #[test]
    fn test_overrides_are_respected() {
        // Arrange
        let builder = config::Config::builder()
            .set_override("file", "/tmp/other.json")
            .unwrap()
            .set_override("log_level", "debug")
            .unwrap();

        // Act
        let config = Config::from_builder(builder).unwrap();

        // Assert
        assert_eq!(config.file, PathBuf::from("/tmp/other.json"));
        assert_eq!(config.level_filter().unwrap(), LevelFilter::DEBUG);
    }

    #[test]
    fn test_off_disables_logging() {
        let config = Config {
            log_level: "off".to_string(),
            ..Config::default()
        };

        assert_eq!(config.level_filter().unwrap(), LevelFilter::OFF);
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let builder = config::Config::builder()
            .set_override("log_level", "loud")
            .unwrap();

        let result = Config::from_builder(builder);

        assert!(result.is_err());
    }
}
