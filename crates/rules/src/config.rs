//! Agent configuration file (`agent.toml`).
//!
//! ```toml
//! [agent]
//! default_value = 0
//! sleep_time = 30
//! metric_files = ["metrics/office.toml"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::loader::{LoadError, Result};

/// Top-level layout of the agent configuration file.
#[derive(Debug, Deserialize)]
struct AgentFile {
    agent: AgentConfig,
}

/// Settings from the `[agent]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Value published for a metric with no matching rule and no own default.
    pub default_value: i64,
    /// Seconds between two evaluation ticks.
    pub sleep_time: u64,
    /// Metric files, loaded in this order.
    pub metric_files: Vec<PathBuf>,
}

impl AgentConfig {
    /// Parse the `[agent]` section from TOML text. Paths are left as written.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let file: AgentFile = toml::from_str(content)?;
        Ok(file.agent)
    }

    /// Load and validate a config file.
    ///
    /// Relative `metric_files` entries are resolved against the directory
    /// holding the config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.resolve_relative_to(base);
        Ok(config)
    }

    /// Reject values the runner cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.sleep_time == 0 {
            return Err(LoadError::Validation(
                "agent.sleep_time must be at least 1 second".to_string(),
            ));
        }
        if self.metric_files.is_empty() {
            return Err(LoadError::Validation(
                "agent.metric_files must list at least one file".to_string(),
            ));
        }
        Ok(())
    }

    /// Interval between evaluation ticks.
    pub fn sleep_interval(&self) -> Duration {
        Duration::from_secs(self.sleep_time)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for file in &mut self.metric_files {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
[agent]
default_value = 2
sleep_time = 30
metric_files = ["metrics/a.toml", "/etc/datimus/b.toml"]
"#;

    #[test]
    fn parses_agent_section() {
        let config = AgentConfig::from_toml(VALID).unwrap();
        assert_eq!(config.default_value, 2);
        assert_eq!(config.sleep_time, 30);
        assert_eq!(config.sleep_interval(), Duration::from_secs(30));
        assert_eq!(
            config.metric_files,
            vec![
                PathBuf::from("metrics/a.toml"),
                PathBuf::from("/etc/datimus/b.toml")
            ]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_agent_section_is_an_error() {
        assert!(AgentConfig::from_toml("default_value = 2").is_err());
        assert!(AgentConfig::from_toml("[smthelse]\ndefault_value = 2").is_err());
    }

    #[test]
    fn missing_fields_are_errors() {
        assert!(AgentConfig::from_toml("[agent]\ndefault_value = 2").is_err());
        assert!(AgentConfig::from_toml("[agent]\ndefault_value = 2\nsleep_time = 5").is_err());
    }

    #[test]
    fn unknown_fields_are_errors() {
        let content = "[agent]\ndefault_value = 0\nsleep_time = 5\nmetric_files = [\"a.toml\"]\nsleeptime = 3";
        assert!(AgentConfig::from_toml(content).is_err());
    }

    #[test]
    fn zero_sleep_time_is_rejected() {
        let config = AgentConfig {
            default_value: 0,
            sleep_time: 0,
            metric_files: vec![PathBuf::from("a.toml")],
        };
        assert!(matches!(config.validate(), Err(LoadError::Validation(_))));
    }

    #[test]
    fn empty_metric_files_is_rejected() {
        let config = AgentConfig {
            default_value: 0,
            sleep_time: 10,
            metric_files: vec![],
        };
        assert!(matches!(config.validate(), Err(LoadError::Validation(_))));
    }

    #[test]
    fn relative_paths_resolve_against_base() {
        let mut config = AgentConfig::from_toml(VALID).unwrap();
        config.resolve_relative_to(Path::new("/srv/datimus"));
        assert_eq!(
            config.metric_files,
            vec![
                PathBuf::from("/srv/datimus/metrics/a.toml"),
                PathBuf::from("/etc/datimus/b.toml")
            ]
        );
    }
}
