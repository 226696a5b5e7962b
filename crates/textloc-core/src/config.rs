//! Configuration types for textloc.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Accepted values for `logging.level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Locator configuration loaded from YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LocatorConfig {
    /// Matching settings
    pub matching: MatchingSettings,
    /// Result aggregation settings
    pub aggregation: AggregationSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

impl LocatorConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        let config: LocatorConfig = serde_yaml::from_str(yaml)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> crate::Result<()> {
        let level = self.logging.level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(crate::Error::Config(format!(
                "logging.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.logging.level
            )));
        }

        Ok(())
    }
}

/// Settings that influence how single candidates are matched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchingSettings {
    /// Accept elements that are not displayed (label targets, table cells)
    pub include_invisible: bool,
    /// Number of compiled patterns kept in the pattern cache (0 = no caching)
    pub pattern_cache_capacity: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            include_invisible: false,
            pattern_cache_capacity: 256,
        }
    }
}

/// How results of different strategies are ordered against each other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Ranking {
    /// Found type weight first, then coverage, distance and start
    #[default]
    Tiered,
    /// Coverage, distance and start only
    Tuple,
}

/// Result aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AggregationSettings {
    /// Ranking mode
    pub ranking: Ranking,
    /// Keep only the best entry per element
    pub deduplicate: bool,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            ranking: Ranking::Tiered,
            deduplicate: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LocatorConfig::default();
        assert!(!config.matching.include_invisible);
        assert_eq!(config.matching.pattern_cache_capacity, 256);
        assert_eq!(config.aggregation.ranking, Ranking::Tiered);
        assert!(config.aggregation.deduplicate);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_validation() {
        let config = LocatorConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = LocatorConfig::default();
        config.logging.level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let mut config = LocatorConfig::default();
        config.logging.level = "DEBUG".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
matching:
  include_invisible: true
  pattern_cache_capacity: 16
aggregation:
  ranking: tuple
  deduplicate: false
logging:
  level: debug
"#;

        let config = LocatorConfig::from_yaml(yaml).unwrap();
        assert!(config.matching.include_invisible);
        assert_eq!(config.matching.pattern_cache_capacity, 16);
        assert_eq!(config.aggregation.ranking, Ranking::Tuple);
        assert!(!config.aggregation.deduplicate);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
matching:
  include_invisible: true
"#;

        let config = LocatorConfig::from_yaml(yaml).unwrap();
        assert!(config.matching.include_invisible);
        assert_eq!(config.matching.pattern_cache_capacity, 256);
        assert_eq!(config.aggregation, AggregationSettings::default());
    }

    #[test]
    fn test_unknown_ranking_rejected() {
        let yaml = r#"
aggregation:
  ranking: random
"#;

        let result = LocatorConfig::from_yaml(yaml);
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_yaml_with_invalid_level_rejected() {
        let yaml = r#"
logging:
  level: loud
"#;

        assert!(matches!(
            LocatorConfig::from_yaml(yaml),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_from_missing_file() {
        let result = LocatorConfig::from_file("/nonexistent/textloc.yaml");
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
