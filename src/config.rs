//! Dashboard configuration
//! Defaults, optional JSON file, environment and command-line overrides.

use crate::charts::{ColorTheme, UnknownTheme};
use crate::stats::DEFAULT_MIGRATION_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const CONFIG_ENV: &str = "POPDASH_CONFIG";
pub const DATA_ENV: &str = "POPDASH_DATA";
pub const THEME_ENV: &str = "POPDASH_THEME";
pub const DEFAULT_CONFIG_FILE: &str = "popdash.json";
pub const DEFAULT_DATA_PATH: &str = "data/us-population-2010-2019-reshaped.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Theme(#[from] UnknownTheme),
    #[error("Migration threshold must be positive, got {0}")]
    InvalidThreshold(i64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub theme: ColorTheme,
    pub migration_threshold: i64,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            theme: ColorTheme::default(),
            migration_threshold: DEFAULT_MIGRATION_THRESHOLD,
            window_width: 1500.0,
            window_height: 900.0,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(content: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content, path)
    }

    /// Apply environment variables (via `lookup`) and the data-path argument.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
        data_arg: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = lookup(DATA_ENV).filter(|s| !s.trim().is_empty()) {
            self.data_path = PathBuf::from(path);
        }
        if let Some(theme) = lookup(THEME_ENV).filter(|s| !s.trim().is_empty()) {
            self.theme = theme.parse()?;
        }
        if let Some(path) = data_arg {
            self.data_path = PathBuf::from(path);
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.migration_threshold <= 0 {
            return Err(ConfigError::InvalidThreshold(self.migration_threshold));
        }
        Ok(())
    }

    /// Resolve the configuration for this process.
    ///
    /// Precedence, lowest first: defaults, config file (`$POPDASH_CONFIG` or
    /// `./popdash.json` when present), environment, first CLI argument.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
        let base = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.is_file() {
                    Self::from_file(local)?
                } else {
                    Self::default()
                }
            }
        };

        let config = base.with_overrides(|key| std::env::var(key).ok(), std::env::args().nth(1))?;
        debug!(?config, "resolved configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.theme, ColorTheme::Blues);
        assert_eq!(config.migration_threshold, 50_000);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DashboardConfig::from_json(
            r#"{ "theme": "plasma", "migration_threshold": 25000 }"#,
            Path::new("popdash.json"),
        )
        .unwrap();

        assert_eq!(config.theme, ColorTheme::Plasma);
        assert_eq!(config.migration_threshold, 25_000);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = DashboardConfig::from_json(r#"{ "colour": "red" }"#, Path::new("x.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_and_arg_precedence() {
        let config = DashboardConfig::default()
            .with_overrides(
                env(&[(DATA_ENV, "env.csv"), (THEME_ENV, "Magma")]),
                Some("arg.csv".to_string()),
            )
            .unwrap();

        assert_eq!(config.data_path, PathBuf::from("arg.csv"));
        assert_eq!(config.theme, ColorTheme::Magma);

        let config = DashboardConfig::default()
            .with_overrides(env(&[(DATA_ENV, "env.csv")]), None)
            .unwrap();
        assert_eq!(config.data_path, PathBuf::from("env.csv"));
    }

    #[test]
    fn test_bad_theme_env() {
        let err = DashboardConfig::default()
            .with_overrides(env(&[(THEME_ENV, "sepia")]), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Theme(_)));
    }

    #[test]
    fn test_non_positive_threshold() {
        let config = DashboardConfig {
            migration_threshold: 0,
            ..DashboardConfig::default()
        };
        let err = config.with_overrides(env(&[]), None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold(0)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("popdash.json");
        std::fs::write(&path, r#"{ "data_path": "states.csv" }"#).unwrap();

        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("states.csv"));

        let missing = DashboardConfig::from_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }
}
