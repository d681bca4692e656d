//! `examlens.toml` configuration loading.
//!
//! Flags on the command line override config values; config values
//! override built-in defaults.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use examlens_core::model::TopicMap;

/// Values read from `examlens.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Column holding student identifiers.
    pub identifier_column: String,
    /// Score threshold for the pass/fail status column.
    pub pass_threshold: f64,
    /// Optional path to a question -> topic TOML file.
    pub topics: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            identifier_column: "Name".into(),
            pass_threshold: 70.0,
            topics: None,
        }
    }
}

/// Load config from an explicit path, from `./examlens.toml` when present,
/// or fall back to defaults.
pub fn load_config_from(path: Option<&Path>) -> Result<CliConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = PathBuf::from("examlens.toml");
            if !default.exists() {
                return Ok(CliConfig::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))
}

#[derive(Debug, Deserialize)]
struct TopicsFile {
    #[serde(default)]
    topics: HashMap<String, String>,
}

/// Load a question -> topic mapping from a TOML file with a `[topics]`
/// table.
pub fn load_topic_map(path: &Path) -> Result<TopicMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read topics file: {}", path.display()))?;
    let parsed: TopicsFile = toml::from_str(&content)
        .with_context(|| format!("failed to parse topics file: {}", path.display()))?;
    Ok(TopicMap::new(parsed.topics))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_config() {
        let config = load_config_from(Some(Path::new("/nonexistent/examlens.toml")));
        assert!(config.is_err());

        let defaults = CliConfig::default();
        assert_eq!(defaults.identifier_column, "Name");
        assert_eq!(defaults.pass_threshold, 70.0);
    }

    #[test]
    fn parses_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examlens.toml");
        std::fs::write(
            &path,
            "identifier_column = \"Student\"\npass_threshold = 60.0\n",
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.identifier_column, "Student");
        assert_eq!(config.pass_threshold, 60.0);
        assert!(config.topics.is_none());
    }

    #[test]
    fn rejects_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examlens.toml");
        std::fs::write(&path, "identifer_column = \"typo\"\n").unwrap();
        assert!(load_config_from(Some(&path)).is_err());
    }

    #[test]
    fn parses_topic_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topics.toml");
        std::fs::write(&path, "[topics]\nQ1 = \"Fractions\"\nQ2 = \"Geometry\"\n").unwrap();

        let topics = load_topic_map(&path).unwrap();
        assert_eq!(topics.get("Q1"), Some("Fractions"));
        assert_eq!(topics.get("Q3"), None);
    }
}
