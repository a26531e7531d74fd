//! Configuration structures for the hiring predictor.
//!
//! Settings come from a TOML file with two tables, `[artifacts]` for where
//! the model and reference dataset live and `[batch]` for batch output.
//! Every field has a default, so a partial file (or none at all) works.

use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure loaded from `config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub artifacts: ArtifactsConfig,
    pub batch: BatchConfig,
}

/// Artifact locations.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory holding both artifact files
    pub model_dir: String,
    /// Random forest JSON, relative to `model_dir`
    pub model_file: String,
    /// Reference dataset CSV, relative to `model_dir`
    pub reference_file: String,
    /// Target column dropped from the reference before fitting
    pub target_column: String,
}

/// Batch prediction output settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    /// Name of the appended label column
    pub label_column: String,
    /// Default output path for the annotated CSV
    pub output_file: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        ArtifactsConfig {
            model_dir: "models".to_string(),
            model_file: "random_forest.json".to_string(),
            reference_file: "reference.csv".to_string(),
            target_column: "HiringDecision".to_string(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            label_column: "Prediction".to_string(),
            output_file: "predictions.csv".to_string(),
        }
    }
}

impl ArtifactsConfig {
    pub fn reference_path(&self) -> PathBuf {
        Path::new(&self.model_dir).join(&self.reference_file)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            debug!(path = %path.display(), "loading config");
            Self::load(path)
        } else {
            debug!(path = %path.display(), "config not found, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [artifacts]
            model_dir = "/srv/hiring"

            [batch]
            label_column = "Decision"
            "#,
        )
        .unwrap();

        assert_eq!(config.artifacts.model_dir, "/srv/hiring");
        assert_eq!(config.artifacts.model_file, "random_forest.json");
        assert_eq!(config.batch.label_column, "Decision");
        assert_eq!(config.batch.output_file, "predictions.csv");
        assert_eq!(
            config.artifacts.reference_path(),
            PathBuf::from("/srv/hiring/reference.csv")
        );
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert_eq!(Config::load_or_default(&missing).unwrap(), Config::default());

        let present = dir.path().join("config.toml");
        std::fs::write(&present, "[artifacts]\ntarget_column = \"Hired\"\n").unwrap();
        let config = Config::load_or_default(&present).unwrap();
        assert_eq!(config.artifacts.target_column, "Hired");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[artifacts\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
