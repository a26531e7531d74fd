//! Artifact location and presence checks.
//!
//! Two files back every predictor: the trained random forest (JSON) and the
//! reference dataset (CSV) the feature transformer is fitted on.
//!
//! # Examples
//!
//! ## Check if artifacts exist
//!
//! ```no_run
//! use hiring_predictor::model_loader::ModelFiles;
//!
//! let files = ModelFiles::in_dir(None);
//! if files.exists() {
//!     println!("Artifacts are ready!");
//! }
//! ```
//!
//! ## Custom artifact directory
//!
//! ```no_run
//! use hiring_predictor::model_loader::ModelLoaderConfig;
//!
//! let config = ModelLoaderConfig::new()
//!     .with_model_dir("/srv/hiring")
//!     .with_label_column("Decision");
//!
//! let files = config.get_model_files();
//! ```

use crate::error::{Error, Result};
use crate::pipeline::config::Config;
use std::path::PathBuf;

const DEFAULT_MODEL_DIR: &str = "models";
const DEFAULT_MODEL_FILE: &str = "random_forest.json";
const DEFAULT_REFERENCE_FILE: &str = "reference.csv";

/// Paths of the artifacts a predictor loads at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFiles {
    pub model: PathBuf,
    pub reference: PathBuf,
}

impl ModelFiles {
    /// Default file names inside `model_dir` (or `models/`).
    pub fn in_dir(model_dir: Option<&str>) -> Self {
        let base = PathBuf::from(model_dir.unwrap_or(DEFAULT_MODEL_DIR));
        Self {
            model: base.join(DEFAULT_MODEL_FILE),
            reference: base.join(DEFAULT_REFERENCE_FILE),
        }
    }

    /// Check if all required files exist
    pub fn exists(&self) -> bool {
        self.model.exists() && self.reference.exists()
    }

    fn missing(&self) -> Vec<String> {
        [&self.model, &self.reference]
            .into_iter()
            .filter(|p| !p.exists())
            .map(|p| p.display().to_string())
            .collect()
    }
}

/// Fail with the list of absent files unless every artifact is present.
pub fn ensure_model_files(files: &ModelFiles) -> Result<()> {
    let missing = files.missing();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::ArtifactsMissing { paths: missing })
    }
}

/// Configuration for building a predictor.
#[derive(Debug, Clone)]
pub struct ModelLoaderConfig {
    pub model_dir: Option<String>,
    pub model_file: String,
    pub reference_file: String,
    pub target_column: String,
    pub label_column: String,
}

impl Default for ModelLoaderConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ModelLoaderConfig {
    fn from(config: &Config) -> Self {
        Self {
            model_dir: Some(config.artifacts.model_dir.clone()),
            model_file: config.artifacts.model_file.clone(),
            reference_file: config.artifacts.reference_file.clone(),
            target_column: config.artifacts.target_column.clone(),
            label_column: config.batch.label_column.clone(),
        }
    }
}

impl ModelLoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model_dir(mut self, dir: impl Into<String>) -> Self {
        self.model_dir = Some(dir.into());
        self
    }

    pub fn with_model_file(mut self, file: impl Into<String>) -> Self {
        self.model_file = file.into();
        self
    }

    pub fn with_reference_file(mut self, file: impl Into<String>) -> Self {
        self.reference_file = file.into();
        self
    }

    pub fn with_target_column(mut self, column: impl Into<String>) -> Self {
        self.target_column = column.into();
        self
    }

    pub fn with_label_column(mut self, column: impl Into<String>) -> Self {
        self.label_column = column.into();
        self
    }

    pub fn get_model_files(&self) -> ModelFiles {
        let base = PathBuf::from(self.model_dir.as_deref().unwrap_or(DEFAULT_MODEL_DIR));
        ModelFiles {
            model: base.join(&self.model_file),
            reference: base.join(&self.reference_file),
        }
    }
}
