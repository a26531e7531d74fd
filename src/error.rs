//! Error type shared by the whole crate.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An input table lacks one or more required columns. Nothing was predicted.
    #[error("the CSV must contain the following columns: {}", required.join(", "))]
    MissingColumns {
        required: Vec<String>,
        missing: Vec<String>,
    },

    #[error("row {row}, column '{column}': cannot read '{value}' as a number")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("{field} = {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("reference dataset has no rows; cannot fit the feature transformer")]
    EmptyReference,

    #[error("invalid model artifact: {0}")]
    InvalidModel(String),

    #[error("model expects {expected} features but the transformer produces {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("model artifacts not found. Expected:\n{}", format_paths(paths))]
    ArtifactsMissing { paths: Vec<String> },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

fn format_paths(paths: &[String]) -> String {
    paths
        .iter()
        .map(|p| format!("  - {}", p))
        .collect::<Vec<_>>()
        .join("\n")
}
