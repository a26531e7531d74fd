//! High-level API for hiring decision prediction
//!
//! This module wraps artifact loading, the fitted feature transformer and
//! the random forest behind one [`Predictor`].
//!
//! # Quick Start
//!
//! ```no_run
//! use hiring_predictor::api::Predictor;
//! use hiring_predictor::pipeline::data::{
//!     CandidateRecord, EducationLevel, Gender, RecruitmentStrategy,
//! };
//!
//! let predictor = Predictor::new()?;
//! let candidate = CandidateRecord {
//!     age: 30,
//!     gender: Gender::Male,
//!     education: EducationLevel::BachelorType1,
//!     experience_years: 5,
//!     previous_companies: 2,
//!     distance_from_company: 10.0,
//!     interview_score: 70,
//!     skill_score: 75,
//!     personality_score: 80,
//!     recruitment_strategy: RecruitmentStrategy::Moderate,
//! };
//! let result = predictor.predict(&candidate)?;
//! println!("{}", result.label); // "Hire" or "Do not hire"
//! # Ok::<(), hiring_predictor::Error>(())
//! ```
//!
//! # Batch Predictions
//!
//! ```no_run
//! # use hiring_predictor::api::Predictor;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let predictor = Predictor::new()?;
//! let output = predictor.predict_csv(std::fs::File::open("candidates.csv")?)?;
//!
//! for (label, count) in output.counts().iter() {
//!     println!("{}: {}", label, count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Artifact Directory
//!
//! ```no_run
//! use hiring_predictor::api::{Predictor, PredictorConfig};
//!
//! let config = PredictorConfig::new().with_model_dir("/srv/hiring");
//! let predictor = Predictor::with_config(config)?;
//! # Ok::<(), hiring_predictor::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::model_loader::ensure_model_files;
use crate::pipeline::batch::{self, BatchOutput};
use crate::pipeline::data::{CandidateRecord, HiringLabel, RawTable};
use crate::pipeline::forest::RandomForest;
use crate::pipeline::transform::ColumnTransformer;
use ndarray::Array2;
use std::io::Read;
use tracing::{debug, info};

pub use crate::model_loader::ModelLoaderConfig as PredictorConfig;

/// Main predictor interface.
///
/// Built once at startup and read-only afterwards; share it by reference.
#[derive(Debug, Clone)]
pub struct Predictor {
    model: RandomForest,
    transformer: ColumnTransformer,
    label_column: String,
}

/// Prediction for one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub label: HiringLabel,

    /// Raw class returned by the classifier
    pub class: i64,

    /// Averaged forest probability of `class` (0.0 to 1.0)
    pub confidence: f64,
}

impl PredictionResult {
    fn from_class(class: i64, confidence: f64) -> Self {
        PredictionResult {
            label: HiringLabel::from_class(class),
            class,
            confidence,
        }
    }
}

impl Predictor {
    /// Create a predictor from the default artifact locations (`models/`).
    pub fn new() -> Result<Self> {
        Self::with_config(PredictorConfig::default())
    }

    /// Load the model, fit the transformer on the reference dataset and
    /// check that the two agree on the feature width.
    pub fn with_config(config: PredictorConfig) -> Result<Self> {
        let files = config.get_model_files();
        ensure_model_files(&files)?;

        let model = RandomForest::load(&files.model)?;
        info!(
            path = %files.model.display(),
            trees = model.n_trees(),
            n_features = model.n_features,
            "loaded random forest"
        );

        let reference =
            batch::read_table_path(&files.reference)?.without_column(&config.target_column);
        let transformer = ColumnTransformer::fit(&reference)?;
        info!(
            path = %files.reference.display(),
            rows = reference.len(),
            "fitted feature transformer on reference dataset"
        );

        Self::from_parts(model, transformer, config.label_column)
    }

    /// Assemble a predictor from already-built parts.
    pub fn from_parts(
        model: RandomForest,
        transformer: ColumnTransformer,
        label_column: impl Into<String>,
    ) -> Result<Self> {
        transformer.validate()?;
        let actual = transformer.n_output_features();
        if actual != model.n_features {
            return Err(Error::FeatureMismatch {
                expected: model.n_features,
                actual,
            });
        }

        Ok(Self {
            model,
            transformer,
            label_column: label_column.into(),
        })
    }

    /// Predict the hiring decision for one candidate.
    pub fn predict(&self, record: &CandidateRecord) -> Result<PredictionResult> {
        record.validate()?;
        let features = self.transformer.transform_record(record)?;
        let (class, confidence) = self.model.predict_row(features.view());
        debug!(class, confidence, "single prediction");
        Ok(PredictionResult::from_class(class, confidence))
    }

    /// Predict several form records at once.
    pub fn predict_batch(&self, records: &[CandidateRecord]) -> Result<Vec<PredictionResult>> {
        for record in records {
            record.validate()?;
        }
        let table = RawTable::from_records(records);
        let features = self.transformer.transform(&table)?;
        self.classify(&features)
    }

    /// Validate columns, predict every row and append the label column.
    ///
    /// A table missing any required column is rejected before any prediction.
    pub fn predict_table(&self, table: &RawTable) -> Result<BatchOutput> {
        batch::validate_columns(table)?;

        let features = self.transformer.transform(table)?;
        let results = self.classify(&features)?;

        let labels: Vec<HiringLabel> = results.iter().map(|r| r.label).collect();
        let confidences = results.iter().map(|r| r.confidence).collect();
        let output = BatchOutput {
            table: batch::append_labels(table, &self.label_column, &labels),
            label_column: self.label_column.clone(),
            labels,
            confidences,
        };

        let counts = output.counts();
        info!(
            rows = output.len(),
            hire = counts.get(HiringLabel::Hire),
            do_not_hire = counts.get(HiringLabel::DoNotHire),
            "batch prediction complete"
        );
        Ok(output)
    }

    /// Read a CSV table and run [`Predictor::predict_table`] on it.
    pub fn predict_csv<R: Read>(&self, reader: R) -> Result<BatchOutput> {
        let table = batch::read_table(reader)?;
        self.predict_table(&table)
    }

    fn classify(&self, features: &Array2<f64>) -> Result<Vec<PredictionResult>> {
        Ok(self
            .model
            .predict_with_confidence(features)?
            .into_iter()
            .map(|(class, confidence)| PredictionResult::from_class(class, confidence))
            .collect())
    }

    pub fn transformer(&self) -> &ColumnTransformer {
        &self.transformer
    }

    pub fn model(&self) -> &RandomForest {
        &self.model
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    /// Get information about the loaded model
    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            n_trees: self.model.n_trees(),
            n_features: self.model.n_features,
            classes: self.model.classes.clone(),
            feature_names: self.transformer.feature_names(),
        }
    }
}

/// Information about the loaded model
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub n_trees: usize,
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub feature_names: Vec<String>,
}

impl std::fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Prediction: {}", self.label)?;
        writeln!(f, "Confidence: {:.2}%", self.confidence * 100.0)?;
        Ok(())
    }
}

impl std::fmt::Display for ModelInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Trees:    {}", self.n_trees)?;
        writeln!(f, "Classes:  {:?}", self.classes)?;
        writeln!(f, "Features: {}", self.n_features)?;
        for (idx, name) in self.feature_names.iter().enumerate() {
            writeln!(f, "  [{:>2}] {}", idx, name)?;
        }
        Ok(())
    }
}
