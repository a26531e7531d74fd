//! # Hiring Predictor
//!
//! Predicts a hiring decision (`Hire` / `Do not hire`) from ten candidate
//! attributes, using a pre-trained random forest and a column transformer
//! fitted on a reference dataset.
//!
//! ## Features
//!
//! - **Single-candidate prediction** from typed form fields
//! - **Batch prediction** over a CSV file, with an annotated CSV as output
//! - **Column transformer**: drop-first one-hot encoding, standard scaling, passthrough
//! - **Random forest inference** from a JSON export of scikit-learn's tree arrays
//! - **Strict column validation** for uploaded tables
//!
//! ## Quick Start
//!
//! ```no_run
//! use hiring_predictor::api::Predictor;
//! use hiring_predictor::{CandidateRecord, EducationLevel, Gender, RecruitmentStrategy};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Loads models/random_forest.json and fits on models/reference.csv
//!     let predictor = Predictor::new()?;
//!
//!     let result = predictor.predict(&CandidateRecord {
//!         age: 30,
//!         gender: Gender::Male,
//!         education: EducationLevel::BachelorType1,
//!         experience_years: 5,
//!         previous_companies: 2,
//!         distance_from_company: 10.0,
//!         interview_score: 70,
//!         skill_score: 75,
//!         personality_score: 80,
//!         recruitment_strategy: RecruitmentStrategy::Moderate,
//!     })?;
//!
//!     println!("Decision: {}", result.label);
//!     println!("Confidence: {:.1}%", result.confidence * 100.0);
//!     Ok(())
//! }
//! ```
//!
//! ## Artifacts
//!
//! | File | Purpose |
//! |------|---------|
//! | `models/random_forest.json` | Trained classifier (`classes`, `n_features`, `trees`) |
//! | `models/reference.csv` | Training table; the transformer is fitted on it at startup |
//!
//! Both paths come from `config.toml` (see [`pipeline::config`]).
//!
//! ## Command Line
//!
//! ```bash
//! hiring-predictor predict --age 30 --gender male --education bachelor-type1 \
//!     --experience 5 --previous-companies 2 --distance 10 \
//!     --interview-score 70 --skill-score 75 --personality-score 80 --strategy moderate
//!
//! hiring-predictor batch candidates.csv --output predictions.csv
//! hiring-predictor info
//! ```
//!
//! ## Logging
//!
//! Uses `tracing`. Set `RUST_LOG=debug` for per-step detail, and
//! `HIRING_LOG_DIR` to write daily-rotated log files.

// Public API modules
pub mod api;
pub mod model_loader;

// Core modules
pub mod error;
pub mod logging;
pub mod pipeline;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
pub use pipeline::data::{
    CandidateRecord, EducationLevel, Gender, HiringLabel, RawTable, RecruitmentStrategy,
    REQUIRED_COLUMNS,
};
pub use pipeline::forest::RandomForest;
pub use pipeline::transform::ColumnTransformer;

/// Load a candidate CSV file.
///
/// # Example
/// ```no_run
/// use hiring_predictor::load_data;
///
/// let table = load_data("candidates.csv")?;
/// println!("Loaded {} rows", table.len());
/// # Ok::<(), hiring_predictor::Error>(())
/// ```
pub fn load_data<P: AsRef<std::path::Path>>(path: P) -> Result<RawTable> {
    pipeline::batch::read_table_path(path)
}
