//! Column-wise feature transformer.
//!
//! Applies a different encoding to each group of candidate columns and
//! concatenates the results into one numeric matrix, in this order:
//!
//! - **One-hot** for `Gender` and `RecruitmentStrategy`. The first fitted
//!   category is dropped, and unknown values encode as all zeros.
//! - **Standard scaling** for the seven numeric columns, using the reference
//!   mean and population standard deviation.
//! - **Passthrough** for `EducationLevel`.
//!
//! Parameters are fitted once against the reference dataset and never refit
//! per request.

use super::data::{
    CandidateRecord, RawTable, AGE, DISTANCE_FROM_COMPANY, EDUCATION_LEVEL, EXPERIENCE_YEARS,
    GENDER, INTERVIEW_SCORE, PERSONALITY_SCORE, PREVIOUS_COMPANIES, RECRUITMENT_STRATEGY,
    REQUIRED_COLUMNS, SKILL_SCORE,
};
use crate::error::{Error, Result};
use ndarray::{s, Array1, Array2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

pub const CATEGORICAL_COLUMNS: [&str; 2] = [GENDER, RECRUITMENT_STRATEGY];

pub const NUMERIC_COLUMNS: [&str; 7] = [
    AGE,
    EXPERIENCE_YEARS,
    PREVIOUS_COMPANIES,
    DISTANCE_FROM_COMPANY,
    INTERVIEW_SCORE,
    SKILL_SCORE,
    PERSONALITY_SCORE,
];

pub const PASSTHROUGH_COLUMNS: [&str; 1] = [EDUCATION_LEVEL];

/// Read a cell as an integer category. Anything else is treated as unknown.
fn as_category(cell: &str) -> Option<i64> {
    let value: f64 = cell.trim().parse().ok()?;
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

/// Drop-first one-hot encoder for a single integer-coded column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    pub column: String,
    /// Every category seen at fit time, sorted. The first one is the dropped
    /// reference category.
    pub categories: Vec<i64>,
}

impl OneHotEncoder {
    pub fn fit(table: &RawTable, column: &str) -> Result<Self> {
        let cells = table.column(column).ok_or_else(|| missing(&[column]))?;

        let mut categories = Vec::with_capacity(4);
        for (i, cell) in cells.iter().enumerate() {
            let category = as_category(cell).ok_or_else(|| Error::InvalidCell {
                row: i + 1,
                column: column.to_string(),
                value: cell.to_string(),
            })?;
            categories.push(category);
        }
        categories.sort_unstable();
        categories.dedup();

        Ok(OneHotEncoder {
            column: column.to_string(),
            categories,
        })
    }

    /// Number of indicator columns produced.
    pub fn n_outputs(&self) -> usize {
        self.categories.len().saturating_sub(1)
    }

    /// Indicator slot for a category, or `None` for the dropped or unknown ones.
    fn slot(&self, category: i64) -> Option<usize> {
        match self.categories.binary_search(&category) {
            Ok(0) | Err(_) => None,
            Ok(idx) => Some(idx - 1),
        }
    }

    fn is_known(&self, category: i64) -> bool {
        self.categories.binary_search(&category).is_ok()
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.categories
            .iter()
            .skip(1)
            .map(|c| format!("cat__{}_{}", self.column, c))
            .collect()
    }
}

/// Per-column standardization with parameters from the reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub columns: Vec<String>,
    pub means: Vec<f64>,
    pub scales: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(table: &RawTable, columns: &[&str]) -> Result<Self> {
        let mut means = Vec::with_capacity(columns.len());
        let mut scales = Vec::with_capacity(columns.len());

        for column in columns {
            let values = table.numeric_column(column)?;
            let n = values.len() as f64;

            let mean = values.iter().sum::<f64>() / n;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let mut std = var.sqrt();
            if std < 10.0 * f64::EPSILON {
                std = 1.0; // constant column
            }

            means.push(mean);
            scales.push(std);
        }

        Ok(StandardScaler {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            means,
            scales,
        })
    }

    pub fn scale(&self, idx: usize, value: f64) -> f64 {
        (value - self.means[idx]) / self.scales[idx]
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| format!("num__{}", c)).collect()
    }
}

/// Fitted column transformer for candidate tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTransformer {
    pub encoders: Vec<OneHotEncoder>,
    pub scaler: StandardScaler,
    pub passthrough: Vec<String>,
}

fn missing(columns: &[&str]) -> Error {
    Error::MissingColumns {
        required: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        missing: columns.iter().map(|c| c.to_string()).collect(),
    }
}

impl ColumnTransformer {
    /// Fit all encoders against a reference table.
    ///
    /// Columns other than the required ten (such as the target) are ignored.
    pub fn fit(reference: &RawTable) -> Result<Self> {
        let absent = reference.missing_columns(&REQUIRED_COLUMNS);
        if !absent.is_empty() {
            let names: Vec<&str> = absent.iter().map(String::as_str).collect();
            return Err(missing(&names));
        }
        if reference.is_empty() {
            return Err(Error::EmptyReference);
        }

        let encoders = CATEGORICAL_COLUMNS
            .iter()
            .map(|column| OneHotEncoder::fit(reference, column))
            .collect::<Result<Vec<_>>>()?;
        let scaler = StandardScaler::fit(reference, &NUMERIC_COLUMNS)?;

        // Passthrough columns must still be numeric.
        for column in PASSTHROUGH_COLUMNS {
            reference.numeric_column(column)?;
        }

        let transformer = ColumnTransformer {
            encoders,
            scaler,
            passthrough: PASSTHROUGH_COLUMNS.iter().map(|c| c.to_string()).collect(),
        };
        debug!(
            rows = reference.len(),
            n_features = transformer.n_output_features(),
            "fitted column transformer"
        );
        Ok(transformer)
    }

    pub fn n_output_features(&self) -> usize {
        self.encoders.iter().map(OneHotEncoder::n_outputs).sum::<usize>()
            + self.scaler.columns.len()
            + self.passthrough.len()
    }

    /// Output column names, in matrix order.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .encoders
            .iter()
            .flat_map(OneHotEncoder::feature_names)
            .collect();
        names.extend(self.scaler.feature_names());
        names.extend(self.passthrough.iter().map(|c| format!("educ__{}", c)));
        names
    }

    /// Transform every row of a table into the model's feature matrix.
    pub fn transform(&self, table: &RawTable) -> Result<Array2<f64>> {
        let mut absent: Vec<&str> = Vec::new();
        for encoder in &self.encoders {
            if table.column_index(&encoder.column).is_none() {
                absent.push(&encoder.column);
            }
        }
        for column in self.scaler.columns.iter().chain(self.passthrough.iter()) {
            if table.column_index(column).is_none() {
                absent.push(column);
            }
        }
        if !absent.is_empty() {
            return Err(missing(&absent));
        }

        let mut out = Array2::<f64>::zeros((table.len(), self.n_output_features()));
        let mut offset = 0;

        for encoder in &self.encoders {
            let cells = table.column(&encoder.column).unwrap_or_default();
            let mut unknown = 0usize;
            for (row, cell) in cells.iter().enumerate() {
                match as_category(cell) {
                    Some(category) => {
                        if let Some(slot) = encoder.slot(category) {
                            out[[row, offset + slot]] = 1.0;
                        } else if !encoder.is_known(category) {
                            unknown += 1;
                        }
                    }
                    None => unknown += 1,
                }
            }
            if unknown > 0 {
                warn!(
                    column = %encoder.column,
                    count = unknown,
                    "unknown categorical values encoded as all-zero indicators"
                );
            }
            offset += encoder.n_outputs();
        }

        for (idx, column) in self.scaler.columns.iter().enumerate() {
            let values = table.numeric_column(column)?;
            for (row, value) in values.into_iter().enumerate() {
                out[[row, offset + idx]] = self.scaler.scale(idx, value);
            }
        }
        offset += self.scaler.columns.len();

        for (idx, column) in self.passthrough.iter().enumerate() {
            let values = table.numeric_column(column)?;
            out.slice_mut(s![.., offset + idx]).assign(&Array1::from(values));
        }

        Ok(out)
    }

    /// Transform a single form record.
    pub fn transform_record(&self, record: &CandidateRecord) -> Result<Array1<f64>> {
        let table = RawTable::from_records(std::slice::from_ref(record));
        let matrix = self.transform(&table)?;
        Ok(matrix.row(0).to_owned())
    }

    /// Save the fitted parameters as pretty JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate saved parameters.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let transformer: ColumnTransformer = serde_json::from_str(&json)?;
        transformer.validate()?;
        Ok(transformer)
    }

    /// Check that the parameters are internally consistent.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Error::InvalidModel(format!("transformer: {}", msg));

        for encoder in &self.encoders {
            if encoder.categories.is_empty() {
                return Err(invalid(format!("{} has no categories", encoder.column)));
            }
            // slot() relies on binary search
            if encoder.categories.windows(2).any(|w| w[0] >= w[1]) {
                return Err(invalid(format!("{} categories not sorted", encoder.column)));
            }
        }

        let scaler = &self.scaler;
        let n = scaler.columns.len();
        if scaler.means.len() != n || scaler.scales.len() != n {
            return Err(invalid(format!(
                "{} scaled columns but {} means and {} scales",
                n,
                scaler.means.len(),
                scaler.scales.len()
            )));
        }
        for (idx, column) in scaler.columns.iter().enumerate() {
            let (mean, scale) = (scaler.means[idx], scaler.scales[idx]);
            if !mean.is_finite() || !scale.is_finite() || scale == 0.0 {
                return Err(invalid(format!("{} has mean {} scale {}", column, mean, scale)));
            }
        }
        Ok(())
    }
}
