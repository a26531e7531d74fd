//! Candidate records, categorical lookups and the raw table type.

use crate::error::{Error, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const AGE: &str = "Age";
pub const GENDER: &str = "Gender";
pub const EDUCATION_LEVEL: &str = "EducationLevel";
pub const EXPERIENCE_YEARS: &str = "ExperienceYears";
pub const PREVIOUS_COMPANIES: &str = "PreviousCompanies";
pub const DISTANCE_FROM_COMPANY: &str = "DistanceFromCompany";
pub const INTERVIEW_SCORE: &str = "InterviewScore";
pub const SKILL_SCORE: &str = "SkillScore";
pub const PERSONALITY_SCORE: &str = "PersonalityScore";
pub const RECRUITMENT_STRATEGY: &str = "RecruitmentStrategy";

/// Columns every input table must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    AGE,
    GENDER,
    EDUCATION_LEVEL,
    EXPERIENCE_YEARS,
    PREVIOUS_COMPANIES,
    DISTANCE_FROM_COMPANY,
    INTERVIEW_SCORE,
    SKILL_SCORE,
    PERSONALITY_SCORE,
    RECRUITMENT_STRATEGY,
];

/// Candidate gender as offered by the input form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn code(self) -> i64 {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
        }
    }
}

/// Highest completed education tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EducationLevel {
    /// Bachelor's (type 1)
    #[value(name = "bachelor-type1")]
    #[serde(rename = "bachelor-type1")]
    BachelorType1,
    /// Bachelor's (type 2)
    #[value(name = "bachelor-type2")]
    #[serde(rename = "bachelor-type2")]
    BachelorType2,
    Masters,
    Phd,
}

impl EducationLevel {
    pub fn code(self) -> i64 {
        match self {
            EducationLevel::BachelorType1 => 1,
            EducationLevel::BachelorType2 => 2,
            EducationLevel::Masters => 3,
            EducationLevel::Phd => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RecruitmentStrategy {
    Aggressive,
    Moderate,
    Conservative,
}

impl RecruitmentStrategy {
    pub fn code(self) -> i64 {
        match self {
            RecruitmentStrategy::Aggressive => 1,
            RecruitmentStrategy::Moderate => 2,
            RecruitmentStrategy::Conservative => 3,
        }
    }
}

/// One candidate as entered through the single-candidate form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub age: u32,
    pub gender: Gender,
    pub education: EducationLevel,
    pub experience_years: u32,
    pub previous_companies: u32,
    pub distance_from_company: f64,
    pub interview_score: u32,
    pub skill_score: u32,
    pub personality_score: u32,
    pub recruitment_strategy: RecruitmentStrategy,
}

impl CandidateRecord {
    /// Check every numeric field against its declared domain.
    pub fn validate(&self) -> Result<()> {
        let checks: [(&'static str, f64, f64, f64); 7] = [
            (AGE, self.age as f64, 18.0, 60.0),
            (EXPERIENCE_YEARS, self.experience_years as f64, 0.0, 40.0),
            (PREVIOUS_COMPANIES, self.previous_companies as f64, 0.0, 10.0),
            (DISTANCE_FROM_COMPANY, self.distance_from_company, 0.0, 100.0),
            (INTERVIEW_SCORE, self.interview_score as f64, 0.0, 100.0),
            (SKILL_SCORE, self.skill_score as f64, 0.0, 100.0),
            (PERSONALITY_SCORE, self.personality_score as f64, 0.0, 100.0),
        ];

        for (field, value, min, max) in checks {
            // NaN fails both comparisons, so test containment instead
            if !(min..=max).contains(&value) {
                return Err(Error::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Encoded cell values in `REQUIRED_COLUMNS` order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.age.to_string(),
            self.gender.code().to_string(),
            self.education.code().to_string(),
            self.experience_years.to_string(),
            self.previous_companies.to_string(),
            self.distance_from_company.to_string(),
            self.interview_score.to_string(),
            self.skill_score.to_string(),
            self.personality_score.to_string(),
            self.recruitment_strategy.code().to_string(),
        ]
    }

    /// Look up a field by its column name, already encoded as a number.
    pub fn value(&self, column: &str) -> Option<f64> {
        let value = match column {
            AGE => self.age as f64,
            GENDER => self.gender.code() as f64,
            EDUCATION_LEVEL => self.education.code() as f64,
            EXPERIENCE_YEARS => self.experience_years as f64,
            PREVIOUS_COMPANIES => self.previous_companies as f64,
            DISTANCE_FROM_COMPANY => self.distance_from_company,
            INTERVIEW_SCORE => self.interview_score as f64,
            SKILL_SCORE => self.skill_score as f64,
            PERSONALITY_SCORE => self.personality_score as f64,
            RECRUITMENT_STRATEGY => self.recruitment_strategy.code() as f64,
            _ => return None,
        };
        Some(value)
    }
}

/// Binary hiring decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HiringLabel {
    Hire,
    DoNotHire,
}

impl HiringLabel {
    /// Class `1` means hire; every other class maps to do-not-hire.
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            HiringLabel::Hire
        } else {
            HiringLabel::DoNotHire
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HiringLabel::Hire => "Hire",
            HiringLabel::DoNotHire => "Do not hire",
        }
    }
}

impl fmt::Display for HiringLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A header row plus string cells, kept verbatim from the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        RawTable { headers, rows }
    }

    /// Build a table with the required columns from form records.
    pub fn from_records(records: &[CandidateRecord]) -> Self {
        RawTable {
            headers: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: records.iter().map(CandidateRecord::to_row).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Names from `required` that this table does not have.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|c| self.column_index(c).is_none())
            .map(|c| c.to_string())
            .collect()
    }

    /// Raw cells of one column.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }

    /// Parse one column as finite floats. `NaN` and infinities are rejected.
    /// Row numbers in errors are 1-based data rows.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let cells = self.column(name).ok_or_else(|| Error::MissingColumns {
            required: vec![name.to_string()],
            missing: vec![name.to_string()],
        })?;

        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| match cell.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(Error::InvalidCell {
                    row: i + 1,
                    column: name.to_string(),
                    value: cell.to_string(),
                }),
            })
            .collect()
    }

    /// Copy of this table without the named column. Unknown names are a no-op.
    pub fn without_column(&self, name: &str) -> RawTable {
        let Some(idx) = self.column_index(name) else {
            return self.clone();
        };

        let strip = |row: &Vec<String>| -> Vec<String> {
            row.iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, v)| v.clone())
                .collect()
        };

        RawTable {
            headers: strip(&self.headers),
            rows: self.rows.iter().map(strip).collect(),
        }
    }
}
