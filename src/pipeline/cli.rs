//! Command-line interface for the hiring predictor.

use super::batch;
use super::config::Config;
use super::data::{CandidateRecord, EducationLevel, Gender, HiringLabel, RecruitmentStrategy};
use super::transform::ColumnTransformer;
use crate::api::{Predictor, PredictorConfig};
use crate::error::{Error, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

const RULE: &str = "===================================================================";

#[derive(Debug, Parser)]
#[command(
    name = "hiring-predictor",
    version,
    about = "Predict hiring decisions for one candidate or a CSV of candidates"
)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, env = "HIRING_CONFIG", default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the artifact directory from the configuration
    #[arg(long, global = true, env = "HIRING_MODEL_DIR")]
    pub model_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict the decision for a single candidate
    Predict(CandidateArgs),
    /// Predict every row of a CSV file and write an annotated copy
    Batch {
        /// CSV file with the candidate columns
        input: PathBuf,
        /// Where to write the annotated CSV (defaults to the configured output file)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Show model and transformer details
    Info,
    /// Fit the feature transformer on the reference dataset and save it as JSON
    FitTransformer {
        #[arg(long, short, default_value = "transformer.json")]
        output: PathBuf,
    },
}

/// Form fields for one candidate. Integer ranges are enforced at parse time.
#[derive(Debug, Args)]
pub struct CandidateArgs {
    #[arg(long, value_parser = clap::value_parser!(u32).range(18..=60))]
    pub age: u32,
    #[arg(long, value_enum)]
    pub gender: Gender,
    #[arg(long, value_enum)]
    pub education: EducationLevel,
    /// Years of experience
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=40))]
    pub experience: u32,
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub previous_companies: u32,
    /// Distance from the company in km (0.0 to 100.0)
    #[arg(long)]
    pub distance: f64,
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub interview_score: u32,
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub skill_score: u32,
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub personality_score: u32,
    #[arg(long, value_enum)]
    pub strategy: RecruitmentStrategy,
}

impl From<&CandidateArgs> for CandidateRecord {
    fn from(args: &CandidateArgs) -> Self {
        CandidateRecord {
            age: args.age,
            gender: args.gender,
            education: args.education,
            experience_years: args.experience,
            previous_companies: args.previous_companies,
            distance_from_company: args.distance,
            interview_score: args.interview_score,
            skill_score: args.skill_score,
            personality_score: args.personality_score,
            recruitment_strategy: args.strategy,
        }
    }
}

impl Cli {
    /// Resolve the configuration, applying command-line overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_or_default(&self.config)?;
        if let Some(dir) = &self.model_dir {
            config.artifacts.model_dir = dir.clone();
        }
        Ok(config)
    }
}

/// Dispatch a parsed command line.
pub fn run(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;

    match &cli.command {
        Command::Predict(args) => predict_single(&config, &CandidateRecord::from(args)),
        Command::Batch { input, output } => {
            let output = output
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.batch.output_file));
            predict_file(&config, input, &output)
        }
        Command::Info => show_info(&config),
        Command::FitTransformer { output } => fit_transformer(&config, output),
    }
}

fn load_predictor(config: &Config) -> Result<Predictor> {
    Predictor::with_config(PredictorConfig::from(config))
}

/// Predict one candidate and print the decision.
pub fn predict_single(config: &Config, record: &CandidateRecord) -> Result<()> {
    let predictor = load_predictor(config)?;

    let start = Instant::now();
    let result = predictor.predict(record)?;

    println!("\n{}", RULE);
    println!("  Hiring Predictor: Single Candidate");
    println!("{}\n", RULE);
    match result.label {
        HiringLabel::Hire => println!("  ✅ Prediction: {}", result.label),
        HiringLabel::DoNotHire => println!("  ❌ Prediction: {}", result.label),
    }
    println!("  Confidence: {:.2}%", result.confidence * 100.0);
    println!("  Time: {:.3}s", start.elapsed().as_secs_f64());
    println!("{}\n", RULE);

    Ok(())
}

/// Predict every row of `input` and write the annotated table to `output`.
///
/// A file missing required columns is reported with the full required list
/// and nothing is written.
pub fn predict_file(config: &Config, input: &Path, output: &Path) -> Result<()> {
    let predictor = load_predictor(config)?;
    let table = batch::read_table_path(input)?;

    let result = match predictor.predict_table(&table) {
        Ok(result) => result,
        Err(Error::MissingColumns { required, missing }) => {
            eprintln!("❌ The CSV must contain the following columns:");
            for column in &required {
                eprintln!("  - {}", column);
            }
            eprintln!("Missing: {}", missing.join(", "));
            return Err(Error::MissingColumns { required, missing });
        }
        Err(e) => return Err(e),
    };

    println!("\n{}", RULE);
    println!("  Hiring Predictor: Batch ({} rows)", result.len());
    println!("{}\n", RULE);
    println!("✓ File is valid: {}\n", input.display());

    println!("Prediction counts:");
    let counts = result.counts();
    for (label, count) in counts.iter() {
        println!("  {:<12} {:>6}", label.as_str(), count);
    }
    println!("  {:<12} {:>6}\n", "Total", counts.total());

    batch::write_table_path(&result.table, output)?;
    info!(path = %output.display(), "wrote annotated CSV");
    println!("📥 Predictions saved to {}", output.display());
    println!("{}\n", RULE);

    Ok(())
}

pub fn show_info(config: &Config) -> Result<()> {
    let predictor = load_predictor(config)?;
    println!("\n{}", RULE);
    println!("  Hiring Predictor: Model Info");
    println!("{}\n", RULE);
    print!("{}", predictor.model_info());
    println!("Label column: {}", predictor.label_column());
    Ok(())
}

/// Fit the transformer alone and save its parameters.
pub fn fit_transformer(config: &Config, output: &Path) -> Result<()> {
    let path = config.artifacts.reference_path();
    let reference =
        batch::read_table_path(&path)?.without_column(&config.artifacts.target_column);
    let transformer = ColumnTransformer::fit(&reference)?;
    transformer.save(output)?;

    println!("✓ Transformer fitted on {} rows", reference.len());
    println!("  - {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_forest, REFERENCE_CSV};

    fn artifacts() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("reference.csv"), REFERENCE_CSV).unwrap();
        sample_forest()
            .save(dir.path().join("random_forest.json"))
            .unwrap();

        let mut config = Config::default();
        config.artifacts.model_dir = dir.path().to_str().unwrap().to_string();
        (dir, config)
    }

    #[test]
    fn test_parse_predict_command() {
        let cli = Cli::try_parse_from([
            "hiring-predictor",
            "predict",
            "--age",
            "30",
            "--gender",
            "male",
            "--education",
            "bachelor-type1",
            "--experience",
            "5",
            "--previous-companies",
            "2",
            "--distance",
            "10.0",
            "--interview-score",
            "70",
            "--skill-score",
            "75",
            "--personality-score",
            "80",
            "--strategy",
            "moderate",
        ])
        .unwrap();

        match &cli.command {
            Command::Predict(args) => {
                let record = CandidateRecord::from(args);
                assert_eq!(record, crate::test_support::sample_candidate());
            }
            other => panic!("expected predict, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range_age() {
        let result = Cli::try_parse_from([
            "hiring-predictor",
            "predict",
            "--age",
            "61",
            "--gender",
            "female",
            "--education",
            "phd",
            "--experience",
            "5",
            "--previous-companies",
            "2",
            "--distance",
            "10",
            "--interview-score",
            "70",
            "--skill-score",
            "75",
            "--personality-score",
            "80",
            "--strategy",
            "aggressive",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_model_dir_override() {
        let cli = Cli::try_parse_from([
            "hiring-predictor",
            "--config",
            "/nonexistent/config.toml",
            "--model-dir",
            "/srv/hiring",
            "info",
        ])
        .unwrap();
        let config = cli.load_config().unwrap();
        assert_eq!(config.artifacts.model_dir, "/srv/hiring");
    }

    #[test]
    fn test_predict_file_writes_output() {
        let (dir, config) = artifacts();
        let input = dir.path().join("reference.csv");
        let output = dir.path().join("predictions.csv");

        predict_file(&config, &input, &output).unwrap();

        let written = batch::read_table_path(&output).unwrap();
        assert_eq!(written.headers.last().unwrap(), "Prediction");
        assert_eq!(written.len(), 12);
    }

    #[test]
    fn test_predict_file_rejects_missing_columns() {
        let (dir, config) = artifacts();
        let input = dir.path().join("partial.csv");
        std::fs::write(&input, "Age,Gender\n30,0\n").unwrap();
        let output = dir.path().join("predictions.csv");

        assert!(matches!(
            predict_file(&config, &input, &output),
            Err(Error::MissingColumns { .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_fit_transformer_writes_json() {
        let (dir, config) = artifacts();
        let output = dir.path().join("transformer.json");
        fit_transformer(&config, &output).unwrap();

        let loaded = ColumnTransformer::load(&output).unwrap();
        assert_eq!(loaded.n_output_features(), 11);
    }
}
