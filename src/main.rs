use clap::Parser;
use hiring_predictor::logging::init_tracing_subscriber;
use hiring_predictor::pipeline::cli::{run, Cli};
use hiring_predictor::Error;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    init_tracing_subscriber("hiring-predictor");
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        // already reported with the required column list
        Err(Error::MissingColumns { .. }) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
