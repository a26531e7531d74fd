//! Hiring decision pipeline
//!
//! The logic-bearing part of the crate. A candidate table flows through:
//!
//! 1. [`batch`] reads the CSV and checks the required column set
//! 2. [`transform`] turns the ten candidate columns into the model's feature matrix
//! 3. [`forest`] runs the pre-trained random forest over each row
//! 4. [`data::HiringLabel`] maps the class to `Hire` / `Do not hire`
//!
//! Single candidates take the same path through a one-row table.
//!
//! ## Module Structure
//!
//! - [`config`] - Configuration structures and loading
//! - [`data`] - Candidate records, categorical codes and the raw table
//! - [`transform`] - One-hot / standard-scaling column transformer
//! - [`forest`] - Random forest inference
//! - [`batch`] - CSV I/O, column validation and label counts
//! - [`cli`] - Command-line interface

pub mod batch;
pub mod cli;
pub mod config;
pub mod data;
pub mod forest;
pub mod transform;

pub use cli::run;
