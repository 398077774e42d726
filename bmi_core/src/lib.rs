#![forbid(unsafe_code)]

//! Core domain model and business logic for the BMI tracker.
//!
//! This crate provides:
//! - The measurement record and its recommendation category
//! - BMI classification rules
//! - Progress evaluation between consecutive measurements
//! - A file-backed measurement store
//! - Reports and CSV export for the stored history

pub mod types;
pub mod error;
pub mod classify;
pub mod progress;
pub mod store;
pub mod report;
pub mod export;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use classify::{classify, compute_bmi, validate_input};
pub use progress::{evaluate, evaluate_latest, ProgressEvaluator, ProgressMessage};
pub use store::{MeasurementStore, PersistenceMode};
pub use report::ProgressReport;
pub use export::export_csv;
pub use config::Config;
