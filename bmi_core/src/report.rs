//! Plain-data progress report for the latest measurement.

use crate::{Category, Measurement, ProgressEvaluator, ProgressMessage};
use chrono::{NaiveDate, NaiveTime};
use std::fmt;

/// Latest measurement together with its progress verdict
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressReport {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub recommendation: Category,
    pub message: ProgressMessage,
}

impl ProgressReport {
    /// Build a report for the last element of a chronological sequence
    pub fn latest(measurements: &[Measurement], evaluator: &ProgressEvaluator) -> Option<Self> {
        let (current, rest) = measurements.split_last()?;
        let message = evaluator.evaluate(current, rest.last());
        Some(Self::new(current, message))
    }

    pub fn new(measurement: &Measurement, message: ProgressMessage) -> Self {
        Self {
            date: measurement.date(),
            time: measurement.time(),
            height: measurement.height(),
            weight: measurement.weight(),
            bmi: measurement.bmi(),
            recommendation: measurement.recommendation().clone(),
            message,
        }
    }
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Date: {}", self.date.format("%Y-%m-%d"))?;
        writeln!(f, "Time: {}", self.time.format("%H:%M:%S"))?;
        writeln!(f, "Height: {} cm", self.height)?;
        writeln!(f, "Weight: {} kg", self.weight)?;
        writeln!(f, "BMI: {:.2}", self.bmi)?;
        writeln!(f, "Recommendation: {}", self.recommendation)?;
        write!(f, "Progress: {}", self.message)
    }
}
