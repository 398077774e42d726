//! CSV export of the measurement history.

use crate::{Error, Measurement, Result};
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    date: String,
    time: String,
    height_cm: f64,
    weight_kg: f64,
    bmi: String,
    recommendation: String,
}

impl From<&Measurement> for CsvRow {
    fn from(m: &Measurement) -> Self {
        CsvRow {
            date: m.date().format("%Y-%m-%d").to_string(),
            time: m.time().format("%H:%M:%S").to_string(),
            height_cm: m.height(),
            weight_kg: m.weight(),
            bmi: format!("{:.2}", m.bmi()),
            recommendation: m.recommendation().to_string(),
        }
    }
}

/// Write measurements to a new CSV file and return the number of rows
///
/// An existing file at `path` is never overwritten.
pub fn export_csv(measurements: &[Measurement], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => {
                Error::InvalidArgument(format!("{} already exists", path.display()))
            }
            _ => Error::Io(e),
        })?;

    let mut writer = csv::Writer::from_writer(file);
    if measurements.is_empty() {
        writer.write_record([
            "date",
            "time",
            "height_cm",
            "weight_kg",
            "bmi",
            "recommendation",
        ])?;
    }
    for m in measurements {
        writer.serialize(CsvRow::from(m))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} measurements to {:?}", measurements.len(), path);
    Ok(measurements.len())
}
