//! Measurement store with whole-file snapshot persistence.
//!
//! The store keeps the ordered measurement history in memory and rewrites
//! the complete snapshot after every mutation. Snapshots are written to a
//! temp file in the same directory and renamed over the store file.

use crate::{Error, Measurement, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// How persistence failures are reported
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PersistenceMode {
    /// Log failures and carry on with the in-memory state
    #[default]
    Lenient,
    /// Return failures to the caller as `Error::Persistence`
    Strict,
}

/// Ordered, file-backed collection of measurements
///
/// The last element is the most recent measurement. Accessors hand out
/// owned copies, never references into the stored sequence.
#[derive(Debug)]
pub struct MeasurementStore {
    path: PathBuf,
    mode: PersistenceMode,
    measurements: Vec<Measurement>,
    synced: bool,
}

impl MeasurementStore {
    /// Open a store in lenient mode
    ///
    /// Never fails: a missing file is an empty history, and an unreadable
    /// or corrupted file is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let measurements = match load_snapshot(&path) {
            Ok(measurements) => measurements,
            Err(e) => {
                tracing::warn!(
                    "Failed to load measurements from {:?}: {}. Starting empty.",
                    path,
                    e
                );
                Vec::new()
            }
        };

        Self {
            path,
            mode: PersistenceMode::Lenient,
            measurements,
            synced: true,
        }
    }

    /// Open a store with an explicit persistence mode
    ///
    /// In strict mode any load failure other than a missing file is
    /// returned as `Error::Persistence`.
    pub fn open_with_mode(path: impl Into<PathBuf>, mode: PersistenceMode) -> Result<Self> {
        match mode {
            PersistenceMode::Lenient => Ok(Self::open(path)),
            PersistenceMode::Strict => {
                let path = path.into();
                let measurements = load_snapshot(&path).map_err(|e| {
                    Error::Persistence(format!("failed to load {:?}: {}", path, e))
                })?;
                Ok(Self {
                    path,
                    mode,
                    measurements,
                    synced: true,
                })
            }
        }
    }

    /// Append a measurement and persist
    pub fn add(&mut self, measurement: Measurement) -> Result<()> {
        self.measurements.push(measurement);
        tracing::info!("Added measurement #{}", self.measurements.len() - 1);
        self.persist()
    }

    /// Copy of the full history, oldest first
    pub fn get_all(&self) -> Vec<Measurement> {
        self.measurements.clone()
    }

    /// Copy of the measurement at `index`
    pub fn get(&self, index: usize) -> Option<Measurement> {
        self.measurements.get(index).cloned()
    }

    /// Replace the measurement at `index` and persist
    pub fn update(&mut self, index: usize, measurement: Measurement) -> Result<()> {
        self.check_index(index)?;
        self.measurements[index] = measurement;
        tracing::info!("Updated measurement #{}", index);
        self.persist()
    }

    /// Remove the measurement at `index`, persist, and return it
    pub fn delete(&mut self, index: usize) -> Result<Measurement> {
        self.check_index(index)?;
        let removed = self.measurements.remove(index);
        tracing::info!("Deleted measurement #{}", index);
        self.persist()?;
        Ok(removed)
    }

    pub fn count(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// The most recent measurement and the one before it
    pub fn latest_pair(&self) -> (Option<Measurement>, Option<Measurement>) {
        let mut newest_first = self.measurements.iter().rev();
        let current = newest_first.next().cloned();
        let previous = newest_first.next().cloned();
        (current, previous)
    }

    /// Whether the last persistence attempt reached disk
    ///
    /// Stays `false` after a failed save until a later save succeeds.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    pub fn mode(&self) -> PersistenceMode {
        self.mode
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.measurements.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.measurements.len(),
            });
        }
        Ok(())
    }

    /// Write the full snapshot; the in-memory state is already mutated
    fn persist(&mut self) -> Result<()> {
        match save_snapshot(&self.path, &self.measurements) {
            Ok(()) => {
                self.synced = true;
                Ok(())
            }
            Err(e) => {
                self.synced = false;
                tracing::error!(
                    "Failed to save {} measurements to {:?}: {}",
                    self.measurements.len(),
                    self.path,
                    e
                );
                match self.mode {
                    PersistenceMode::Lenient => Ok(()),
                    PersistenceMode::Strict => Err(Error::Persistence(format!(
                        "failed to save {:?}: {}",
                        self.path, e
                    ))),
                }
            }
        }
    }
}

/// Read a snapshot with a shared lock. A missing file is an empty history.
fn load_snapshot(path: &Path) -> Result<Vec<Measurement>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("No measurement file at {:?}, starting empty", path);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    file.lock_shared()?;
    let mut contents = String::new();
    let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
    let _ = file.unlock();
    read?;

    let measurements: Vec<Measurement> = serde_json::from_str(&contents)?;
    tracing::debug!("Loaded {} measurements from {:?}", measurements.len(), path);
    Ok(measurements)
}

/// Atomically replace the snapshot file by:
/// 1. Writing to a temp file in the same directory
/// 2. Syncing to disk
/// 3. Renaming over the original
fn save_snapshot(path: &Path, measurements: &[Measurement]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        serde_json::to_writer(&mut writer, measurements)?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Saved {} measurements to {:?}", measurements.len(), path);
    Ok(())
}
