use crate::power_supply::BatterySample;
use crate::util::error::AppError;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// One CSV row: a sample tagged with the battery name and the naming scheme
/// used for this run. Field order is the on-disk column order.
#[derive(Debug, Serialize)]
pub struct SampleRow {
    pub timestamp: String,
    pub percent: String,
    pub state: String,
    pub energy_full: String,
    pub energy_now: String,
    pub voltage_now: String,
    pub power_now: String,
    pub battery: String,
    pub scheme: String,
}

impl SampleRow {
    pub fn new(sample: BatterySample, battery: &str, scheme: &str) -> Self {
        Self {
            timestamp: sample.timestamp,
            percent: sample.percent,
            state: sample.state,
            energy_full: sample.energy_full,
            energy_now: sample.energy_now,
            voltage_now: sample.voltage_now,
            power_now: sample.power_now,
            battery: battery.to_string(),
            scheme: scheme.to_string(),
        }
    }
}

/// Append-only CSV log for one boot identity.
///
/// The header is written once, when the file is created; reopening an
/// existing log appends rows under the original header. Every row is
/// flushed immediately so samples already written survive an abrupt
/// power-off.
pub struct SampleLog {
    writer: csv::Writer<File>,
}

impl SampleLog {
    /// Open (or create) the log at `path` in append mode.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let write_headers = file.metadata()?.len() == 0;
        let writer = csv::WriterBuilder::new()
            .has_headers(write_headers)
            .from_writer(file);
        Ok(Self { writer })
    }

    /// Append one row and flush it to disk.
    pub fn append(&mut self, row: &SampleRow) -> Result<(), AppError> {
        self.writer.serialize(row)?;
        self.writer.flush()?;
        Ok(())
    }
}
