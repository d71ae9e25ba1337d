//! CSV output for the analysis tables

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::scenario::{AnalysisReport, ScenarioSummaryRow};

pub const SCHEDULE_FILE: &str = "amortization_schedule.csv";
pub const PROPERTY_FILE: &str = "property_values.csv";
pub const YEARLY_FILE: &str = "yearly_summary.csv";
pub const NET_PROCEEDS_FILE: &str = "net_proceeds.csv";

/// Write rows as CSV with a header taken from the row's field names
pub fn write_table<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write rows to a CSV file, replacing any existing file
pub fn write_table_to_path<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    write_table(File::create(path)?, rows)
}

/// Write every table of a report into `dir`, returning the files written
pub fn write_report(dir: &Path, report: &AnalysisReport) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let schedule_path = dir.join(SCHEDULE_FILE);
    write_table_to_path(&schedule_path, &report.schedule.records)?;

    let property_path = dir.join(PROPERTY_FILE);
    write_table_to_path(&property_path, &report.property)?;

    let yearly_path = dir.join(YEARLY_FILE);
    write_table_to_path(&yearly_path, &report.yearly)?;

    let proceeds_path = dir.join(NET_PROCEEDS_FILE);
    write_table_to_path(&proceeds_path, &report.net_proceeds)?;

    Ok(vec![schedule_path, property_path, yearly_path, proceeds_path])
}

/// Write the one-line-per-scenario batch summary
pub fn write_batch_summary(path: &Path, rows: &[ScenarioSummaryRow]) -> Result<()> {
    write_table_to_path(path, rows)
}
