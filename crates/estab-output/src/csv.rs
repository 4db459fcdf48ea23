//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `establishment_log.csv`
//! - `year_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EstablishmentLogRow, OutputResult, YearSummaryRow};

/// Column order of `establishment_log.csv`.
pub const LOG_HEADER: [&str; 11] = [
    "year",
    "species",
    "climate_region",
    "attempts",
    "avg_temp_mult",
    "avg_min_jan_temp_mult",
    "avg_soil_moisture_mult",
    "avg_prob_establish",
    "avg_dry_days",
    "avg_begin_gdd",
    "avg_end_gdd",
];

/// Writes the establishment log and year summaries to two CSV files.
pub struct CsvWriter {
    log:       Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut log = Writer::from_path(dir.join("establishment_log.csv"))?;
        log.write_record(LOG_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("year_summaries.csv"))?;
        summaries.write_record(["year", "evaluated_pairs", "log_rows"])?;

        Ok(Self { log, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_log(&mut self, rows: &[EstablishmentLogRow]) -> OutputResult<()> {
        for row in rows {
            self.log.write_record(&[
                row.year.to_string(),
                row.species.clone(),
                row.climate_region.clone(),
                row.attempts.to_string(),
                row.avg_temp_mult.to_string(),
                row.avg_min_jan_temp_mult.to_string(),
                row.avg_soil_moisture_mult.to_string(),
                row.avg_prob_establish.to_string(),
                row.avg_dry_days.to_string(),
                row.avg_begin_gdd.to_string(),
                row.avg_end_gdd.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_year_summary(&mut self, row: &YearSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.year.to_string(),
            row.evaluated_pairs.to_string(),
            row.log_rows.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.log.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
