//! `EstablishmentLogObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use estab_core::Year;
use estab_model::EstablishmentRecord;
use estab_sim::SimObserver;

use crate::row::{EstablishmentLogRow, YearSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes the establishment log and year summaries to
/// any [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct EstablishmentLogObserver<W: OutputWriter> {
    writer:     W,
    /// Rows emitted by the most recent `on_report`, for the year summary.
    last_rows:  usize,
    total_rows: u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> EstablishmentLogObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_rows: 0, total_rows: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Total log rows handed to the writer so far.
    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                tracing::warn!(target: "estab::output", error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for EstablishmentLogObserver<W> {
    fn on_report(&mut self, _year: Year, records: &[EstablishmentRecord]) {
        self.last_rows = records.len();
        if records.is_empty() {
            return;
        }
        let rows: Vec<EstablishmentLogRow> = records.iter().map(EstablishmentLogRow::from).collect();
        let result = self.writer.write_log(&rows);
        if result.is_ok() {
            self.total_rows += rows.len() as u64;
        }
        self.store_err(result);
    }

    fn on_year_end(&mut self, year: Year, evaluated: usize) {
        let row = YearSummaryRow::new(year, evaluated, self.last_rows);
        self.last_rows = 0;
        let result = self.writer.write_year_summary(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, final_year: Year) {
        let result = self.writer.finish();
        self.store_err(result);
        tracing::info!(
            target: "estab::output",
            %final_year,
            rows = self.total_rows,
            "establishment log closed"
        );
    }
}
