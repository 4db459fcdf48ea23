//! The `OutputWriter` trait implemented by all backend writers.

use crate::{EstablishmentLogRow, OutputResult, YearSummaryRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with
/// [`EstablishmentLogObserver::take_error`][crate::EstablishmentLogObserver::take_error].
pub trait OutputWriter {
    /// Write one year's establishment log rows.
    fn write_log(&mut self, rows: &[EstablishmentLogRow]) -> OutputResult<()>;

    /// Write one year summary row.
    fn write_year_summary(&mut self, row: &YearSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
