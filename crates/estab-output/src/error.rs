//! Errors raised while persisting the establishment log and year summaries.
//!
//! Messages name the output tables so a failure surfaced through
//! `EstablishmentLogObserver::take_error` reads without further context.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Output directory or file could not be created or written.
    #[error("establishment log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("establishment log CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("establishment log SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Building a record batch for `establishment_log` or `year_summaries`.
    #[cfg(feature = "parquet")]
    #[error("establishment log Arrow batch error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[cfg(feature = "parquet")]
    #[error("establishment log Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

pub type OutputResult<T> = Result<T, OutputError>;
