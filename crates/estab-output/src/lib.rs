//! `estab-output` — establishment log writers for the estab engine.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                                               |
//! |-----------|-------------|-------------------------------------------------------------|
//! | *(none)*  | CSV         | `establishment_log.csv`, `year_summaries.csv`               |
//! | `sqlite`  | SQLite      | `output.db`                                                 |
//! | `parquet` | Parquet     | `establishment_log.parquet`, `year_summaries.parquet`       |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`EstablishmentLogObserver`], which implements `estab_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use estab_output::{CsvWriter, EstablishmentLogObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = EstablishmentLogObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::EstablishmentLogObserver;
pub use row::{EstablishmentLogRow, YearSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
