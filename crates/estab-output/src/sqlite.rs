//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `establishment_log` and `year_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{EstablishmentLogRow, OutputResult, YearSummaryRow};

/// Writes the establishment log to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS establishment_log (
                 year                   INTEGER NOT NULL,
                 species                TEXT    NOT NULL,
                 climate_region         TEXT    NOT NULL,
                 attempts               INTEGER NOT NULL,
                 avg_temp_mult          REAL    NOT NULL,
                 avg_min_jan_temp_mult  REAL    NOT NULL,
                 avg_soil_moisture_mult REAL    NOT NULL,
                 avg_prob_establish     REAL    NOT NULL,
                 avg_dry_days           REAL    NOT NULL,
                 avg_begin_gdd          REAL    NOT NULL,
                 avg_end_gdd            REAL    NOT NULL,
                 PRIMARY KEY (year, species, climate_region)
             );
             CREATE TABLE IF NOT EXISTS year_summaries (
                 year            INTEGER PRIMARY KEY,
                 evaluated_pairs INTEGER NOT NULL,
                 log_rows        INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_log(&mut self, rows: &[EstablishmentLogRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO establishment_log \
                 (year, species, climate_region, attempts, avg_temp_mult, \
                  avg_min_jan_temp_mult, avg_soil_moisture_mult, avg_prob_establish, \
                  avg_dry_days, avg_begin_gdd, avg_end_gdd) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.year,
                    row.species,
                    row.climate_region,
                    row.attempts as i64,
                    row.avg_temp_mult,
                    row.avg_min_jan_temp_mult,
                    row.avg_soil_moisture_mult,
                    row.avg_prob_establish,
                    row.avg_dry_days,
                    row.avg_begin_gdd,
                    row.avg_end_gdd,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_year_summary(&mut self, row: &YearSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO year_summaries (year, evaluated_pairs, log_rows) \
             VALUES (?1, ?2, ?3)",
            rusqlite::params![row.year, row.evaluated_pairs as i64, row.log_rows as i64],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
