//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `establishment_log.parquet`
//! - `year_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{EstablishmentLogRow, OutputResult, YearSummaryRow};

fn log_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("year",                   DataType::UInt32,  false),
        Field::new("species",                DataType::Utf8,    false),
        Field::new("climate_region",         DataType::Utf8,    false),
        Field::new("attempts",               DataType::UInt64,  false),
        Field::new("avg_temp_mult",          DataType::Float64, false),
        Field::new("avg_min_jan_temp_mult",  DataType::Float64, false),
        Field::new("avg_soil_moisture_mult", DataType::Float64, false),
        Field::new("avg_prob_establish",     DataType::Float64, false),
        Field::new("avg_dry_days",           DataType::Float64, false),
        Field::new("avg_begin_gdd",          DataType::Float64, false),
        Field::new("avg_end_gdd",            DataType::Float64, false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("year",            DataType::UInt32, false),
        Field::new("evaluated_pairs", DataType::UInt64, false),
        Field::new("log_rows",        DataType::UInt64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes the establishment log and year summaries to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    log:         Option<ArrowWriter<File>>,
    summaries:   Option<ArrowWriter<File>>,
    log_schema:  Arc<Schema>,
    summ_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let log_schema = log_schema();
        let summ_schema = summary_schema();

        let log_file = File::create(dir.join("establishment_log.parquet"))?;
        let log = ArrowWriter::try_new(log_file, Arc::clone(&log_schema), Some(snappy_props()))?;

        let summ_file = File::create(dir.join("year_summaries.parquet"))?;
        let summaries =
            ArrowWriter::try_new(summ_file, Arc::clone(&summ_schema), Some(snappy_props()))?;

        Ok(Self {
            log: Some(log),
            summaries: Some(summaries),
            log_schema,
            summ_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_log(&mut self, rows: &[EstablishmentLogRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.log.as_mut() else {
            return Ok(());
        };

        let mut years       = UInt32Builder::new();
        let mut species     = StringBuilder::new();
        let mut regions     = StringBuilder::new();
        let mut attempts    = UInt64Builder::new();
        let mut temp        = Float64Builder::new();
        let mut january     = Float64Builder::new();
        let mut soil        = Float64Builder::new();
        let mut probability = Float64Builder::new();
        let mut dry_days    = Float64Builder::new();
        let mut begin_gdd   = Float64Builder::new();
        let mut end_gdd     = Float64Builder::new();

        for row in rows {
            years.append_value(row.year);
            species.append_value(&row.species);
            regions.append_value(&row.climate_region);
            attempts.append_value(row.attempts);
            temp.append_value(row.avg_temp_mult);
            january.append_value(row.avg_min_jan_temp_mult);
            soil.append_value(row.avg_soil_moisture_mult);
            probability.append_value(row.avg_prob_establish);
            dry_days.append_value(row.avg_dry_days);
            begin_gdd.append_value(row.avg_begin_gdd);
            end_gdd.append_value(row.avg_end_gdd);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.log_schema),
            vec![
                Arc::new(years.finish()),
                Arc::new(species.finish()),
                Arc::new(regions.finish()),
                Arc::new(attempts.finish()),
                Arc::new(temp.finish()),
                Arc::new(january.finish()),
                Arc::new(soil.finish()),
                Arc::new(probability.finish()),
                Arc::new(dry_days.finish()),
                Arc::new(begin_gdd.finish()),
                Arc::new(end_gdd.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_year_summary(&mut self, row: &YearSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut years     = UInt32Builder::new();
        let mut evaluated = UInt64Builder::new();
        let mut log_rows  = UInt64Builder::new();

        years.append_value(row.year);
        evaluated.append_value(row.evaluated_pairs);
        log_rows.append_value(row.log_rows);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(years.finish()),
                Arc::new(evaluated.finish()),
                Arc::new(log_rows.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.log.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
