//! Integration tests for estab-output.

use crate::row::{EstablishmentLogRow, YearSummaryRow};

fn log_row(year: u32, species: &str, region: &str) -> EstablishmentLogRow {
    EstablishmentLogRow {
        year,
        species:                species.into(),
        climate_region:         region.into(),
        attempts:               4,
        avg_temp_mult:          0.75,
        avg_min_jan_temp_mult:  1.0,
        avg_soil_moisture_mult: 0.5,
        avg_prob_establish:     0.25,
        avg_dry_days:           12.5,
        avg_begin_gdd:          100.0,
        avg_end_gdd:            249.0,
    }
}

fn summary_row(year: u32) -> YearSummaryRow {
    YearSummaryRow { year, evaluated_pairs: 10, log_rows: 2 }
}

#[cfg(test)]
mod row_tests {
    use estab_core::Year;
    use estab_model::EstablishmentRecord;

    use super::*;

    #[test]
    fn record_converts_to_row() {
        let record = EstablishmentRecord {
            year:                   Year(1995),
            species:                "pinus".into(),
            region:                 "ridge".into(),
            attempts:               3,
            avg_temp_mult:          0.1,
            avg_min_jan_temp_mult:  0.2,
            avg_soil_moisture_mult: 0.3,
            avg_prob_establish:     0.4,
            avg_dry_days:           5.0,
            avg_begin_gdd:          90.0,
            avg_end_gdd:            260.0,
        };
        let row = EstablishmentLogRow::from(&record);
        assert_eq!(row.year, 1995);
        assert_eq!(row.species, "pinus");
        assert_eq!(row.climate_region, "ridge");
        assert_eq!(row.attempts, 3);
        assert_eq!(row.avg_prob_establish, 0.4);
        assert_eq!(row.avg_end_gdd, 260.0);
    }

    #[test]
    fn year_summary_from_counts() {
        let row = YearSummaryRow::new(Year(2001), 12, 3);
        assert_eq!(row, YearSummaryRow { year: 2001, evaluated_pairs: 12, log_rows: 3 });
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::{CsvWriter, LOG_HEADER};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("establishment_log.csv").exists());
        assert!(dir.path().join("year_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("establishment_log.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, LOG_HEADER);
        assert_eq!(headers[2], "climate_region");

        let mut rdr2 = csv::Reader::from_path(dir.path().join("year_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["year", "evaluated_pairs", "log_rows"]);
    }

    #[test]
    fn csv_log_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_log(&[log_row(2000, "abies", "ridge"), log_row(2000, "pinus", "ridge")])
            .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("establishment_log.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "2000");
        assert_eq!(&rows[0][1], "abies");
        assert_eq!(&rows[0][2], "ridge");
        assert_eq!(&rows[0][3], "4");
        assert_eq!(&rows[0][7], "0.25"); // avg_prob_establish
        assert_eq!(&rows[1][1], "pinus");
    }

    #[test]
    fn csv_year_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_year_summary(&summary_row(2003)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("year_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "2003");
        assert_eq!(&rows[0][1], "10");
        assert_eq!(&rows[0][2], "2");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_log_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_log(&[]).unwrap();
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tmp();
        let result = CsvWriter::new(&dir.path().join("does/not/exist"));
        assert!(result.is_err());
    }

    #[test]
    fn error_message_names_the_log() {
        let dir = tmp();
        let err = match CsvWriter::new(&dir.path().join("does/not/exist")) {
            Err(e) => e,
            Ok(_) => panic!("expected an error"),
        };
        assert!(matches!(err, crate::OutputError::Io(_)));
        assert!(err.to_string().starts_with("establishment log I/O error"));
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use estab_core::{EstablishParams, RegionId, SimConfig, Year};
    use estab_input::{
        AnnualClimate, ClimateTable, Region, RegionTable, SiteState, SiteStore, SpeciesParams,
        SpeciesTable,
    };
    use estab_model::EstablishmentModel;
    use estab_sim::{SimBuilder, SimObserver};

    use super::*;
    use crate::csv::CsvWriter;
    use crate::observer::EstablishmentLogObserver;
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    /// Fails every write; counts calls.
    #[derive(Default)]
    struct FailingWriter {
        calls: usize,
    }

    impl OutputWriter for FailingWriter {
        fn write_log(&mut self, _rows: &[EstablishmentLogRow]) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("write {}", self.calls))))
        }

        fn write_year_summary(&mut self, _row: &YearSummaryRow) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("write {}", self.calls))))
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = EstablishmentLogObserver::new(FailingWriter::default());
        obs.on_year_end(Year(2000), 0);
        obs.on_year_end(Year(2001), 0);
        let err = obs.take_error().expect("error stored");
        assert!(err.to_string().contains("write 1"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 2);
    }

    #[test]
    fn empty_report_skips_log_write() {
        let mut obs = EstablishmentLogObserver::new(FailingWriter::default());
        obs.on_report(Year(2000), &[]);
        assert!(obs.take_error().is_none());
        assert_eq!(obs.total_rows(), 0);
    }

    #[test]
    fn failed_log_write_is_not_counted() {
        let record = estab_model::EstablishmentRecord {
            year:                   Year(2000),
            species:                "abies".into(),
            region:                 "ridge".into(),
            attempts:               2,
            avg_temp_mult:          0.5,
            avg_min_jan_temp_mult:  1.0,
            avg_soil_moisture_mult: 0.7,
            avg_prob_establish:     0.4,
            avg_dry_days:           3.0,
            avg_begin_gdd:          100.0,
            avg_end_gdd:            249.0,
        };
        let mut obs = EstablishmentLogObserver::new(FailingWriter::default());
        obs.on_report(Year(2000), std::slice::from_ref(&record));
        assert_eq!(obs.total_rows(), 0);
        assert!(obs.take_error().is_some());
    }

    #[test]
    fn integration_csv() {
        let mut species = SpeciesTable::new();
        species
            .insert(SpeciesParams {
                name:             "abies".into(),
                max_drought:      0.5,
                gdd_min:          500.0,
                gdd_max:          2500.0,
                min_january_temp: -10,
            })
            .unwrap();
        let mut regions = RegionTable::new();
        regions.insert(Region { name: "ridge".into(), active: true }).unwrap();
        let params = EstablishParams::new(1_000.0, 0.8, -40.0).unwrap();
        let model = EstablishmentModel::new(species, regions, params).unwrap();

        let mut climate = ClimateTable::new();
        for y in 2000..2003 {
            climate.insert(AnnualClimate {
                region:              RegionId(0),
                year:                Year(y),
                begin_growing:       100,
                end_growing:         249,
                growing_degree_days: 1500.0,
                monthly_temp:        [0.0; 12],
            });
        }

        let mut sites = SiteStore::new();
        for dry in [0.0, 15.0, 30.0] {
            sites
                .push(
                    SiteState {
                        region:         RegionId(0),
                        dry_days:       dry,
                        slope_angle:    5.0,
                        living_biomass: 200.0,
                    },
                    true,
                )
                .unwrap();
        }

        let config = SimConfig {
            start_year:  Year(2000),
            total_years: 3,
            seed:        1,
            num_threads: Some(1),
        };
        let mut sim = SimBuilder::new(config, model, climate).sites(sites).build().unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = EstablishmentLogObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");
        assert_eq!(obs.total_rows(), 3);

        // One (abies, ridge) row per year, each averaging three sites.
        let mut rdr = csv::Reader::from_path(dir.path().join("establishment_log.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "2000");
        assert_eq!(&rows[2][0], "2002");
        assert!(rows.iter().all(|r| &r[3] == "3"));
        assert_eq!(&rows[0][8], "15"); // avg_dry_days

        let mut rdr = csv::Reader::from_path(dir.path().join("year_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][1], "3");
        assert_eq!(&rows[1][2], "1");
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_log_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_log(&[
            log_row(2000, "abies", "ridge"),
            log_row(2000, "abies", "valley"),
            log_row(2000, "pinus", "ridge"),
        ])
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM establishment_log", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_log_values() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_log(&[log_row(1999, "abies", "ridge")]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (attempts, prob, dry): (i64, f64, f64) = conn
            .query_row(
                "SELECT attempts, avg_prob_establish, avg_dry_days FROM establishment_log \
                 WHERE year = 1999 AND species = 'abies' AND climate_region = 'ridge'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(attempts, 4);
        assert_eq!(prob, 0.25);
        assert_eq!(dry, 12.5);
    }

    #[test]
    fn sqlite_duplicate_cell_rejected() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_log(&[log_row(2000, "abies", "ridge")]).unwrap();
        assert!(w.write_log(&[log_row(2000, "abies", "ridge")]).is_err());
    }

    #[test]
    fn sqlite_year_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_year_summary(&summary_row(2007)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (year, evaluated, log_rows): (i64, i64, i64) = conn
            .query_row(
                "SELECT year, evaluated_pairs, log_rows FROM year_summaries WHERE year = 2007",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(year, 2007);
        assert_eq!(evaluated, 10);
        assert_eq!(log_rows, 2);
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::*;
    use crate::parquet::ParquetWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("establishment_log.parquet").exists());
        assert!(dir.path().join("year_summaries.parquet").exists());
    }

    #[test]
    fn parquet_log_rows_and_schema() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_log(&[log_row(2000, "abies", "ridge"), log_row(2000, "pinus", "ridge")])
            .unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("establishment_log.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let reader = builder.build().unwrap();

        let batches: Vec<_> = reader.map(|b| b.unwrap()).collect();
        let total_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total_rows, 2);

        let field_names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(field_names, crate::csv::LOG_HEADER);
        assert_eq!(*schema.field_with_name("species").unwrap().data_type(), DataType::Utf8);
        assert_eq!(
            *schema.field_with_name("avg_prob_establish").unwrap().data_type(),
            DataType::Float64
        );
    }

    #[test]
    fn parquet_finish_required() {
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_log(&[log_row(2000, "abies", "ridge")]).unwrap();
            // Dropped without finish(): no footer.
        }

        let file = std::fs::File::open(dir.path().join("establishment_log.parquet")).unwrap();
        assert!(ParquetRecordBatchReaderBuilder::try_new(file).is_err());
    }
}
