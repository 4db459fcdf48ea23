//! Plain data row types written by output backends.

use estab_core::Year;
use estab_model::EstablishmentRecord;

/// One line of the establishment log: yearly averages for a
/// (species, climate region) cell.
#[derive(Debug, Clone, PartialEq)]
pub struct EstablishmentLogRow {
    pub year:                   u32,
    pub species:                String,
    pub climate_region:         String,
    pub attempts:               u64,
    pub avg_temp_mult:          f64,
    pub avg_min_jan_temp_mult:  f64,
    pub avg_soil_moisture_mult: f64,
    pub avg_prob_establish:     f64,
    pub avg_dry_days:           f64,
    pub avg_begin_gdd:          f64,
    pub avg_end_gdd:            f64,
}

impl From<&EstablishmentRecord> for EstablishmentLogRow {
    fn from(r: &EstablishmentRecord) -> Self {
        Self {
            year:                   r.year.0,
            species:                r.species.clone(),
            climate_region:         r.region.clone(),
            attempts:               r.attempts,
            avg_temp_mult:          r.avg_temp_mult,
            avg_min_jan_temp_mult:  r.avg_min_jan_temp_mult,
            avg_soil_moisture_mult: r.avg_soil_moisture_mult,
            avg_prob_establish:     r.avg_prob_establish,
            avg_dry_days:           r.avg_dry_days,
            avg_begin_gdd:          r.avg_begin_gdd,
            avg_end_gdd:            r.avg_end_gdd,
        }
    }
}

/// Summary statistics for one simulated year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSummaryRow {
    pub year:            u32,
    /// (site, species) pairs evaluated.
    pub evaluated_pairs: u64,
    /// Establishment log rows emitted.
    pub log_rows:        u64,
}

impl YearSummaryRow {
    pub fn new(year: Year, evaluated_pairs: usize, log_rows: usize) -> Self {
        Self {
            year:            year.0,
            evaluated_pairs: evaluated_pairs as u64,
            log_rows:        log_rows as u64,
        }
    }
}
