//! Yearly establishment log records.

use estab_core::Year;
use estab_input::{RegionTable, SpeciesTable};

use crate::stats::EstablishmentStats;

/// Averages for one (species, climate region) over one year.
#[derive(Clone, Debug, PartialEq)]
pub struct EstablishmentRecord {
    pub year:                   Year,
    pub species:                String,
    pub region:                 String,
    /// Number of evaluations averaged.  Always > 0.
    pub attempts:               u64,
    pub avg_temp_mult:          f64,
    pub avg_min_jan_temp_mult:  f64,
    pub avg_soil_moisture_mult: f64,
    pub avg_prob_establish:     f64,
    pub avg_dry_days:           f64,
    pub avg_begin_gdd:          f64,
    pub avg_end_gdd:            f64,
}

/// Build records in (species, region) id order.  Inactive regions and cells
/// with no evaluations are skipped, so no average is ever taken over zero
/// samples.
pub(crate) fn collect_records(
    stats:   &EstablishmentStats,
    year:    Year,
    species: &SpeciesTable,
    regions: &RegionTable,
) -> Vec<EstablishmentRecord> {
    let mut records = Vec::new();
    for (sid, sp) in species.iter() {
        for (rid, region) in regions.iter() {
            if !region.active {
                continue;
            }
            let Some(means) = stats.cell(sid, rid).and_then(|c| c.means()) else {
                continue;
            };
            records.push(EstablishmentRecord {
                year,
                species:                sp.name.clone(),
                region:                 region.name.clone(),
                attempts:               means.count,
                avg_temp_mult:          means.temperature,
                avg_min_jan_temp_mult:  means.january_temp,
                avg_soil_moisture_mult: means.soil_moisture,
                avg_prob_establish:     means.probability,
                avg_dry_days:           means.dry_days,
                avg_begin_gdd:          means.begin_growing,
                avg_end_gdd:            means.end_growing,
            });
        }
    }
    records
}
