//! The establishment evaluator.
//!
//! # Compute / fold split
//!
//! [`EstablishmentModel::evaluate`] is `assess` followed by `record`.  The
//! two halves are public so a driver can run `assess` (read-only, `&self`)
//! across many sites in parallel and then `record` every result in one
//! single-threaded pass, which keeps each accumulator cell consistent
//! without locks.

use estab_core::{EstablishParams, RegionId, SpeciesId, Year};
use estab_input::{AnnualClimate, RegionTable, SiteState, SpeciesTable};

use crate::combine::{limiting_factor, terrain_adjustment};
use crate::report::{EstablishmentRecord, collect_records};
use crate::stats::EstablishmentStats;
use crate::suitability::{
    degree_day_multiplier, january_temp_multiplier, soil_moisture_multiplier,
};
use crate::{ModelError, ModelResult};

/// Everything measured for one (species, site) evaluation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Assessment {
    pub species:       SpeciesId,
    pub region:        RegionId,
    pub soil_moisture: f64,
    pub temperature:   f64,
    pub january_temp:  f64,
    /// Limiting-factor minimum, before terrain adjustment.
    pub combined:      f64,
    /// Final establishment probability.
    pub probability:   f64,
    pub dry_days:      f64,
    pub begin_growing: i32,
    pub end_growing:   i32,
}

/// Species and region registries, terrain parameters, and the yearly
/// accumulator.
pub struct EstablishmentModel {
    species: SpeciesTable,
    regions: RegionTable,
    params:  EstablishParams,
    stats:   EstablishmentStats,
}

impl EstablishmentModel {
    /// Validate `params` and allocate a zeroed accumulator sized to the two
    /// registries.
    pub fn new(
        species: SpeciesTable,
        regions: RegionTable,
        params:  EstablishParams,
    ) -> ModelResult<Self> {
        params.validate()?;
        let stats = EstablishmentStats::new(species.len(), regions.len());
        Ok(Self { species, regions, params, stats })
    }

    pub fn species(&self) -> &SpeciesTable {
        &self.species
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    pub fn params(&self) -> &EstablishParams {
        &self.params
    }

    /// Partial accumulation for the current year.
    pub fn stats(&self) -> &EstablishmentStats {
        &self.stats
    }

    /// Compute every multiplier and the final probability without touching
    /// the accumulator.
    ///
    /// `climate` must be the annual record for the site's region.  Site
    /// values outside their valid ranges are rejected before any multiplier
    /// is computed, so every multiplier stays in [0, 1].
    pub fn assess(
        &self,
        species: SpeciesId,
        site:    &SiteState,
        climate: &AnnualClimate,
    ) -> ModelResult<Assessment> {
        let params = self
            .species
            .get(species)
            .ok_or(ModelError::UnknownSpecies(species))?;
        if self.regions.get(site.region).is_none() {
            return Err(ModelError::UnknownRegion(site.region));
        }
        if climate.region != site.region {
            return Err(ModelError::ClimateMismatch {
                site_region:    site.region,
                climate_region: climate.region,
            });
        }

        if let Some(reason) = site.range_error() {
            return Err(ModelError::InvalidSite { region: site.region, reason });
        }

        let soil_moisture = soil_moisture_multiplier(climate, params, site.dry_days)?;
        let temperature = degree_day_multiplier(climate, params);
        let january_temp = january_temp_multiplier(climate, params);

        let combined = limiting_factor(soil_moisture, temperature, january_temp);
        let probability =
            terrain_adjustment(combined, site.living_biomass, site.slope_angle, &self.params);

        Ok(Assessment {
            species,
            region: site.region,
            soil_moisture,
            temperature,
            january_temp,
            combined,
            probability,
            dry_days: site.dry_days,
            begin_growing: climate.begin_growing,
            end_growing: climate.end_growing,
        })
    }

    /// Fold a finished assessment into the accumulator.
    pub fn record(&mut self, assessment: &Assessment) -> ModelResult<()> {
        self.stats.fold(assessment)
    }

    /// Evaluate one (species, site) pair and fold the result into the
    /// accumulator.  Returns the establishment probability.
    ///
    /// On error nothing is recorded.
    pub fn evaluate(
        &mut self,
        species: SpeciesId,
        site:    &SiteState,
        climate: &AnnualClimate,
    ) -> ModelResult<f64> {
        let assessment = self.assess(species, site, climate)?;
        self.record(&assessment)?;
        Ok(assessment.probability)
    }

    /// Close out `year`: emit one record per (species, active region) cell
    /// that saw at least one evaluation, then zero the accumulator.
    ///
    /// Must run after the last evaluation of `year` and before the first of
    /// the next.
    pub fn flush_and_report(&mut self, year: Year) -> Vec<EstablishmentRecord> {
        let records = collect_records(&self.stats, year, &self.species, &self.regions);
        tracing::debug!(
            target: "estab::model",
            %year,
            evaluations = self.stats.total_count(),
            records = records.len(),
            "establishment statistics flushed"
        );
        self.stats.reset();
        records
    }
}
