//! Per-(species, region) running sums for the yearly establishment log.
//!
//! # Layout
//!
//! A dense `species × regions` matrix of [`CellSums`], row-major by species:
//!
//! ```text
//! cells[species.index() * region_count + region.index()]
//! ```
//!
//! Each cell bundles seven sums with the counter that is their common
//! denominator.  The only way in is [`EstablishmentStats::fold`], which
//! updates all eight fields of one cell together, so a cell's counter always
//! equals the number of assessments folded into it since the last reset.

use estab_core::{RegionId, SpeciesId};

use crate::evaluator::Assessment;
use crate::{ModelError, ModelResult};

/// Running sums for one (species, region) cell.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CellSums {
    pub soil_moisture: f64,
    pub temperature:   f64,
    pub january_temp:  f64,
    pub probability:   f64,
    pub dry_days:      f64,
    pub begin_growing: f64,
    pub end_growing:   f64,
    /// Number of assessments folded in.
    pub count:         u64,
}

/// Cell averages.  Only produced for cells with `count > 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellMeans {
    pub soil_moisture: f64,
    pub temperature:   f64,
    pub january_temp:  f64,
    pub probability:   f64,
    pub dry_days:      f64,
    pub begin_growing: f64,
    pub end_growing:   f64,
    pub count:         u64,
}

impl CellSums {
    fn add(&mut self, a: &Assessment) {
        self.soil_moisture += a.soil_moisture;
        self.temperature += a.temperature;
        self.january_temp += a.january_temp;
        self.probability += a.probability;
        self.dry_days += a.dry_days;
        self.begin_growing += f64::from(a.begin_growing);
        self.end_growing += f64::from(a.end_growing);
        self.count += 1;
    }

    /// Sum / count for every field, or `None` for an untouched cell.
    pub fn means(&self) -> Option<CellMeans> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        Some(CellMeans {
            soil_moisture: self.soil_moisture / n,
            temperature:   self.temperature / n,
            january_temp:  self.january_temp / n,
            probability:   self.probability / n,
            dry_days:      self.dry_days / n,
            begin_growing: self.begin_growing / n,
            end_growing:   self.end_growing / n,
            count:         self.count,
        })
    }
}

/// The establishment accumulator.
#[derive(Clone, Debug)]
pub struct EstablishmentStats {
    species_count: usize,
    region_count:  usize,
    cells:         Vec<CellSums>,
}

impl EstablishmentStats {
    /// Allocate an all-zero matrix for `species_count × region_count` cells.
    pub fn new(species_count: usize, region_count: usize) -> Self {
        Self {
            species_count,
            region_count,
            cells: vec![CellSums::default(); species_count * region_count],
        }
    }

    #[inline]
    fn offset(&self, species: SpeciesId, region: RegionId) -> ModelResult<usize> {
        if species.index() >= self.species_count {
            return Err(ModelError::UnknownSpecies(species));
        }
        if region.index() >= self.region_count {
            return Err(ModelError::UnknownRegion(region));
        }
        Ok(species.index() * self.region_count + region.index())
    }

    /// Add one assessment to its (species, region) cell.
    pub fn fold(&mut self, assessment: &Assessment) -> ModelResult<()> {
        let i = self.offset(assessment.species, assessment.region)?;
        self.cells[i].add(assessment);
        Ok(())
    }

    /// Current sums for a cell; `None` if either id is out of range.
    pub fn cell(&self, species: SpeciesId, region: RegionId) -> Option<&CellSums> {
        let i = self.offset(species, region).ok()?;
        self.cells.get(i)
    }

    /// Total assessments folded in since the last reset.
    pub fn total_count(&self) -> u64 {
        self.cells.iter().map(|c| c.count).sum()
    }

    /// Zero every cell.
    pub fn reset(&mut self) {
        self.cells.fill(CellSums::default());
    }

    pub fn species_count(&self) -> usize {
        self.species_count
    }

    pub fn region_count(&self) -> usize {
        self.region_count
    }
}
