//! Climate regions and their annual climate summaries.

use std::collections::{BTreeMap, HashMap};

use estab_core::{RegionId, Year};

use crate::{InputError, InputResult};

// ── Region registry ───────────────────────────────────────────────────────────

/// A climate region (ecoregion).  Inactive regions are skipped by reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub name:   String,
    pub active: bool,
}

/// Registry of regions, indexed by [`RegionId`].
#[derive(Clone, Debug, Default)]
pub struct RegionTable {
    regions: Vec<Region>,
    by_name: HashMap<String, RegionId>,
}

impl RegionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `region` under the next free id.
    pub fn insert(&mut self, region: Region) -> InputResult<RegionId> {
        if self.by_name.contains_key(&region.name) {
            return Err(InputError::DuplicateName { kind: "region", name: region.name });
        }
        let id = RegionId::try_from(self.regions.len())
            .map_err(|_| InputError::Parse("too many regions for a u16 id".into()))?;
        self.by_name.insert(region.name.clone(), id);
        self.regions.push(region);
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index())
    }

    pub fn id_of(&self, name: &str) -> Option<RegionId> {
        self.by_name.get(name).copied()
    }

    /// Like [`id_of`][Self::id_of] but reports unknown names as an error.
    pub fn require(&self, name: &str) -> InputResult<RegionId> {
        self.id_of(name)
            .ok_or_else(|| InputError::UnknownRegion(name.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// All regions in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        self.regions
            .iter()
            .enumerate()
            .map(|(i, r)| (RegionId(i as u16), r))
    }
}

// ── Annual climate ────────────────────────────────────────────────────────────

/// One region's climate summary for one year.
///
/// Growing-season bounds are days of year and are not validated here; a
/// season shorter than two days is a fatal error the first time the engine
/// evaluates a site in the region.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnualClimate {
    pub region:              RegionId,
    pub year:                Year,
    pub begin_growing:       i32,
    pub end_growing:         i32,
    /// Accumulated heat sum for the year.
    pub growing_degree_days: f64,
    /// Mean monthly temperature (°C); index 0 = January.
    pub monthly_temp:        [f64; 12],
}

impl AnnualClimate {
    /// January mean temperature.
    #[inline]
    pub fn january_temp(&self) -> f64 {
        self.monthly_temp[0]
    }
}

/// Annual climate keyed by (region, year).
#[derive(Clone, Debug, Default)]
pub struct ClimateTable {
    entries: BTreeMap<(RegionId, Year), AnnualClimate>,
}

impl ClimateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `(climate.region, climate.year)`.
    pub fn insert(&mut self, climate: AnnualClimate) {
        self.entries.insert((climate.region, climate.year), climate);
    }

    pub fn get(&self, region: RegionId, year: Year) -> Option<&AnnualClimate> {
        self.entries.get(&(region, year))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
