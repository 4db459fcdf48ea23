//! Per-site state in Structure-of-Arrays layout.
//!
//! Every `Vec` field of [`SiteStore`] has exactly `count` elements and the
//! [`SiteId`] value is the index into all of them:
//!
//! ```ignore
//! let dry = store.dry_days[site.index()];  // O(1), cache-friendly
//! ```
//!
//! Dry days, slope, and biomass are owned by external site and cohort
//! models; the establishment engine only reads them.

use estab_core::{RegionId, SiteId, SpeciesId};

use crate::{InputError, InputResult};

/// Read-only view of one site, assembled from the SoA columns.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SiteState {
    pub region:         RegionId,
    /// Soil-moisture-deficit days in this year's growing season.
    pub dry_days:       f64,
    /// Slope angle in degrees.
    pub slope_angle:    f64,
    /// Aggregate living biomass over all cohorts on the site.
    pub living_biomass: f64,
}

/// Structure-of-Arrays storage for all site state.
#[derive(Clone, Debug, Default)]
pub struct SiteStore {
    /// Number of sites.  Equals the length of every SoA `Vec`.
    pub count:          usize,
    pub region:         Vec<RegionId>,
    /// Inactive sites are never evaluated.
    pub active:         Vec<bool>,
    pub dry_days:       Vec<f64>,
    pub slope_angle:    Vec<f64>,
    pub living_biomass: Vec<f64>,
}

impl SiteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            count:          0,
            region:         Vec::with_capacity(n),
            active:         Vec::with_capacity(n),
            dry_days:       Vec::with_capacity(n),
            slope_angle:    Vec::with_capacity(n),
            living_biomass: Vec::with_capacity(n),
        }
    }

    /// Validate and append one site, returning its id.
    pub fn push(&mut self, state: SiteState, active: bool) -> InputResult<SiteId> {
        validate_site(&state, self.count)?;
        let id = SiteId::try_from(self.count)
            .map_err(|_| InputError::Parse("too many sites for a u32 id".into()))?;
        self.region.push(state.region);
        self.active.push(active);
        self.dry_days.push(state.dry_days);
        self.slope_angle.push(state.slope_angle);
        self.living_biomass.push(state.living_biomass);
        self.count += 1;
        Ok(id)
    }

    /// Validate and overwrite the yearly state of an existing site.
    ///
    /// The region is part of the site's identity and is not changed.
    pub fn update(
        &mut self,
        site:           SiteId,
        dry_days:       f64,
        slope_angle:    f64,
        living_biomass: f64,
    ) -> InputResult<()> {
        let i = site.index();
        let Some(&region) = self.region.get(i) else {
            return Err(InputError::InvalidSite { row: i, reason: format!("{site} does not exist") });
        };
        validate_site(&SiteState { region, dry_days, slope_angle, living_biomass }, i)?;
        self.dry_days[i] = dry_days;
        self.slope_angle[i] = slope_angle;
        self.living_biomass[i] = living_biomass;
        Ok(())
    }

    /// Assemble the view for `site`.
    ///
    /// # Panics
    /// Panics if `site` is out of bounds.
    #[inline]
    pub fn state(&self, site: SiteId) -> SiteState {
        let i = site.index();
        SiteState {
            region:         self.region[i],
            dry_days:       self.dry_days[i],
            slope_angle:    self.slope_angle[i],
            living_biomass: self.living_biomass[i],
        }
    }

    /// Ids of all active sites in ascending order.
    pub fn active_sites(&self) -> impl Iterator<Item = SiteId> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter(|&(_, &a)| a)
            .map(|(i, _)| SiteId(i as u32))
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl SiteState {
    /// Describe the first field outside the range the suitability and
    /// terrain functions accept, or `None` if the state is usable.
    ///
    /// Dry days and living biomass must be finite and non-negative; slope
    /// must lie in [0, 90] degrees.
    pub fn range_error(&self) -> Option<String> {
        if !self.dry_days.is_finite() || self.dry_days < 0.0 {
            return Some(format!("dry_days {} must be non-negative", self.dry_days));
        }
        if !(0.0..=90.0).contains(&self.slope_angle) {
            return Some(format!("slope_angle {} must lie in [0, 90]", self.slope_angle));
        }
        if !self.living_biomass.is_finite() || self.living_biomass < 0.0 {
            return Some(format!(
                "living_biomass {} must be non-negative",
                self.living_biomass
            ));
        }
        None
    }
}

fn validate_site(state: &SiteState, row: usize) -> InputResult<()> {
    match state.range_error() {
        Some(reason) => Err(InputError::InvalidSite { row, reason }),
        None => Ok(()),
    }
}

// ── Cohorts ───────────────────────────────────────────────────────────────────

/// One age class of a species on a site.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cohort {
    pub species:      SpeciesId,
    pub age:          u16,
    pub wood_biomass: f64,
    pub leaf_biomass: f64,
}

/// Total living biomass (wood + leaf) across a site's cohorts.
pub fn living_biomass(cohorts: &[Cohort]) -> f64 {
    cohorts
        .iter()
        .map(|c| c.wood_biomass + c.leaf_biomass)
        .sum()
}
