//! The `EnvironmentSource` trait — where yearly climate and site state come
//! from.

use estab_core::{RegionId, Year};
use estab_input::{AnnualClimate, ClimateTable, SiteStore};

use crate::SimResult;

/// Supplies the per-year inputs the establishment engine consumes.
///
/// Climate and site dynamics are produced by other models in a larger
/// simulation; this trait is the seam between them and the driver.
///
/// # Example: drying trend
///
/// ```rust,ignore
/// use estab_core::SiteId;
///
/// struct Drying { climate: ClimateTable }
///
/// impl EnvironmentSource for Drying {
///     fn annual_climate(&self, region: RegionId, year: Year) -> Option<AnnualClimate> {
///         self.climate.get(region, year).cloned()
///     }
///
///     fn prepare_year(&mut self, _year: Year, sites: &mut SiteStore) -> SimResult<()> {
///         for i in 0..sites.count {
///             let site = SiteId(i as u32);
///             let s = sites.state(site);
///             sites.update(site, s.dry_days + 1.0, s.slope_angle, s.living_biomass)?;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait EnvironmentSource {
    /// Annual climate for `region` in `year`, or `None` if the region has no
    /// data for that year.  A missing record for a region with active sites
    /// aborts the run.
    fn annual_climate(&self, region: RegionId, year: Year) -> Option<AnnualClimate>;

    /// Called once at the start of each year, before any evaluation, to
    /// refresh dry days, slope, and biomass.  Prefer `SiteStore::update` and
    /// `SiteStore::push`, which validate; sites may be added here.
    ///
    /// Default: site state is left unchanged.
    fn prepare_year(&mut self, _year: Year, _sites: &mut SiteStore) -> SimResult<()> {
        Ok(())
    }
}

/// A static climate table with unchanging site state.
impl EnvironmentSource for ClimateTable {
    fn annual_climate(&self, region: RegionId, year: Year) -> Option<AnnualClimate> {
        self.get(region, year).cloned()
    }
}
