//! Synthetic three-region landscape.
//!
//! A dry, exposed ridge, a sheltered valley, and a lakeshore that is
//! simulated but excluded from the establishment log.  Climate and site
//! dynamics are drawn from seeded [`SimRng`] streams so a given scenario
//! always produces the same run.

use std::ops::Range;

use anyhow::{Result, bail};

use estab_core::{RegionId, SimConfig, SimRng, SiteId, SpeciesId, Year};
use estab_input::{
    AnnualClimate, ClimateTable, Cohort, RegionTable, SiteState, SiteStore, SpeciesTable,
    living_biomass,
};
use estab_sim::{EnvironmentSource, SimResult};

/// Per-region ranges that yearly climate and dry days are drawn from.
pub struct RegionProfile {
    pub name:          &'static str,
    pub begin_growing: Range<i32>,
    pub season_days:   Range<i32>,
    pub gdd:           Range<f64>,
    pub january_temp:  Range<f64>,
    pub dry_days:      Range<f64>,
    pub slope:         Range<f64>,
}

pub static PROFILES: [RegionProfile; 3] = [
    RegionProfile {
        name:          "ridge",
        begin_growing: 125..140,
        season_days:   110..140,
        gdd:           900.0..1_600.0,
        january_temp:  -16.0..-6.0,
        dry_days:      10.0..70.0,
        slope:         10.0..40.0,
    },
    RegionProfile {
        name:          "valley",
        begin_growing: 105..120,
        season_days:   150..180,
        gdd:           1_500.0..2_300.0,
        january_temp:  -9.0..-2.0,
        dry_days:      0.0..30.0,
        slope:         0.0..8.0,
    },
    RegionProfile {
        name:          "lakeshore",
        begin_growing: 110..125,
        season_days:   140..170,
        gdd:           1_300.0..2_000.0,
        january_temp:  -11.0..-4.0,
        dry_days:      0.0..10.0,
        slope:         0.0..3.0,
    },
];

/// Look up the profile for every registered region, in `RegionId` order.
fn profiles_for(regions: &RegionTable) -> Result<Vec<&'static RegionProfile>> {
    regions
        .iter()
        .map(|(_, region)| match PROFILES.iter().find(|p| p.name == region.name) {
            Some(p) => Ok(p),
            None => bail!("no climate profile for region {:?}", region.name),
        })
        .collect()
}

/// Draw annual climate for every region and every simulated year.
pub fn build_climate(regions: &RegionTable, config: &SimConfig, rng: &mut SimRng) -> Result<ClimateTable> {
    let profiles = profiles_for(regions)?;
    let mut table = ClimateTable::new();
    for (i, profile) in profiles.iter().enumerate() {
        let mut stream = rng.child(i as u64);
        for offset in 0..config.total_years {
            let begin = stream.gen_range(profile.begin_growing.clone());
            let season = stream.gen_range(profile.season_days.clone());
            let january = stream.gen_range(profile.january_temp.clone());

            // Rough sinusoid from January to a July peak.
            let mut monthly_temp = [0.0; 12];
            for (m, t) in monthly_temp.iter_mut().enumerate() {
                let phase = (m as f64 / 11.0 * std::f64::consts::PI).sin();
                *t = january + phase * 28.0;
            }

            table.insert(AnnualClimate {
                region:              RegionId(i as u16),
                year:                config.start_year + offset,
                begin_growing:       begin,
                end_growing:         begin + season - 1,
                growing_degree_days: stream.gen_range(profile.gdd.clone()),
                monthly_temp,
            });
        }
    }
    Ok(table)
}

/// Scatter `count` sites across the landscape, each with a few cohorts.
pub fn build_sites(
    regions: &RegionTable,
    species: &SpeciesTable,
    count:   usize,
    rng:     &mut SimRng,
) -> Result<(SiteStore, Vec<Vec<Cohort>>)> {
    let profiles = profiles_for(regions)?;
    if profiles.is_empty() || species.is_empty() {
        bail!("landscape needs at least one region and one species");
    }

    let mut sites = SiteStore::with_capacity(count);
    let mut cohorts = Vec::with_capacity(count);
    for _ in 0..count {
        let r = rng.gen_range(0..profiles.len());
        let profile = profiles[r];

        let site_cohorts: Vec<Cohort> = (0..rng.gen_range(0..4))
            .map(|_| Cohort {
                species:      SpeciesId(rng.gen_range(0..species.len()) as u16),
                age:          rng.gen_range(1..120),
                wood_biomass: rng.gen_range(100.0..4_000.0),
                leaf_biomass: rng.gen_range(10.0..300.0),
            })
            .collect();

        let state = SiteState {
            region:         RegionId(r as u16),
            dry_days:       rng.gen_range(profile.dry_days.clone()),
            slope_angle:    rng.gen_range(profile.slope.clone()),
            living_biomass: living_biomass(&site_cohorts),
        };
        sites.push(state, rng.gen_bool(0.9))?;
        cohorts.push(site_cohorts);
    }
    Ok((sites, cohorts))
}

// ── Environment source ────────────────────────────────────────────────────────

/// Pre-drawn climate plus simple yearly site dynamics: cohorts age and put
/// on wood, stand-replacing disturbance clears a site, and dry days are
/// redrawn from the region's range.
pub struct Landscape {
    climate:          ClimateTable,
    profiles:         Vec<&'static RegionProfile>,
    cohorts:          Vec<Vec<Cohort>>,
    disturbance_rate: f64,
    rng:              SimRng,
}

impl Landscape {
    pub fn new(
        climate:          ClimateTable,
        regions:          &RegionTable,
        cohorts:          Vec<Vec<Cohort>>,
        disturbance_rate: f64,
        rng:              SimRng,
    ) -> Result<Self> {
        Ok(Self {
            climate,
            profiles: profiles_for(regions)?,
            cohorts,
            disturbance_rate,
            rng,
        })
    }
}

impl EnvironmentSource for Landscape {
    fn annual_climate(&self, region: RegionId, year: Year) -> Option<AnnualClimate> {
        self.climate.get(region, year).cloned()
    }

    fn prepare_year(&mut self, year: Year, sites: &mut SiteStore) -> SimResult<()> {
        let mut disturbed = 0usize;
        for (i, cohorts) in self.cohorts.iter_mut().enumerate() {
            if self.rng.gen_bool(self.disturbance_rate) {
                cohorts.clear();
                disturbed += 1;
            } else {
                for c in cohorts.iter_mut() {
                    c.age = c.age.saturating_add(1);
                    c.wood_biomass *= 1.03;
                }
            }

            let site = SiteId(i as u32);
            let state = sites.state(site);
            let profile = self.profiles[state.region.index()];
            let dry_days = self.rng.gen_range(profile.dry_days.clone());
            sites.update(site, dry_days, state.slope_angle, living_biomass(cohorts))?;
        }
        tracing::debug!(target: "ridge", %year, disturbed, "site state refreshed");
        Ok(())
    }
}
