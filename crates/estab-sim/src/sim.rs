//! The `Sim` struct and its yearly loop.

use estab_core::{RegionId, SiteId, SimClock, SimConfig, SpeciesId, Year};
use estab_input::{AnnualClimate, SiteStore};
use estab_model::{Assessment, EstablishmentModel, ModelError, ModelResult};

use crate::{EnvironmentSource, SimObserver, SimResult};

#[cfg(feature = "fx-hash")]
type ClimateIndex = rustc_hash::FxHashMap<RegionId, AnnualClimate>;
#[cfg(not(feature = "fx-hash"))]
type ClimateIndex = std::collections::HashMap<RegionId, AnnualClimate>;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The yearly establishment driver.
///
/// Each year runs five phases:
///
/// 1. **Prepare**: [`EnvironmentSource::prepare_year`] refreshes site state.
/// 2. **Climate**: fetch the annual record for every region that has an
///    active site.  A missing record aborts the run.
/// 3. **Assess** (optionally parallel with the `parallel` feature): compute
///    multipliers and probability for every (active site, species) pair.
/// 4. **Fold** (sequential, ascending site then species): add each
///    assessment to the accumulator and store its probability.
/// 5. **Report**: flush the accumulator into the year's establishment log.
///
/// Because reporting happens inside the same step as the fold, no
/// evaluation of the next year can reach the accumulator before this year's
/// log is built.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<E: EnvironmentSource> {
    /// Run configuration (start year, total years, …).
    pub config: SimConfig,

    /// Tracks the year currently being simulated.
    pub clock: SimClock,

    /// Registries, terrain parameters, and the yearly accumulator.
    pub model: EstablishmentModel,

    /// Per-site state (SoA arrays).
    pub sites: SiteStore,

    /// Supplier of climate and site dynamics.
    pub source: E,

    /// Latest establishment probability per (site, species), site-major:
    /// `probabilities[site.index() * species_count + species.index()]`.
    /// Zero for sites that were inactive in the latest year.
    pub probabilities: Vec<f64>,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<E: EnvironmentSource> Sim<E> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current year to `config.end_year()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_year < self.config.end_year() {
            self.step_year(observer)?;
        }
        observer.on_sim_end(self.clock.current_year);
        Ok(())
    }

    /// Run exactly `n` years from the current position (ignores `end_year`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_years<O: SimObserver>(&mut self, n: u32, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step_year(observer)?;
        }
        Ok(())
    }

    /// Latest establishment probability for one (site, species) pair.
    pub fn probability(&self, site: SiteId, species: SpeciesId) -> Option<f64> {
        let n_species = self.model.species().len();
        if species.index() >= n_species {
            return None;
        }
        self.probabilities
            .get(site.index() * n_species + species.index())
            .copied()
    }

    // ── Core year processing ──────────────────────────────────────────────

    fn step_year<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_year;
        observer.on_year_start(now);

        let evaluated = self.process_year(now)?;
        let records = self.model.flush_and_report(now);
        tracing::info!(
            target: "estab::sim",
            year = %now,
            evaluated,
            records = records.len(),
            "year complete"
        );
        observer.on_report(now, &records);
        observer.on_year_end(now, evaluated);

        self.clock.advance();
        Ok(())
    }

    fn process_year(&mut self, now: Year) -> SimResult<usize> {
        // ── Phase 1: refresh site state ───────────────────────────────────
        self.source.prepare_year(now, &mut self.sites)?;

        // ── Phase 2: gather climate for regions with active sites ─────────
        let climates = self.gather_climate(now)?;

        // ── Phase 3: assess (produce) ─────────────────────────────────────
        let species: Vec<SpeciesId> = self.model.species().iter().map(|(id, _)| id).collect();
        let work: Vec<(SiteId, SpeciesId)> = self
            .sites
            .active_sites()
            .flat_map(|site| species.iter().map(move |&sp| (site, sp)))
            .collect();

        let assessments = match self.assess_all(&climates, &work) {
            Ok(a) => a,
            Err(e) => {
                self.log_fatal(&e);
                return Err(e.into());
            }
        };
        tracing::debug!(target: "estab::sim", year = %now, pairs = work.len(), "assessed");

        // ── Phase 4: fold (consume) ───────────────────────────────────────
        //
        // Single-threaded and in work-list order, so every accumulator cell
        // receives its seven sums and its count together, and floating-point
        // sums are identical with or without the `parallel` feature.
        let n_species = species.len();
        // `prepare_year` may have added sites.
        self.probabilities.resize(self.sites.count * n_species, 0.0);
        self.probabilities.fill(0.0);
        for (&(site, sp), assessment) in work.iter().zip(&assessments) {
            self.model.record(assessment)?;
            self.probabilities[site.index() * n_species + sp.index()] = assessment.probability;
        }

        Ok(work.len())
    }

    /// Fetch one climate record per region that has at least one active site.
    fn gather_climate(&self, year: Year) -> SimResult<ClimateIndex> {
        let mut climates = ClimateIndex::default();
        for site in self.sites.active_sites() {
            let region = self.sites.region[site.index()];
            if climates.contains_key(&region) {
                continue;
            }
            let climate = self
                .source
                .annual_climate(region, year)
                .ok_or_else(|| crate::SimError::MissingClimate {
                    region: self.region_name(region),
                    year,
                })?;
            climates.insert(region, climate);
        }
        Ok(climates)
    }

    /// Assess every (site, species) pair in `work`.
    ///
    /// With the `parallel` Cargo feature this runs on Rayon's pool (the
    /// configured one if `num_threads` was set).
    fn assess_all(
        &self,
        climates: &ClimateIndex,
        work:     &[(SiteId, SpeciesId)],
    ) -> ModelResult<Vec<Assessment>> {
        let model = &self.model;
        let sites = &self.sites;

        // Every active site's region is present in `climates` (phase 2).
        let assess_one = |&(site, species): &(SiteId, SpeciesId)| {
            let state = sites.state(site);
            model.assess(species, &state, &climates[&state.region])
        };

        #[cfg(not(feature = "parallel"))]
        {
            work.iter().map(assess_one).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let run = || -> ModelResult<Vec<Assessment>> {
                work.par_iter().map(&assess_one).collect()
            };
            match &self.pool {
                Some(pool) => pool.install(run),
                None => run(),
            }
        }
    }

    fn region_name(&self, region: RegionId) -> String {
        self.model
            .regions()
            .get(region)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| region.to_string())
    }

    fn log_fatal(&self, err: &ModelError) {
        if let ModelError::TooFewGrowingDays { region, year, begin_growing, end_growing } = err {
            tracing::error!(
                target: "estab::sim",
                region = %self.region_name(*region),
                year = %year,
                begin_growing,
                end_growing,
                "too few growing days; climate data must be corrected before the run can continue"
            );
        }
    }
}
