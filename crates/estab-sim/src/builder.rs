//! Fluent builder for constructing a [`Sim`].

use estab_core::SimConfig;
use estab_input::SiteStore;
use estab_model::EstablishmentModel;

use crate::{EnvironmentSource, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<E>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: start year, total years, thread count, …
/// - [`EstablishmentModel`]: species, regions, and terrain parameters
/// - `E: EnvironmentSource`: annual climate (and optionally site dynamics)
///
/// # Optional inputs (have defaults)
///
/// | Method       | Default                  |
/// |--------------|--------------------------|
/// | `.sites(s)`  | Empty `SiteStore`        |
///
/// # Example
///
/// ```rust,ignore
/// let model = EstablishmentModel::new(species, regions, params)?;
/// let mut sim = SimBuilder::new(config, model, climate_table)
///     .sites(sites)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<E: EnvironmentSource> {
    config: SimConfig,
    model:  EstablishmentModel,
    sites:  Option<SiteStore>,
    source: E,
}

impl<E: EnvironmentSource> SimBuilder<E> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, model: EstablishmentModel, source: E) -> Self {
        Self { config, model, sites: None, source }
    }

    /// Supply the sites to evaluate each year.
    pub fn sites(mut self, sites: SiteStore) -> Self {
        self.sites = Some(sites);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<E>> {
        if self.config.num_threads == Some(0) {
            return Err(SimError::Config("num_threads must be at least 1".into()));
        }

        let sites = self.sites.unwrap_or_default();

        // ── Every site must belong to a registered region ─────────────────
        let region_count = self.model.regions().len();
        if let Some((i, region)) = sites
            .region
            .iter()
            .enumerate()
            .find(|(_, r)| r.index() >= region_count)
        {
            return Err(SimError::Config(format!(
                "site {i} references unregistered {region}"
            )));
        }

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::Config(format!("thread pool: {e}")))?,
            ),
            None => None,
        };

        let probabilities = vec![0.0; sites.count * self.model.species().len()];

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            model: self.model,
            sites,
            source: self.source,
            probabilities,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
