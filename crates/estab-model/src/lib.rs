//! `estab-model` — the seedling establishment-probability engine.
//!
//! # Pipeline per (species, site)
//!
//! ```text
//!   ① Suitability   — soil moisture (can fail fatally), growing-degree-day
//!                     parabola, January-temperature gate; each in [0, 1]
//!   ② Combine       — min of the three (Liebig's law of the minimum)
//!   ③ Terrain       — × base adjustment, reduced by slope while the site's
//!                     living biomass is below the recovery threshold
//!   ④ Accumulate    — fold all measurements into the (species, region) cell
//! ```
//!
//! Once per year, [`EstablishmentModel::flush_and_report`] turns the cells
//! into [`EstablishmentRecord`]s and zeroes the accumulator.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut model = EstablishmentModel::new(species, regions, params)?;
//! for site in sites.active_sites() {
//!     let state = sites.state(site);
//!     let climate = climate_table.get(state.region, year).unwrap();
//!     for (sp, _) in model.species().iter() {
//!         let p = model.evaluate(sp, &state, climate)?;
//!     }
//! }
//! let log = model.flush_and_report(year);
//! ```

pub mod combine;
pub mod error;
pub mod evaluator;
pub mod report;
pub mod stats;
pub mod suitability;


pub use combine::{TerrainRegime, limiting_factor, terrain_adjustment};
pub use error::{ModelError, ModelResult};
pub use evaluator::{Assessment, EstablishmentModel};
pub use report::EstablishmentRecord;
pub use stats::{CellMeans, CellSums, EstablishmentStats};
pub use suitability::{degree_day_multiplier, january_temp_multiplier, soil_moisture_multiplier};
