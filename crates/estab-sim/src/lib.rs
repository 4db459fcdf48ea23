//! `estab-sim` — yearly driver for the estab engine.
//!
//! # Yearly loop
//!
//! ```text
//! for year in start_year..start_year + total_years:
//!   ① Prepare  — EnvironmentSource::prepare_year refreshes dry days,
//!                slope, and living biomass.
//!   ② Climate  — fetch one AnnualClimate per region with an active site;
//!                a missing record aborts the run.
//!   ③ Assess   — every (active site, species) pair through the evaluator
//!                (parallel with the `parallel` feature).
//!   ④ Fold     — in ascending (site, species) order, add each assessment
//!                to the accumulator and store its probability.
//!   ⑤ Report   — flush the accumulator into the year's establishment log
//!                and hand it to SimObserver::on_report.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the assess phase on Rayon's thread pool.          |
//! | `fx-hash`  | Uses FxHash for the per-year region → climate index.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use estab_core::{EstablishParams, SimConfig, Year};
//! use estab_model::EstablishmentModel;
//! use estab_sim::{CollectingObserver, SimBuilder};
//!
//! let model = EstablishmentModel::new(species, regions, params)?;
//! let mut sim = SimBuilder::new(config, model, climate_table)
//!     .sites(sites)
//!     .build()?;
//! let mut log = CollectingObserver::default();
//! sim.run(&mut log)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod source;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{CollectingObserver, NoopObserver, SimObserver};
pub use sim::Sim;
pub use source::EnvironmentSource;
