//! `estab-input` — reference data consumed by the establishment engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`species`]   | `SpeciesParams`, `SpeciesTable`                           |
//! | [`region`]    | `Region`, `RegionTable`, `AnnualClimate`, `ClimateTable`  |
//! | [`site`]      | `SiteStore` (SoA), `SiteState`, `Cohort`, `living_biomass`|
//! | [`tolerance`] | `SufficientLight`, `WetnessTolerance` lookup tables       |
//! | [`loader`]    | `load_*_csv`, `load_*_reader`                             |
//! | [`error`]     | `InputError`, `InputResult<T>`                            |
//!
//! Registries hand out dense typed ids (`SpeciesId`, `RegionId`, `SiteId`)
//! and keep a name → id table, so nothing downstream depends on externally
//! assigned indices.

pub mod error;
pub mod loader;
pub mod region;
pub mod site;
pub mod species;
pub mod tolerance;

#[cfg(test)]
mod tests;

pub use error::{InputError, InputResult};
pub use loader::{
    load_climate_csv, load_climate_reader, load_regions_csv, load_regions_reader,
    load_sites_csv, load_sites_reader, load_species_csv, load_species_reader,
    load_sufficient_light_csv, load_sufficient_light_reader, load_wetness_csv,
    load_wetness_reader,
};
pub use region::{AnnualClimate, ClimateTable, Region, RegionTable};
pub use site::{Cohort, SiteState, SiteStore, living_biomass};
pub use species::{SpeciesParams, SpeciesTable};
pub use tolerance::{SufficientLight, SufficientLightTable, WetnessTable, WetnessTolerance};
