use estab_core::{RegionId, SpeciesId, Year};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Corrupt upstream climate: the growing season is shorter than two days.
    /// Fatal for the run; the climate data must be corrected.
    #[error(
        "too few growing days in {region} for {year}: \
         begin_growing = {begin_growing}, end_growing = {end_growing}"
    )]
    TooFewGrowingDays {
        region:        RegionId,
        year:          Year,
        begin_growing: i32,
        end_growing:   i32,
    },

    #[error("{0} is not registered")]
    UnknownSpecies(SpeciesId),

    #[error("{0} is not registered")]
    UnknownRegion(RegionId),

    /// Site state reached the evaluator without passing `SiteStore`
    /// validation (e.g. a column written directly).
    #[error("invalid site state in {region}: {reason}")]
    InvalidSite { region: RegionId, reason: String },

    #[error("site lies in {site_region} but climate was supplied for {climate_region}")]
    ClimateMismatch {
        site_region:    RegionId,
        climate_region: RegionId,
    },

    #[error("invalid establishment parameters: {0}")]
    Params(#[from] estab_core::CoreError),
}

pub type ModelResult<T> = Result<T, ModelError>;
