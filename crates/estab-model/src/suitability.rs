//! Environmental suitability functions.
//!
//! Each function maps species tolerances plus regional climate (and, for soil
//! moisture, site state) to a multiplier in `[0, 1]`.  They are pure; only
//! the soil-moisture response can fail, and only on corrupt climate data.

use estab_input::{AnnualClimate, SpeciesParams};

use crate::{ModelError, ModelResult};

/// Concave drought response.
///
/// The species tolerates `max_drought × growing-season length` dry days.
/// Beyond that the multiplier is exactly 0; below it the multiplier is
/// `sqrt((tolerance - dry_days) / tolerance)`.
///
/// # Errors
/// [`ModelError::TooFewGrowingDays`] when the growing season spans fewer than
/// two days.  This is checked before anything else is computed.
pub fn soil_moisture_multiplier(
    climate:  &AnnualClimate,
    species:  &SpeciesParams,
    dry_days: f64,
) -> ModelResult<f64> {
    let grow_days = f64::from(climate.end_growing) - f64::from(climate.begin_growing) + 1.0;
    if grow_days < 2.0 {
        return Err(ModelError::TooFewGrowingDays {
            region:        climate.region,
            year:          climate.year,
            begin_growing: climate.begin_growing,
            end_growing:   climate.end_growing,
        });
    }

    let max_drought = species.max_drought * grow_days;
    if max_drought < dry_days {
        return Ok(0.0);
    }
    Ok(((max_drought - dry_days) / max_drought).sqrt())
}

/// Parabolic growing-degree-day response (Botkin et al. 1972).
///
/// 1.0 at the midpoint of `[gdd_min, gdd_max]`, 0 at both bounds, clamped to
/// 0 outside them.  `gdd_max > gdd_min` is guaranteed by species validation.
pub fn degree_day_multiplier(climate: &AnnualClimate, species: &SpeciesParams) -> f64 {
    let gdd = climate.growing_degree_days;
    let range = species.gdd_max - species.gdd_min;
    let value = 4.0 * (gdd - species.gdd_min) * (species.gdd_max - gdd) / (range * range);
    value.max(0.0)
}

/// Hard winter-cold filter: 1.0 unless January is colder than the species
/// minimum.  A January mean equal to the minimum passes.
pub fn january_temp_multiplier(climate: &AnnualClimate, species: &SpeciesParams) -> f64 {
    if climate.january_temp() < f64::from(species.min_january_temp) {
        0.0
    } else {
        1.0
    }
}
