//! Limiting-factor combination and terrain adjustment.

use estab_core::EstablishParams;

/// Liebig's law of the minimum: establishment is capped by the single most
/// limiting factor, never by an average.
#[inline]
pub fn limiting_factor(soil_moisture: f64, temperature: f64, january: f64) -> f64 {
    soil_moisture.min(temperature).min(january)
}

/// The two terrain-adjustment regimes, selected per evaluation from the
/// site's living biomass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TerrainRegime {
    /// Biomass below `establish_threshold_agb`: slope suppresses
    /// establishment linearly.
    Recovering,
    /// Enough standing biomass that slope no longer matters.
    Recovered,
}

impl TerrainRegime {
    #[inline]
    pub fn classify(living_biomass: f64, params: &EstablishParams) -> Self {
        if living_biomass < params.establish_threshold_agb {
            TerrainRegime::Recovering
        } else {
            TerrainRegime::Recovered
        }
    }

    /// Multiplicative adjustment for this regime.
    ///
    /// `Recovering`: `max(base × (1 + slope / threshold_angle), 0)`.
    /// `Recovered`: `base`.
    #[inline]
    pub fn factor(self, slope_angle: f64, params: &EstablishParams) -> f64 {
        let base = params.base_prob_establish_adjust;
        match self {
            TerrainRegime::Recovering => {
                (base * (1.0 + slope_angle / params.establish_threshold_angle)).max(0.0)
            }
            TerrainRegime::Recovered => base,
        }
    }
}

/// Scale a combined probability by the site's terrain factor.
///
/// Not re-clamped: with validated parameters the result already lies in
/// `[0, combined]`.
#[inline]
pub fn terrain_adjustment(
    combined:       f64,
    living_biomass: f64,
    slope_angle:    f64,
    params:         &EstablishParams,
) -> f64 {
    let regime = TerrainRegime::classify(living_biomass, params);
    combined * regime.factor(slope_angle, params)
}
