//! Global establishment-adjustment constants.
//!
//! These three values configure the terrain adjustment applied after the
//! limiting-factor combination.  They are validated once, before any
//! simulation work begins, so that the per-site arithmetic never has to
//! guard against them.

use crate::{CoreError, CoreResult};

/// Terrain-adjustment constants shared by every evaluation in a run.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstablishParams {
    /// Living above-ground biomass (g m⁻²) at or above which slope no longer
    /// suppresses establishment.
    pub establish_threshold_agb: f64,

    /// Baseline scaling applied to every combined probability.  Must lie in
    /// `[0, 1]` so final probabilities never exceed 1.
    pub base_prob_establish_adjust: f64,

    /// Slope angle (degrees) normalisation.  Negative: the adjustment factor
    /// reaches zero when the slope equals `-establish_threshold_angle`.
    pub establish_threshold_angle: f64,
}

impl EstablishParams {
    /// Build and validate a parameter set.
    pub fn new(
        establish_threshold_agb:    f64,
        base_prob_establish_adjust: f64,
        establish_threshold_angle:  f64,
    ) -> CoreResult<Self> {
        let params = Self {
            establish_threshold_agb,
            base_prob_establish_adjust,
            establish_threshold_angle,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every constant.  Called by `new` and by
    /// `EstablishmentModel::new` for parameter sets deserialised directly
    /// from a scenario file.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.establish_threshold_agb.is_finite() || self.establish_threshold_agb < 0.0 {
            return Err(CoreError::InvalidParams {
                name:   "establish_threshold_agb",
                value:  self.establish_threshold_agb,
                reason: "must be a finite, non-negative biomass",
            });
        }
        if !(0.0..=1.0).contains(&self.base_prob_establish_adjust) {
            return Err(CoreError::InvalidParams {
                name:   "base_prob_establish_adjust",
                value:  self.base_prob_establish_adjust,
                reason: "must lie in [0, 1] or probabilities can exceed 1",
            });
        }
        if !self.establish_threshold_angle.is_finite() || self.establish_threshold_angle >= 0.0 {
            return Err(CoreError::InvalidParams {
                name:   "establish_threshold_angle",
                value:  self.establish_threshold_angle,
                reason: "must be finite and negative so steeper slopes reduce establishment",
            });
        }
        Ok(())
    }
}
