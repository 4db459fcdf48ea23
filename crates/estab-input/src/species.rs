//! Species reference parameters and the species registry.

use std::collections::HashMap;

use estab_core::SpeciesId;

use crate::{InputError, InputResult};

/// Static establishment tolerances for one species.
///
/// Construct freely, but only a [`SpeciesTable`] hands out [`SpeciesId`]s,
/// and it refuses parameter sets that fail [`validate`][Self::validate].
#[derive(Clone, Debug, PartialEq)]
pub struct SpeciesParams {
    pub name: String,
    /// Fraction of the growing season the species tolerates as dry days.
    pub max_drought: f64,
    /// Lower growing-degree-day bound; the GDD response is 0 here.
    pub gdd_min: f64,
    /// Upper growing-degree-day bound; the GDD response is 0 here.
    pub gdd_max: f64,
    /// Coldest January mean temperature (°C) the species tolerates.
    pub min_january_temp: i32,
}

impl SpeciesParams {
    /// Reject parameter sets the suitability functions cannot evaluate.
    ///
    /// `gdd_max <= gdd_min` would divide by zero (or flip the parabola) in
    /// the degree-day response, and a non-positive drought tolerance leaves
    /// the soil-moisture response undefined.
    pub fn validate(&self) -> InputResult<()> {
        let fail = |reason: String| InputError::InvalidSpecies {
            name: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(fail("name must not be empty".into()));
        }
        if !self.max_drought.is_finite() || self.max_drought <= 0.0 {
            return Err(fail(format!("max_drought {} must be positive", self.max_drought)));
        }
        if !self.gdd_min.is_finite() || !self.gdd_max.is_finite() {
            return Err(fail("growing-degree-day bounds must be finite".into()));
        }
        if self.gdd_max <= self.gdd_min {
            return Err(fail(format!(
                "gdd_max {} must exceed gdd_min {}",
                self.gdd_max, self.gdd_min
            )));
        }
        Ok(())
    }
}

/// Registry of validated species, indexed by [`SpeciesId`].
#[derive(Clone, Debug, Default)]
pub struct SpeciesTable {
    species: Vec<SpeciesParams>,
    by_name: HashMap<String, SpeciesId>,
}

impl SpeciesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `params` and register it under the next free id.
    pub fn insert(&mut self, params: SpeciesParams) -> InputResult<SpeciesId> {
        params.validate()?;
        if self.by_name.contains_key(&params.name) {
            return Err(InputError::DuplicateName { kind: "species", name: params.name });
        }
        let id = SpeciesId::try_from(self.species.len())
            .map_err(|_| InputError::Parse("too many species for a u16 id".into()))?;
        self.by_name.insert(params.name.clone(), id);
        self.species.push(params);
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: SpeciesId) -> Option<&SpeciesParams> {
        self.species.get(id.index())
    }

    pub fn id_of(&self, name: &str) -> Option<SpeciesId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// All species in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, &SpeciesParams)> {
        self.species
            .iter()
            .enumerate()
            .map(|(i, p)| (SpeciesId(i as u16), p))
    }
}
