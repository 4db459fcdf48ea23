//! Germination tolerance lookup tables.
//!
//! These are reference data for the light and soil-wetness parts of the
//! wider succession model.  The establishment engine does not read them; they
//! are validated and loaded here alongside the rest of the species inputs.

use crate::{InputError, InputResult};

/// Highest shade class.
pub const MAX_SHADE_CLASS: u8 = 5;

/// Highest soil-wetness class.
pub const MAX_MOISTURE_CLASS: u8 = 3;

fn check_probability(table: &'static str, class: u8, p: f64) -> InputResult<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(InputError::InvalidTolerance {
            table,
            class,
            reason: format!("probability {p} must lie in [0, 1]"),
        })
    }
}

// ── Sufficient light ──────────────────────────────────────────────────────────

/// Germination probability for one shade-tolerance class under each of the
/// six site light levels (0 = full sun … 5 = deepest shade).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SufficientLight {
    shade_class:   u8,
    probabilities: [f64; 6],
}

impl SufficientLight {
    pub fn new(shade_class: u8, probabilities: [f64; 6]) -> InputResult<Self> {
        if !(1..=MAX_SHADE_CLASS).contains(&shade_class) {
            return Err(InputError::InvalidTolerance {
                table:  "sufficient light",
                class:  shade_class,
                reason: format!("shade class must be between 1 and {MAX_SHADE_CLASS}"),
            });
        }
        for &p in &probabilities {
            check_probability("sufficient light", shade_class, p)?;
        }
        Ok(Self { shade_class, probabilities })
    }

    pub fn shade_class(&self) -> u8 {
        self.shade_class
    }

    /// Probability at `light_level`, or `None` above level 5.
    pub fn probability(&self, light_level: u8) -> Option<f64> {
        self.probabilities.get(light_level as usize).copied()
    }
}

/// One [`SufficientLight`] row per shade class.
#[derive(Clone, Debug, Default)]
pub struct SufficientLightTable {
    rows: [Option<SufficientLight>; MAX_SHADE_CLASS as usize],
}

impl SufficientLightTable {
    /// Build from rows; each shade class may appear at most once.
    pub fn from_rows(rows: impl IntoIterator<Item = SufficientLight>) -> InputResult<Self> {
        let mut table = Self::default();
        for row in rows {
            let slot = &mut table.rows[row.shade_class as usize - 1];
            if slot.is_some() {
                return Err(InputError::InvalidTolerance {
                    table:  "sufficient light",
                    class:  row.shade_class,
                    reason: "shade class listed twice".into(),
                });
            }
            *slot = Some(row);
        }
        Ok(table)
    }

    pub fn get(&self, shade_class: u8) -> Option<&SufficientLight> {
        let i = (shade_class as usize).checked_sub(1)?;
        self.rows.get(i)?.as_ref()
    }

    /// Shortcut for `get(shade_class)?.probability(light_level)`.
    pub fn probability(&self, shade_class: u8, light_level: u8) -> Option<f64> {
        self.get(shade_class)?.probability(light_level)
    }
}

// ── Wetness ───────────────────────────────────────────────────────────────────

/// Germination probability for one soil-wetness tolerance class under each of
/// the three site moisture levels (1 = dry … 3 = saturated).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WetnessTolerance {
    moisture_class: u8,
    probabilities:  [f64; 3],
}

impl WetnessTolerance {
    pub fn new(moisture_class: u8, probabilities: [f64; 3]) -> InputResult<Self> {
        if !(1..=MAX_MOISTURE_CLASS).contains(&moisture_class) {
            return Err(InputError::InvalidTolerance {
                table:  "wetness",
                class:  moisture_class,
                reason: format!("moisture class must be between 1 and {MAX_MOISTURE_CLASS}"),
            });
        }
        for &p in &probabilities {
            check_probability("wetness", moisture_class, p)?;
        }
        Ok(Self { moisture_class, probabilities })
    }

    pub fn moisture_class(&self) -> u8 {
        self.moisture_class
    }

    /// Probability at moisture level 1..=3, or `None` outside that range.
    pub fn probability(&self, moisture_level: u8) -> Option<f64> {
        let i = (moisture_level as usize).checked_sub(1)?;
        self.probabilities.get(i).copied()
    }
}

/// One [`WetnessTolerance`] row per moisture class.
#[derive(Clone, Debug, Default)]
pub struct WetnessTable {
    rows: [Option<WetnessTolerance>; MAX_MOISTURE_CLASS as usize],
}

impl WetnessTable {
    pub fn from_rows(rows: impl IntoIterator<Item = WetnessTolerance>) -> InputResult<Self> {
        let mut table = Self::default();
        for row in rows {
            let slot = &mut table.rows[row.moisture_class as usize - 1];
            if slot.is_some() {
                return Err(InputError::InvalidTolerance {
                    table:  "wetness",
                    class:  row.moisture_class,
                    reason: "moisture class listed twice".into(),
                });
            }
            *slot = Some(row);
        }
        Ok(table)
    }

    pub fn get(&self, moisture_class: u8) -> Option<&WetnessTolerance> {
        let i = (moisture_class as usize).checked_sub(1)?;
        self.rows.get(i)?.as_ref()
    }
}
