//! Simulation time model.
//!
//! The establishment engine steps once per simulated year.  A `Year` is the
//! calendar-style label carried on climate records and report rows; the
//! `SimClock` tracks which year the driver is currently processing.

use std::fmt;

// ── Year ──────────────────────────────────────────────────────────────────────

/// A simulation year.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Year(pub u32);

impl Year {
    /// Return the year `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u32) -> Year {
        Year(self.0 + n)
    }

    /// The following year.
    #[inline]
    pub fn next(self) -> Year {
        self.offset(1)
    }
}

impl std::ops::Add<u32> for Year {
    type Output = Year;
    #[inline]
    fn add(self, rhs: u32) -> Year {
        Year(self.0 + rhs)
    }
}

impl std::ops::Sub for Year {
    type Output = u32;
    #[inline]
    fn sub(self, rhs: Year) -> u32 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the year currently being simulated.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// First simulated year.
    pub start_year:   Year,
    /// The current year, advanced by `SimClock::advance()` each iteration.
    pub current_year: Year,
}

impl SimClock {
    pub fn new(start_year: Year) -> Self {
        Self { start_year, current_year: start_year }
    }

    /// Advance the clock by one year.
    #[inline]
    pub fn advance(&mut self) {
        self.current_year = self.current_year.next();
    }

    /// Number of years completed since `start_year`.
    #[inline]
    pub fn elapsed_years(&self) -> u32 {
        self.current_year - self.start_year
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (year {} of run)", self.current_year, self.elapsed_years() + 1)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON scenario file by the application crate and
/// passed to the simulation driver.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// First simulated year (label carried on report rows).
    pub start_year: Year,

    /// Number of years to simulate.
    pub total_years: u32,

    /// Master RNG seed.  Only used by hosts that synthesise input data; the
    /// establishment engine itself is deterministic.
    pub seed: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,
}

impl SimConfig {
    /// The year at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_year(&self) -> Year {
        self.start_year + self.total_years
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_year)
    }
}
