//! Simulation observer trait for progress reporting and log collection.

use estab_core::Year;
use estab_model::EstablishmentRecord;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// yearly loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called at the very start of each year, before site state is refreshed.
    fn on_year_start(&mut self, _year: Year) {}

    /// Called after the year's establishment log has been built.
    ///
    /// `records` holds one entry per (species, active region) that was
    /// evaluated this year; the accumulator has already been reset.
    fn on_report(&mut self, _year: Year, _records: &[EstablishmentRecord]) {}

    /// Called at the end of each year.  `evaluated` is the number of
    /// (site, species) pairs evaluated.
    fn on_year_end(&mut self, _year: Year, _evaluated: usize) {}

    /// Called once after the final year completes.
    fn on_sim_end(&mut self, _final_year: Year) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Collects every record in memory.  Handy for tests and small runs.
#[derive(Default)]
pub struct CollectingObserver {
    pub records: Vec<EstablishmentRecord>,
}

impl SimObserver for CollectingObserver {
    fn on_report(&mut self, _year: Year, records: &[EstablishmentRecord]) {
        self.records.extend_from_slice(records);
    }
}
