//! Observer hooks for instrumenting a run without touching the tick loop.

use fa_agent::HouseholdStore;
use fa_core::Tick;

use crate::stats::TickSummary;

/// Callbacks invoked by [`Sim::run`](crate::Sim::run).
///
/// All methods have no-op defaults, so an observer implements only what it
/// needs.  Observers must not panic; writers that can fail should buffer
/// their first error internally and expose it after the run.
pub trait SimObserver {
    /// Called before any agent acts at `tick`.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the aggregates phase with the tick's summary.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called once after the final tick with the end-of-run household state
    /// and the full summary series.
    fn on_run_end(&mut self, _households: &HouseholdStore, _series: &[TickSummary]) {}
}

/// The do-nothing observer, for runs that only inspect `Sim` state afterward.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
