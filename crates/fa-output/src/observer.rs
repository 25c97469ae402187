//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use fa_agent::HouseholdStore;
use fa_core::{MeasureId, Tick};
use fa_sim::{SimObserver, TickSummary};

use crate::row::{HouseholdFinalRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes tick summaries and the end-of-run household
/// table to any [`OutputWriter`] backend (CSV, SQLite, …).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

fn household_rows(households: &HouseholdStore) -> Vec<HouseholdFinalRow> {
    households
        .agent_ids()
        .map(|agent| {
            let i = agent.index();
            let adopted_measures = (0..households.measure_count)
                .filter(|&m| households.has_adopted(agent, MeasureId(m as u16)))
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(";");
            HouseholdFinalRow {
                agent_id:         agent.0,
                x:                households.location[i].x,
                y:                households.location[i].y,
                income:           households.income[i],
                risk_aversion:    households.risk_aversion[i],
                savings:          households.savings[i],
                depth_estimated:  households.depth_estimated[i],
                damage_estimated: households.damage_estimated[i],
                adopted_measures,
                adopted_at:       households.adopted_at[i].map_or(-1, |t| t.0 as i64),
                total_damage:     households.damage_history[i].iter().sum(),
            }
        })
        .collect()
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        let row = TickSummaryRow {
            tick:               tick.0,
            flood:              summary.flood,
            adopted_households: summary.adopted_households,
            adoption_rate:      summary.adoption_rate,
            measure_counts:     summary.measure_counts.clone(),
            mean_damage:        summary.mean_damage,
            median_damage:      summary.median_damage,
            mean_savings:       summary.mean_savings,
            median_savings:     summary.median_savings,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, households: &HouseholdStore, _series: &[TickSummary]) {
        let rows = household_rows(households);
        if !rows.is_empty() {
            let result = self.writer.write_households(&rows);
            self.store_err(result);
        }
        let result = self.writer.finish();
        self.store_err(result);
    }
}
