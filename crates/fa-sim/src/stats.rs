//! Per-tick aggregate statistics.

use fa_agent::HouseholdStore;
use fa_core::Tick;

/// Population-level summary recorded at the end of every tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSummary {
    pub tick: Tick,

    /// Whether a flood event occurred this tick.
    pub flood: bool,

    /// Households that have adopted at least one measure, cumulative.
    pub adopted_households: u32,

    /// `adopted_households / population`, in [0, 1].
    pub adoption_rate: f64,

    /// Cumulative adopter count per measure, indexed by `MeasureId`.
    pub measure_counts: Vec<u32>,

    /// Monetary damage realized this tick (0 on dry ticks).
    pub mean_damage:   f64,
    pub median_damage: f64,

    /// Savings after this tick's accrual, damage, and adoptions.
    pub mean_savings:   f64,
    pub median_savings: f64,
}

impl TickSummary {
    /// Compute the summary from the post-tick household state.  Relies on
    /// `damage_history` holding exactly one entry per elapsed tick, so the
    /// last entry is this tick's realized damage.
    pub fn compute(tick: Tick, flood: bool, households: &HouseholdStore) -> Self {
        let damages: Vec<f64> = households
            .damage_history
            .iter()
            .map(|h| h.last().copied().unwrap_or(0.0))
            .collect();

        let measure_counts = (0..households.measure_count)
            .map(|m| {
                households.adopted.iter().filter(|&&mask| mask & (1 << m) != 0).count() as u32
            })
            .collect();

        let adopted_households =
            households.adopted.iter().filter(|&&mask| mask != 0).count() as u32;

        Self {
            tick,
            flood,
            adopted_households,
            adoption_rate: households.adoption_rate(),
            measure_counts,
            mean_damage: mean(&damages),
            median_damage: median(&damages),
            mean_savings: mean(&households.savings),
            median_savings: median(&households.savings),
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median with the usual midpoint rule for even lengths.  NaN-free inputs are
/// an engine invariant, so a total-order sort on partial_cmp is safe.
fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
