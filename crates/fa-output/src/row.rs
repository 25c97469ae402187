//! Plain data row types written by output backends.

/// Aggregate statistics for one simulation tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummaryRow {
    pub tick:               u64,
    pub flood:              bool,
    pub adopted_households: u32,
    pub adoption_rate:      f64,
    /// Cumulative adopter count per measure, indexed by `MeasureId`.
    pub measure_counts:     Vec<u32>,
    pub mean_damage:        f64,
    pub median_damage:      f64,
    pub mean_savings:       f64,
    pub median_savings:     f64,
}

impl TickSummaryRow {
    /// `measure_counts` rendered as a `;`-separated list for flat backends.
    pub fn measure_counts_field(&self) -> String {
        self.measure_counts
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// End-of-run state of one household.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdFinalRow {
    pub agent_id:         u32,
    pub x:                f64,
    pub y:                f64,
    pub income:           f64,
    pub risk_aversion:    f64,
    pub savings:          f64,
    pub depth_estimated:  f64,
    pub damage_estimated: f64,
    /// Adopted measure indices as a `;`-separated list; empty if none.
    pub adopted_measures: String,
    /// Tick of first adoption; `-1` if the household never adopted.
    pub adopted_at:       i64,
    /// Total monetary damage over the whole run.
    pub total_damage:     f64,
}
