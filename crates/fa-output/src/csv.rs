//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_summaries.csv` (one row per tick)
//! - `household_final.csv` (one row per household, written at run end)

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{HouseholdFinalRow, OutputResult, TickSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    summaries:  Writer<File>,
    households: Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "flood",
            "adopted_households",
            "adoption_rate",
            "measure_counts",
            "mean_damage",
            "median_damage",
            "mean_savings",
            "median_savings",
        ])?;

        let mut households = Writer::from_path(dir.join("household_final.csv"))?;
        households.write_record([
            "agent_id",
            "x",
            "y",
            "income",
            "risk_aversion",
            "savings",
            "depth_estimated",
            "damage_estimated",
            "adopted_measures",
            "adopted_at",
            "total_damage",
        ])?;

        Ok(Self {
            summaries,
            households,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            (row.flood as u8).to_string(),
            row.adopted_households.to_string(),
            row.adoption_rate.to_string(),
            row.measure_counts_field(),
            row.mean_damage.to_string(),
            row.median_damage.to_string(),
            row.mean_savings.to_string(),
            row.median_savings.to_string(),
        ])?;
        Ok(())
    }

    fn write_households(&mut self, rows: &[HouseholdFinalRow]) -> OutputResult<()> {
        for row in rows {
            self.households.write_record(&[
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.income.to_string(),
                row.risk_aversion.to_string(),
                row.savings.to_string(),
                row.depth_estimated.to_string(),
                row.damage_estimated.to_string(),
                row.adopted_measures.clone(),
                row.adopted_at.to_string(),
                row.total_damage.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.households.flush()?;
        Ok(())
    }
}
