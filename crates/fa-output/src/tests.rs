//! Integration tests for fa-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{HouseholdFinalRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            flood: tick == 5,
            adopted_households: tick as u32,
            adoption_rate: tick as f64 / 100.0,
            measure_counts: vec![tick as u32, 0],
            mean_damage: 0.0,
            median_damage: 0.0,
            mean_savings: 1_000.0,
            median_savings: 1_000.0,
        }
    }

    fn household_row(agent_id: u32) -> HouseholdFinalRow {
        HouseholdFinalRow {
            agent_id,
            x: 10.0,
            y: 20.0,
            income: 1_000.0,
            risk_aversion: 1.0,
            savings: 5_000.0,
            depth_estimated: 1.5,
            damage_estimated: 0.7,
            adopted_measures: "0;2".to_string(),
            adopted_at: 5,
            total_damage: 800.0,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("household_final.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            [
                "tick",
                "flood",
                "adopted_households",
                "adoption_rate",
                "measure_counts",
                "mean_damage",
                "median_damage",
                "mean_savings",
                "median_savings"
            ]
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join("household_final.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers2,
            [
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
                "total_damage"
            ]
        );
    }

    #[test]
    fn csv_tick_summary_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(5)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "5"); // tick
        assert_eq!(&rows[0][1], "1"); // flood
        assert_eq!(&rows[0][4], "5;0"); // measure_counts
    }

    #[test]
    fn csv_household_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_households(&[household_row(0), household_row(1)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("household_final.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "0"); // agent_id
        assert_eq!(&rows[0][8], "0;2"); // adopted_measures
        assert_eq!(&rows[1][0], "1");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn csv_empty_household_batch_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_households(&[]).unwrap(); // should return Ok(())
    }

    #[test]
    fn integration_csv() {
        use fa_core::MapBounds;
        use fa_hazard::UniformDepth;
        use fa_network::NetworkTopology;
        use fa_sim::{
            HazardConfig, MeasureConfig, PopulationConfig, RiskAversionConfig, SimBuilder,
            SimConfig,
        };

        use crate::observer::SimOutputObserver;

        let config = SimConfig {
            total_ticks: 6,
            seed: 1,
            social_weight: 0.2,
            risk_perception_gain: 1.0,
            population: PopulationConfig {
                size: 3,
                bounds: MapBounds::new(0.0, 0.0, 100.0, 100.0),
                income_range: (900.0, 1_100.0),
                initial_savings_multiple: (8.0, 12.0),
                saving_rate: 0.3,
                base_flood_probability: 0.0,
                risk_aversion: RiskAversionConfig { mean: 1.0, std_dev: 0.2, min: 0.5, max: 2.0 },
                turnover: None,
            },
            network: NetworkTopology::NoNetwork,
            measures: vec![MeasureConfig {
                name: "elevation".to_string(),
                cost_range: (100.0, 200.0),
                effectiveness: 1.0,
            }],
            hazard: HazardConfig::Stochastic {
                probability_per_tick: 0.0,
                multiplier_min: 0.5,
                multiplier_max: 1.2,
            },
            damage_curve: None,
        };

        let mut sim = SimBuilder::new(config, UniformDepth(1.0)).build().unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 6, "one summary row per tick");

        let mut rdr2 = csv::Reader::from_path(dir.path().join("household_final.csv")).unwrap();
        let rows2: Vec<_> = rdr2.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows2.len(), 3, "one final row per household");
        // never adopted under zero flood risk
        assert_eq!(&rows2[0][9], "-1");
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::row::{HouseholdFinalRow, TickSummaryRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick: 7,
            flood: true,
            adopted_households: 42,
            adoption_rate: 0.42,
            measure_counts: vec![40, 2],
            mean_damage: 310.5,
            median_damage: 280.0,
            mean_savings: 9_000.0,
            median_savings: 8_500.0,
        })
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (flood, adopted, counts): (i64, i64, String) = conn
            .query_row(
                "SELECT flood, adopted_households, measure_counts FROM tick_summaries WHERE tick = 7",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(flood, 1);
        assert_eq!(adopted, 42);
        assert_eq!(counts, "40;2");
    }

    #[test]
    fn sqlite_household_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let rows: Vec<HouseholdFinalRow> = (0..3)
            .map(|agent_id| HouseholdFinalRow {
                agent_id,
                x: 1.0,
                y: 2.0,
                income: 1_000.0,
                risk_aversion: 1.0,
                savings: 5_000.0,
                depth_estimated: 1.0,
                damage_estimated: 0.65,
                adopted_measures: String::new(),
                adopted_at: -1,
                total_damage: 0.0,
            })
            .collect();
        w.write_households(&rows).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM household_final", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_never_adopted_stored_as_minus_one() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_households(&[HouseholdFinalRow {
            agent_id: 0,
            x: 0.0,
            y: 0.0,
            income: 1_000.0,
            risk_aversion: 1.0,
            savings: 5_000.0,
            depth_estimated: 0.0,
            damage_estimated: 0.0,
            adopted_measures: String::new(),
            adopted_at: -1,
            total_damage: 0.0,
        }])
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let val: i64 = conn
            .query_row("SELECT adopted_at FROM household_final WHERE agent_id = 0", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(val, -1);
    }
}
