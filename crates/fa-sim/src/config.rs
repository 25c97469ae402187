//! Run configuration.
//!
//! `SimConfig` is plain data: everything needed to reproduce a run except the
//! depth provider (which wraps external spatial data and is passed to
//! [`SimBuilder`](crate::SimBuilder) separately).  Validation is fail-fast —
//! [`SimConfig::validate`] names the first offending parameter instead of
//! letting a bad value surface as a NaN forty ticks in.

use fa_core::{FaError, FaResult, MapBounds};
use fa_network::NetworkTopology;

// ── RiskAversionConfig ────────────────────────────────────────────────────────

/// Truncated-normal parameters for the population's CRRA coefficient ρ.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskAversionConfig {
    pub mean:    f64,
    pub std_dev: f64,
    pub min:     f64,
    pub max:     f64,
}

impl RiskAversionConfig {
    fn validate(&self) -> FaResult<()> {
        if !(self.mean.is_finite() && self.std_dev.is_finite()) || self.std_dev < 0.0 {
            return Err(FaError::invalid(
                "risk_aversion",
                format!("need finite mean and std_dev >= 0, got ({}, {})", self.mean, self.std_dev),
            ));
        }
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(FaError::invalid(
                "risk_aversion",
                format!("need finite min <= max, got [{}, {}]", self.min, self.max),
            ));
        }
        Ok(())
    }
}

// ── TurnoverConfig ────────────────────────────────────────────────────────────

/// Demographic turnover: occupants age every tick and, once they reach
/// `turnover_age`, are replaced by new occupants with a freshly sampled age,
/// income and savings.  The house itself keeps its location, beliefs,
/// adopted measures and damage history.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnoverConfig {
    /// Occupant age sampled uniformly from `[min, max]`, both at build time
    /// and when new occupants move in.
    pub age_range: (f64, f64),

    /// Years added per tick (0.25 for quarterly ticks).
    pub aging_per_tick: f64,

    /// Age at which the occupants move out.  Must exceed the upper bound of
    /// `age_range` or every household would turn over every tick.
    pub turnover_age: f64,
}

impl TurnoverConfig {
    fn validate(&self) -> FaResult<()> {
        validate_range("turnover.age_range", self.age_range, 0.0)?;
        if !self.aging_per_tick.is_finite() || self.aging_per_tick <= 0.0 {
            return Err(FaError::invalid(
                "turnover.aging_per_tick",
                format!("must be finite and > 0, got {}", self.aging_per_tick),
            ));
        }
        if !self.turnover_age.is_finite() || self.turnover_age <= self.age_range.1 {
            return Err(FaError::invalid(
                "turnover.turnover_age",
                format!(
                    "must exceed the age range's upper bound {}, got {}",
                    self.age_range.1, self.turnover_age
                ),
            ));
        }
        Ok(())
    }
}

// ── PopulationConfig ──────────────────────────────────────────────────────────

/// How the household population is sampled at build time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationConfig {
    /// Number of households.
    pub size: usize,

    /// Rectangle from which home locations are sampled uniformly.
    pub bounds: MapBounds,

    /// Per-tick income, sampled uniformly from `[min, max]`.
    pub income_range: (f64, f64),

    /// Initial savings as a multiple of the sampled income, uniform in
    /// `[min, max]`.
    pub initial_savings_multiple: (f64, f64),

    /// Fraction of income saved each tick, in [0, 1].
    pub saving_rate: f64,

    /// Every household's initial perceived per-tick flood probability.
    pub base_flood_probability: f64,

    pub risk_aversion: RiskAversionConfig,

    /// Demographic turnover rule; `None` keeps the population fixed.
    pub turnover: Option<TurnoverConfig>,
}

impl PopulationConfig {
    fn validate(&self) -> FaResult<()> {
        if self.size == 0 {
            return Err(FaError::invalid("population.size", "must be at least 1".to_string()));
        }
        if !self.bounds.is_valid() {
            return Err(FaError::invalid(
                "population.bounds",
                format!("degenerate bounds {:?}", self.bounds),
            ));
        }
        validate_range("population.income_range", self.income_range, 0.0)?;
        validate_range("population.initial_savings_multiple", self.initial_savings_multiple, 0.0)?;
        if !(0.0..=1.0).contains(&self.saving_rate) || self.saving_rate.is_nan() {
            return Err(FaError::invalid(
                "population.saving_rate",
                format!("must be in [0, 1], got {}", self.saving_rate),
            ));
        }
        if !(0.0..=1.0).contains(&self.base_flood_probability) || self.base_flood_probability.is_nan() {
            return Err(FaError::invalid(
                "population.base_flood_probability",
                format!("must be in [0, 1], got {}", self.base_flood_probability),
            ));
        }
        self.risk_aversion.validate()?;
        if let Some(turnover) = &self.turnover {
            turnover.validate()?;
        }
        Ok(())
    }
}

// ── MeasureConfig ─────────────────────────────────────────────────────────────

/// One adaptation measure in the run's measure table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasureConfig {
    pub name: String,

    /// Agent-specific up-front cost, sampled uniformly from `[min, max]`.
    pub cost_range: (f64, f64),

    /// Fraction of flood damage the measure removes, in [0, 1].
    pub effectiveness: f64,
}

impl MeasureConfig {
    fn validate(&self) -> FaResult<()> {
        validate_range("measure.cost_range", self.cost_range, 0.0)?;
        if !(0.0..=1.0).contains(&self.effectiveness) || self.effectiveness.is_nan() {
            return Err(FaError::invalid(
                "measure.effectiveness",
                format!("must be in [0, 1], got {} ({})", self.effectiveness, self.name),
            ));
        }
        Ok(())
    }
}

// ── HazardConfig ──────────────────────────────────────────────────────────────

/// Which flood event process drives the run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HazardConfig {
    /// Replay a fixed scenario: floods at exactly these ticks.
    Scripted { events: Vec<ScriptedEventConfig> },

    /// Seeded Bernoulli process: each tick floods independently.
    Stochastic {
        probability_per_tick: f64,
        multiplier_min:       f64,
        multiplier_max:       f64,
    },
}

/// One scripted flood: the tick it lands on and the per-household depth
/// multiplier range.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptedEventConfig {
    pub tick:           u64,
    pub multiplier_min: f64,
    pub multiplier_max: f64,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Complete run configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Run length in ticks; the run covers ticks `0..total_ticks`.
    pub total_ticks: u64,

    /// Master seed.  Every random stream in the run derives from it.
    pub seed: u64,

    /// Weight of the neighbor adoption signal on perceived probability.
    pub social_weight: f64,

    /// How strongly realized damage raises perceived flood probability:
    /// after a flood, `p += risk_perception_gain × damage_fraction`
    /// (clamped to [0, 1]).  Zero keeps beliefs static.
    pub risk_perception_gain: f64,

    pub population: PopulationConfig,

    /// Social network topology, built once at init.
    pub network: NetworkTopology,

    /// The measure table.  `MeasureId(k)` refers to `measures[k]`; at most
    /// 32 entries.
    pub measures: Vec<MeasureConfig>,

    pub hazard: HazardConfig,

    /// Depth-damage curve knots `(depth_m, fraction)`.  `None` selects the
    /// built-in Huizinga curve.
    pub damage_curve: Option<Vec<(f64, f64)>>,
}

impl SimConfig {
    /// Fail-fast validation of every field, run before anything is built.
    pub fn validate(&self) -> FaResult<()> {
        if self.total_ticks == 0 {
            return Err(FaError::invalid("total_ticks", "must be at least 1".to_string()));
        }
        if !self.social_weight.is_finite() || self.social_weight < 0.0 {
            return Err(FaError::invalid(
                "social_weight",
                format!("must be finite and >= 0, got {}", self.social_weight),
            ));
        }
        if !self.risk_perception_gain.is_finite() || self.risk_perception_gain < 0.0 {
            return Err(FaError::invalid(
                "risk_perception_gain",
                format!("must be finite and >= 0, got {}", self.risk_perception_gain),
            ));
        }
        self.population.validate()?;
        for measure in &self.measures {
            measure.validate()?;
        }
        match &self.hazard {
            HazardConfig::Scripted { .. } => {}
            HazardConfig::Stochastic { probability_per_tick, .. } => {
                if !(0.0..=1.0).contains(probability_per_tick) || probability_per_tick.is_nan() {
                    return Err(FaError::invalid(
                        "hazard.probability_per_tick",
                        format!("must be in [0, 1], got {probability_per_tick}"),
                    ));
                }
            }
        }
        // Event multipliers and curve knots are validated in depth where they
        // are constructed (FloodEvent::new, DamageCurve::new).
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn validate_range(parameter: &'static str, (min, max): (f64, f64), floor: f64) -> FaResult<()> {
    if !(min.is_finite() && max.is_finite()) || min < floor || max < min {
        return Err(FaError::invalid(
            parameter,
            format!("need {floor} <= min <= max, got [{min}, {max}]"),
        ));
    }
    Ok(())
}
