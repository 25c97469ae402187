//! Flood event generation.
//!
//! A [`FloodEvent`] says "a flood happens this tick" and carries the range
//! from which each household draws its local shock multiplier: the realized
//! depth at a household is `estimated_depth × U(multiplier_min,
//! multiplier_max)`, drawn from that household's own RNG.  The reference
//! parameterisation uses the range 0.5–1.2, i.e. a realized flood is between
//! half and 1.2 times the mapped estimate.
//!
//! [`FloodEventModel`] is the pluggable seam required by the scheduler:
//! scripted replay and a seeded Bernoulli process both produce plain
//! `FloodEvent`s, so everything downstream of event generation is identical
//! in both modes.

use fa_core::{FaError, FaResult, SimRng, Tick};

// ── FloodEvent ────────────────────────────────────────────────────────────────

/// One flood occurring at a specific tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloodEvent {
    pub tick: Tick,
    /// Per-household depth multiplier is drawn uniformly from
    /// `[multiplier_min, multiplier_max]`.
    pub multiplier_min: f64,
    pub multiplier_max: f64,
}

impl FloodEvent {
    pub fn new(tick: Tick, multiplier_min: f64, multiplier_max: f64) -> FaResult<Self> {
        if !(multiplier_min.is_finite() && multiplier_max.is_finite())
            || multiplier_min < 0.0
            || multiplier_max < multiplier_min
        {
            return Err(FaError::invalid(
                "flood_multiplier",
                format!("need 0 <= min <= max, got [{multiplier_min}, {multiplier_max}]"),
            ));
        }
        Ok(Self { tick, multiplier_min, multiplier_max })
    }
}

// ── FloodEventModel ───────────────────────────────────────────────────────────

/// Decides whether a flood occurs at `tick`.
///
/// Called exactly once per tick by the scheduler, in tick order.  All
/// randomness must come from the `SimRng` handed in, never from ambient
/// state, so runs replay exactly under the same seed.
pub trait FloodEventModel: Send {
    fn next_event(&mut self, tick: Tick, rng: &mut SimRng) -> Option<FloodEvent>;
}

// ── ScriptedFloods ────────────────────────────────────────────────────────────

/// Deterministic replay of a pre-written flood scenario.
///
/// Ignores the RNG entirely; two runs of the same script flood at the same
/// ticks no matter what else the simulation draws.
pub struct ScriptedFloods {
    /// Remaining events, sorted ascending by tick.
    events: Vec<FloodEvent>,
    cursor: usize,
}

impl ScriptedFloods {
    /// Validate and sort the scenario.  Duplicate ticks are rejected — one
    /// flood field per tick is an engine invariant.
    pub fn new(mut events: Vec<FloodEvent>) -> FaResult<Self> {
        events.sort_by_key(|e| e.tick);
        for window in events.windows(2) {
            if window[0].tick == window[1].tick {
                return Err(FaError::invalid(
                    "scripted_floods",
                    format!("duplicate flood event at {}", window[0].tick),
                ));
            }
        }
        Ok(Self { events, cursor: 0 })
    }
}

impl FloodEventModel for ScriptedFloods {
    fn next_event(&mut self, tick: Tick, _rng: &mut SimRng) -> Option<FloodEvent> {
        // Skip any events the caller has already passed (e.g. a scenario
        // written for a longer run than was configured).
        while self.cursor < self.events.len() && self.events[self.cursor].tick < tick {
            self.cursor += 1;
        }
        if self.cursor < self.events.len() && self.events[self.cursor].tick == tick {
            let event = self.events[self.cursor];
            self.cursor += 1;
            Some(event)
        } else {
            None
        }
    }
}

// ── StochasticFloods ──────────────────────────────────────────────────────────

/// Seeded Bernoulli event process: each tick floods independently with
/// `probability_per_tick`.
pub struct StochasticFloods {
    probability_per_tick: f64,
    multiplier_min: f64,
    multiplier_max: f64,
}

impl StochasticFloods {
    pub fn new(probability_per_tick: f64, multiplier_min: f64, multiplier_max: f64) -> FaResult<Self> {
        if !(0.0..=1.0).contains(&probability_per_tick) || probability_per_tick.is_nan() {
            return Err(FaError::invalid(
                "probability_per_tick",
                format!("must be in [0, 1], got {probability_per_tick}"),
            ));
        }
        // Reuse the multiplier validation.
        FloodEvent::new(Tick::ZERO, multiplier_min, multiplier_max)?;
        Ok(Self { probability_per_tick, multiplier_min, multiplier_max })
    }
}

impl FloodEventModel for StochasticFloods {
    fn next_event(&mut self, tick: Tick, rng: &mut SimRng) -> Option<FloodEvent> {
        if rng.gen_bool(self.probability_per_tick) {
            Some(FloodEvent {
                tick,
                multiplier_min: self.multiplier_min,
                multiplier_max: self.multiplier_max,
            })
        } else {
            None
        }
    }
}
