//! Core household storage: `HouseholdStore` (SoA data) and `AgentRngs`
//! (per-agent RNG).
//!
//! # Why two structs?
//!
//! A parallel decision phase needs `&mut AgentRngs` (exclusive mutable access
//! to each agent's RNG) and `&HouseholdStore` (shared read access to the
//! population) simultaneously.  Rust's borrow checker forbids this if both
//! live inside a single struct.  Keeping RNGs in a separate `AgentRngs`
//! struct resolves the conflict cleanly.
//!
//! # Ownership rules
//!
//! Each household exclusively owns its own row: nothing in the engine lets
//! one agent write another agent's state.  Cross-agent reads (the adoption
//! map for social influence) go through a tick-start snapshot taken with
//! [`HouseholdStore::adoption_map`].

use fa_core::{AgentId, AgentRng, FaError, FaResult, Location, MeasureId, Tick};

// ── AdaptationStatus ──────────────────────────────────────────────────────────

/// The two-state adaptation machine.  The only transition is
/// `NotAdapted → Adapted`, made by [`HouseholdStore::adopt`]; nothing in the
/// engine reverses it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdaptationStatus {
    NotAdapted,
    Adapted,
}

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`HouseholdStore`] to
/// enable simultaneous `&mut AgentRngs` + `&HouseholdStore` borrows.
///
/// `AgentRngs` is `Send` but intentionally not `Sync` — per-agent RNG state
/// must never be shared between threads.  Rayon's `par_iter_mut()` handles
/// the exclusive-per-thread access pattern.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── HouseholdStore ────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all household state.
///
/// Every `Vec` field has exactly `count` elements (the flattened
/// `measure_cost` array has `count × measure_count`); the `AgentId` value is
/// the index into all of them:
///
/// ```ignore
/// let savings = store.savings[agent.index()];  // O(1), cache-friendly
/// ```
///
/// All arrays start at zero / empty; the simulation builder writes actual
/// initial values by indexed assignment.
pub struct HouseholdStore {
    /// Number of households.  Equals the length of every per-agent `Vec`.
    pub count: usize,

    /// Number of measures in the run's measure table.
    pub measure_count: usize,

    // ── Fixed attributes ──────────────────────────────────────────────────
    /// Home coordinate, immutable after build; used only to sample depth.
    pub location: Vec<Location>,

    /// Income per tick.
    pub income: Vec<f64>,

    /// CRRA risk-aversion coefficient ρ.
    pub risk_aversion: Vec<f64>,

    /// Agent-specific up-front cost of each measure, flattened row-major:
    /// `measure_cost[agent.index() * measure_count + measure.index()]`.
    pub measure_cost: Vec<f64>,

    // ── Belief state ──────────────────────────────────────────────────────
    /// Perceived per-tick flood probability, in [0, 1].  Starts at the
    /// configured base rate; grows with flood experience.
    pub flood_probability: Vec<f64>,

    /// Map-estimated flood depth at the home location (metres, >= 0).
    pub depth_estimated: Vec<f64>,

    /// Damage fraction the agent expects if a flood hits, derived from
    /// `depth_estimated` through the damage curve.
    pub damage_estimated: Vec<f64>,

    // ── Economic state ────────────────────────────────────────────────────
    /// Current savings (>= 0; damage and measure costs are floored here).
    pub savings: Vec<f64>,

    /// Savings accrued each tick (`income × saving_rate`).
    pub saving_per_tick: Vec<f64>,

    // ── Demographic state ─────────────────────────────────────────────────
    /// Occupant age in years.  Advanced each tick by the turnover rule;
    /// stays at zero when turnover is not configured.
    pub age: Vec<f64>,

    // ── Tick-scoped flood state ───────────────────────────────────────────
    /// Realized flood depth this tick (0 on dry ticks).  Overwritten every
    /// tick; never carries across ticks.
    pub depth_actual: Vec<f64>,

    /// Realized damage fraction this tick, after adopted measures.
    pub damage_actual: Vec<f64>,

    // ── Adaptation state ──────────────────────────────────────────────────
    /// Bitmask over `MeasureId`: bit m set ⇔ measure m adopted.  Set-only.
    pub adopted: Vec<u32>,

    /// Tick of first adoption, if any.
    pub adopted_at: Vec<Option<Tick>>,

    /// Realized monetary damage per tick, append-only, one entry per tick.
    pub damage_history: Vec<Vec<f64>>,
}

impl HouseholdStore {
    /// Allocate zeroed storage for `count` households and `measure_count`
    /// measures.
    pub fn new(count: usize, measure_count: usize) -> FaResult<Self> {
        if measure_count > 32 {
            return Err(FaError::invalid(
                "measures",
                format!("the adoption bitmask supports at most 32 measures, got {measure_count}"),
            ));
        }
        Ok(Self {
            count,
            measure_count,
            location: vec![Location::new(0.0, 0.0); count],
            income: vec![0.0; count],
            risk_aversion: vec![0.0; count],
            measure_cost: vec![0.0; count * measure_count],
            flood_probability: vec![0.0; count],
            depth_estimated: vec![0.0; count],
            damage_estimated: vec![0.0; count],
            savings: vec![0.0; count],
            saving_per_tick: vec![0.0; count],
            age: vec![0.0; count],
            depth_actual: vec![0.0; count],
            damage_actual: vec![0.0; count],
            adopted: vec![0; count],
            adopted_at: vec![None; count],
            damage_history: vec![Vec::new(); count],
        })
    }

    /// `true` if there are no households.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order — the engine's
    /// canonical agent ordering.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    // ── Adaptation state ──────────────────────────────────────────────────

    /// `true` if the agent has adopted at least one measure.
    #[inline]
    pub fn is_adapted(&self, agent: AgentId) -> bool {
        self.adopted[agent.index()] != 0
    }

    #[inline]
    pub fn status(&self, agent: AgentId) -> AdaptationStatus {
        if self.is_adapted(agent) {
            AdaptationStatus::Adapted
        } else {
            AdaptationStatus::NotAdapted
        }
    }

    /// `true` if the agent has adopted this specific measure.
    #[inline]
    pub fn has_adopted(&self, agent: AgentId, measure: MeasureId) -> bool {
        self.adopted[agent.index()] & (1 << measure.0) != 0
    }

    /// Number of measures the agent has adopted.
    #[inline]
    pub fn adopted_count(&self, agent: AgentId) -> u32 {
        self.adopted[agent.index()].count_ones()
    }

    /// Snapshot of the population adoption map, indexed by `AgentId`.
    ///
    /// Taken once at tick start and handed to the influence computation, so
    /// every decision in a tick sees the same map regardless of ordering.
    pub fn adoption_map(&self) -> Vec<bool> {
        self.adopted.iter().map(|&mask| mask != 0).collect()
    }

    /// Adoption rate over the whole population, in [0, 1].
    pub fn adoption_rate(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let adapted = self.adopted.iter().filter(|&&m| m != 0).count();
        adapted as f64 / self.count as f64
    }

    // ── Measure costs ─────────────────────────────────────────────────────

    /// Agent-specific cost of `measure`.
    #[inline]
    pub fn cost(&self, agent: AgentId, measure: MeasureId) -> f64 {
        self.measure_cost[agent.index() * self.measure_count + measure.index()]
    }

    /// Write the agent-specific cost of `measure` (build time only).
    #[inline]
    pub fn set_cost(&mut self, agent: AgentId, measure: MeasureId, cost: f64) {
        self.measure_cost[agent.index() * self.measure_count + measure.index()] = cost;
    }

    // ── Mutations (called only by the tick loop's apply phase) ────────────

    /// Adopt `measure` for `agent` at `tick`: set the status bit and deduct
    /// the measure's cost from savings, exactly once.
    ///
    /// Errors if the measure is already adopted (the transition is
    /// monotonic) or if savings do not cover the cost — both indicate a bug
    /// in the caller's affordability filtering, not a normal outcome.
    pub fn adopt(&mut self, agent: AgentId, measure: MeasureId, tick: Tick) -> FaResult<()> {
        if agent.index() >= self.count {
            return Err(FaError::AgentNotFound(agent));
        }
        if measure.index() >= self.measure_count {
            return Err(FaError::invalid(
                "measure",
                format!("{measure} outside the measure table of {}", self.measure_count),
            ));
        }
        if self.has_adopted(agent, measure) {
            return Err(FaError::invalid(
                "measure",
                format!("{agent} already adopted {measure}; adoption is permanent"),
            ));
        }
        let cost = self.cost(agent, measure);
        if self.savings[agent.index()] < cost {
            return Err(FaError::invalid(
                "measure",
                format!("{agent} cannot afford {measure} (cost {cost})"),
            ));
        }
        self.adopted[agent.index()] |= 1 << measure.0;
        self.savings[agent.index()] -= cost;
        if self.adopted_at[agent.index()].is_none() {
            self.adopted_at[agent.index()] = Some(tick);
        }
        Ok(())
    }

    /// Add the per-tick savings accrual.
    #[inline]
    pub fn accrue_savings(&mut self, agent: AgentId) {
        self.savings[agent.index()] += self.saving_per_tick[agent.index()];
    }

    /// Move new occupants into the home: fresh age, income and savings.
    ///
    /// Everything tied to the house rather than its occupants survives the
    /// turnover — location, beliefs, adopted measures, damage history.
    pub fn replace_occupants(
        &mut self,
        agent:           AgentId,
        age:             f64,
        income:          f64,
        savings:         f64,
        saving_per_tick: f64,
    ) {
        let i = agent.index();
        self.age[i] = age;
        self.income[i] = income;
        self.savings[i] = savings;
        self.saving_per_tick[i] = saving_per_tick;
    }

    /// Deduct realized monetary flood damage, flooring savings at zero, and
    /// append it to the agent's damage history.
    pub fn apply_damage(&mut self, agent: AgentId, monetary_damage: f64) {
        let i = agent.index();
        self.savings[i] = (self.savings[i] - monetary_damage).max(0.0);
        self.damage_history[i].push(monetary_damage);
    }
}
