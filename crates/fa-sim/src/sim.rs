//! The simulation engine: owns all run state and drives the tick loop.
//!
//! # Phase structure
//!
//! Each tick runs three phases:
//!
//! 1. **Flood state** — the [`FloodEventModel`] decides whether this tick
//!    floods, and the adoption map is snapshotted.
//! 2. **Decision pass** — every household's outcome (realized depth and
//!    damage, belief update, adoption choice) is *computed* against the
//!    tick-start snapshot, then *applied* sequentially in ascending
//!    [`AgentId`] order.  The compute step only reads shared state plus the
//!    agent's own RNG, which is what makes the `parallel` feature sound.
//! 3. **Aggregates** — a [`TickSummary`] is appended to the run series.
//!
//! Splitting compute from apply also pins down the semantics: a household
//! deciding this tick sees its neighbors as they were at tick start, never
//! mid-tick.

use fa_agent::{AgentRngs, HouseholdStore};
use fa_core::{AgentId, AgentRng, FaResult, MeasureId, SimRng, Tick};
use fa_decision::{choose_measure, perceived_probability, DamageCurve, MeasureOption};
use fa_hazard::{DepthProvider, FloodEvent, FloodEventModel};
use fa_network::SocialNetwork;
use tracing::{debug, info, warn};

use crate::config::SimConfig;
use crate::diagnostics::{DiagnosticKind, RunDiagnostics};
use crate::error::SimResult;
use crate::observer::SimObserver;
use crate::stats::TickSummary;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// A fully constructed simulation.  Build one with
/// [`SimBuilder`](crate::SimBuilder), then call [`Sim::run`].
pub struct Sim<P: DepthProvider> {
    pub config:     SimConfig,
    /// The next tick to execute.
    pub tick:       Tick,
    pub households: HouseholdStore,
    pub rngs:       AgentRngs,
    pub network:    SocialNetwork,
    pub curve:      DamageCurve,

    pub(crate) provider: P,
    pub(crate) hazard:   Box<dyn FloodEventModel>,
    /// Flood event stream (a child of the master seed).
    pub(crate) rng:      SimRng,

    pub diagnostics:   RunDiagnostics,
    pub(crate) series: Vec<TickSummary>,
}

impl<P: DepthProvider> Sim<P> {
    /// The per-tick summaries recorded so far, one per executed tick.
    pub fn summaries(&self) -> &[TickSummary] {
        &self.series
    }

    /// Run all remaining ticks up to `config.total_ticks`.
    pub fn run(&mut self, observer: &mut impl SimObserver) -> SimResult<()> {
        while self.tick.0 < self.config.total_ticks {
            observer.on_tick_start(self.tick);
            self.process_tick()?;
            if let Some(summary) = self.series.last() {
                observer.on_tick_end(summary.tick, summary);
            }
        }
        observer.on_run_end(&self.households, &self.series);
        Ok(())
    }

    /// Execute one tick: flood state, decision pass, aggregates.
    pub fn process_tick(&mut self) -> SimResult<()> {
        let now = self.tick;

        // ── ① Flood state ─────────────────────────────────────────────────
        let event = self.hazard.next_event(now, &mut self.rng);
        if let Some(ev) = &event {
            info!(
                tick = %now,
                multiplier_min = ev.multiplier_min,
                multiplier_max = ev.multiplier_max,
                "flood event"
            );
        }
        let snapshot = self.households.adoption_map();

        // ── ② Decision pass: compute, then apply in ascending id order ────
        let outcomes = compute_outcomes(
            &mut self.rngs,
            &self.households,
            &self.network,
            &self.curve,
            &self.provider,
            &self.config,
            &snapshot,
            event.as_ref(),
            now,
        )?;

        for (i, outcome) in outcomes.iter().enumerate() {
            let agent = AgentId(i as u32);
            match &outcome.new_occupants {
                Some(o) => {
                    let saving_per_tick = o.income * self.config.population.saving_rate;
                    self.households.replace_occupants(
                        agent,
                        outcome.age,
                        o.income,
                        o.savings,
                        saving_per_tick,
                    );
                    debug!(tick = %now, agent = %agent, "household turnover");
                }
                None => {
                    self.households.age[i] = outcome.age;
                    self.households.accrue_savings(agent);
                }
            }
            self.households.depth_actual[i] = outcome.depth_actual;
            self.households.damage_actual[i] = outcome.damage_fraction;
            self.households.apply_damage(agent, outcome.monetary_damage);
            self.households.flood_probability[i] = outcome.new_probability;

            if outcome.depth_unavailable {
                warn!(tick = %now, agent = %agent, "flood depth unavailable; household skipped");
                self.diagnostics.record(now, agent, DiagnosticKind::DepthUnavailable);
            }
            if let Some(measure) = outcome.adopt {
                self.households.adopt(agent, measure, now)?;
                debug!(tick = %now, agent = %agent, measure = %measure, "measure adopted");
            }
        }

        // ── ③ Aggregates ──────────────────────────────────────────────────
        let summary = TickSummary::compute(now, event.is_some(), &self.households);
        self.series.push(summary);
        self.tick = now + 1;
        Ok(())
    }
}

// ── Per-agent outcome ─────────────────────────────────────────────────────────

/// Everything one household's tick changes, computed against read-only state
/// and applied later.  Applying an outcome touches only that agent's row.
struct AgentOutcome {
    depth_actual:      f64,
    /// Realized damage fraction after adopted measures.
    damage_fraction:   f64,
    monetary_damage:   f64,
    new_probability:   f64,
    /// Occupant age after this tick's aging (or the replacement's age).
    age:               f64,
    new_occupants:     Option<NewOccupants>,
    depth_unavailable: bool,
    adopt:             Option<MeasureId>,
}

/// Replacement occupants drawn when a household turns over: the house is
/// kept, the people and their finances are new.
struct NewOccupants {
    income:  f64,
    savings: f64,
}

/// Compute one household's outcome for this tick.
///
/// Reads: shared population/network/curve state, the tick-start adoption
/// snapshot. Writes: only the agent's own RNG.  Order within the tick:
/// occupants age (and may turn over), savings accrue, flood damage realizes
/// (if any), beliefs update, then the adoption decision runs on the
/// post-damage wealth.
#[allow(clippy::too_many_arguments)]
fn agent_outcome<P: DepthProvider>(
    agent:      AgentId,
    rng:        &mut AgentRng,
    households: &HouseholdStore,
    network:    &SocialNetwork,
    curve:      &DamageCurve,
    provider:   &P,
    config:     &SimConfig,
    snapshot:   &[bool],
    event:      Option<&FloodEvent>,
    now:        Tick,
) -> FaResult<AgentOutcome> {
    let i = agent.index();
    let mut savings_accrued = households.savings[i] + households.saving_per_tick[i];

    // Aging and turnover come first: replacement occupants face this tick's
    // flood (and make this tick's decision) with their own finances.
    let mut age = households.age[i];
    let mut new_occupants = None;
    if let Some(rule) = &config.population.turnover {
        age += rule.aging_per_tick;
        if age >= rule.turnover_age {
            age = rng.gen_range(rule.age_range.0..=rule.age_range.1);
            let income =
                rng.gen_range(config.population.income_range.0..=config.population.income_range.1);
            let multiple = rng.gen_range(
                config.population.initial_savings_multiple.0
                    ..=config.population.initial_savings_multiple.1,
            );
            savings_accrued = income * multiple;
            new_occupants = Some(NewOccupants { income, savings: savings_accrued });
        }
    }

    // Damage reduction from everything already adopted, compounding
    // multiplicatively across measures.
    let mut residual_factor = 1.0;
    for m in 0..households.measure_count {
        let id = MeasureId(m as u16);
        if households.has_adopted(agent, id) {
            residual_factor *= 1.0 - config.measures[m].effectiveness;
        }
    }

    let mut outcome = AgentOutcome {
        depth_actual:      0.0,
        damage_fraction:   0.0,
        monetary_damage:   0.0,
        new_probability:   households.flood_probability[i],
        age,
        new_occupants,
        depth_unavailable: false,
        adopt:             None,
    };

    if let Some(ev) = event {
        match provider.depth_at(households.location[i], now) {
            Ok(raw) => {
                let multiplier = rng.gen_range(ev.multiplier_min..=ev.multiplier_max);
                let depth = raw.max(0.0) * multiplier;
                let fraction = curve.fraction(depth)? * residual_factor;
                outcome.depth_actual = depth;
                outcome.damage_fraction = fraction;
                outcome.monetary_damage = fraction * savings_accrued;
                outcome.new_probability = (households.flood_probability[i]
                    + config.risk_perception_gain * fraction)
                    .clamp(0.0, 1.0);
            }
            Err(_) => {
                // Recoverable: log-and-skip, no damage and no decision.
                outcome.depth_unavailable = true;
                return Ok(outcome);
            }
        }
    }

    // Adoption decision on post-damage wealth and post-flood beliefs.
    let savings = (savings_accrued - outcome.monetary_damage).max(0.0);
    let signal = network.influence_signal(agent, snapshot);
    let probability =
        perceived_probability(outcome.new_probability, signal, config.social_weight);
    let expected_fraction = households.damage_estimated[i] * residual_factor;

    let mut options = Vec::with_capacity(households.measure_count);
    for (m, measure) in config.measures.iter().enumerate() {
        let id = MeasureId(m as u16);
        if households.has_adopted(agent, id) {
            continue;
        }
        options.push(MeasureOption {
            id,
            cost: households.cost(agent, id),
            effectiveness: measure.effectiveness,
        });
    }

    outcome.adopt = choose_measure(
        savings,
        expected_fraction,
        probability,
        households.risk_aversion[i],
        &options,
    )?;
    Ok(outcome)
}

// ── Decision-pass driver ──────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn compute_outcomes<P: DepthProvider>(
    rngs:       &mut AgentRngs,
    households: &HouseholdStore,
    network:    &SocialNetwork,
    curve:      &DamageCurve,
    provider:   &P,
    config:     &SimConfig,
    snapshot:   &[bool],
    event:      Option<&FloodEvent>,
    now:        Tick,
) -> FaResult<Vec<AgentOutcome>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        rngs.inner
            .par_iter_mut()
            .enumerate()
            .map(|(i, rng)| {
                agent_outcome(
                    AgentId(i as u32),
                    rng,
                    households,
                    network,
                    curve,
                    provider,
                    config,
                    snapshot,
                    event,
                    now,
                )
            })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        rngs.inner
            .iter_mut()
            .enumerate()
            .map(|(i, rng)| {
                agent_outcome(
                    AgentId(i as u32),
                    rng,
                    households,
                    network,
                    curve,
                    provider,
                    config,
                    snapshot,
                    event,
                    now,
                )
            })
            .collect()
    }
}
