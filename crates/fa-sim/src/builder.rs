//! Simulation construction: validate the configuration, then sample the
//! population, build the network, and wire the hazard process.
//!
//! All initialization randomness flows through child streams of the master
//! seed, one per subsystem, so adding draws to one subsystem never perturbs
//! the others.

use fa_agent::{AgentRngs, HouseholdStore};
use fa_core::{SimRng, Tick};
use fa_decision::DamageCurve;
use fa_hazard::{DepthProvider, FloodEvent, FloodEventModel, ScriptedFloods, StochasticFloods};
use fa_network::generate;
use tracing::info;

use crate::config::{HazardConfig, SimConfig};
use crate::diagnostics::RunDiagnostics;
use crate::error::SimResult;
use crate::sim::Sim;

// Child-stream offsets under the master seed.
const STREAM_POPULATION: u64 = 1;
const STREAM_NETWORK: u64 = 2;
const STREAM_HAZARD: u64 = 3;

/// Builds a [`Sim`] from a validated [`SimConfig`] and a depth provider.
pub struct SimBuilder<P: DepthProvider> {
    config:      SimConfig,
    provider:    P,
    event_model: Option<Box<dyn FloodEventModel>>,
}

impl<P: DepthProvider> SimBuilder<P> {
    pub fn new(config: SimConfig, provider: P) -> Self {
        Self { config, provider, event_model: None }
    }

    /// Replace the hazard process derived from the configuration with a
    /// custom [`FloodEventModel`].
    pub fn event_model(mut self, model: Box<dyn FloodEventModel>) -> Self {
        self.event_model = Some(model);
        self
    }

    /// Validate and construct.  Fails fast on any bad parameter; a depth
    /// provider failure for any home location is fatal here (every household
    /// needs an estimated depth before tick 0).
    pub fn build(self) -> SimResult<Sim<P>> {
        let config = self.config;
        config.validate()?;

        let curve = match &config.damage_curve {
            Some(knots) => DamageCurve::new(knots.clone())?,
            None => DamageCurve::huizinga(),
        };

        let mut root = SimRng::new(config.seed);
        let mut rng_population = root.child(STREAM_POPULATION);
        let mut rng_network = root.child(STREAM_NETWORK);
        let rng_hazard = root.child(STREAM_HAZARD);

        let network = generate(config.population.size, &config.network, &mut rng_network)?;

        let mut households = HouseholdStore::new(config.population.size, config.measures.len())?;
        let pop = &config.population;
        for agent in households.agent_ids().collect::<Vec<_>>() {
            let i = agent.index();

            let location = pop.bounds.sample(&mut rng_population);
            let income = rng_population.gen_range(pop.income_range.0..=pop.income_range.1);
            let savings_multiple = rng_population
                .gen_range(pop.initial_savings_multiple.0..=pop.initial_savings_multiple.1);
            let rho = rng_population.normal_clamped(
                pop.risk_aversion.mean,
                pop.risk_aversion.std_dev,
                pop.risk_aversion.min,
                pop.risk_aversion.max,
            )?;

            if let Some(turnover) = &pop.turnover {
                households.age[i] =
                    rng_population.gen_range(turnover.age_range.0..=turnover.age_range.1);
            }

            households.location[i] = location;
            households.income[i] = income;
            households.savings[i] = income * savings_multiple;
            households.saving_per_tick[i] = income * pop.saving_rate;
            households.risk_aversion[i] = rho;
            households.flood_probability[i] = pop.base_flood_probability;

            // Providers may report negative depths for high ground; the
            // model works with depths clamped at zero.
            let depth = self.provider.depth_at(location, Tick::ZERO)?.max(0.0);
            households.depth_estimated[i] = depth;
            households.damage_estimated[i] = curve.fraction(depth)?;

            for (m, measure) in config.measures.iter().enumerate() {
                let cost =
                    rng_population.gen_range(measure.cost_range.0..=measure.cost_range.1);
                households.set_cost(agent, fa_core::MeasureId(m as u16), cost);
            }
        }

        let hazard: Box<dyn FloodEventModel> = match self.event_model {
            Some(model) => model,
            None => match &config.hazard {
                HazardConfig::Scripted { events } => {
                    let events = events
                        .iter()
                        .map(|e| FloodEvent::new(Tick(e.tick), e.multiplier_min, e.multiplier_max))
                        .collect::<Result<Vec<_>, _>>()?;
                    Box::new(ScriptedFloods::new(events)?)
                }
                HazardConfig::Stochastic {
                    probability_per_tick,
                    multiplier_min,
                    multiplier_max,
                } => Box::new(StochasticFloods::new(
                    *probability_per_tick,
                    *multiplier_min,
                    *multiplier_max,
                )?),
            },
        };

        let rngs = AgentRngs::new(config.population.size, config.seed);

        info!(
            population = config.population.size,
            links = network.link_count(),
            measures = config.measures.len(),
            ticks = config.total_ticks,
            "simulation initialized"
        );

        Ok(Sim {
            config,
            tick: Tick::ZERO,
            households,
            rngs,
            network,
            curve,
            provider: self.provider,
            hazard,
            rng: rng_hazard,
            diagnostics: RunDiagnostics::new(),
            series: Vec::new(),
        })
    }
}
