//! `fa-sim` — tick loop orchestrator for the rust_fa flood adaptation model.
//!
//! # Three-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Flood state — ask the FloodEventModel whether this tick floods;
//!                    snapshot the adoption map.
//!   ② Decision pass — for every household, in ascending AgentId order
//!                    (parallel with the `parallel` feature):
//!                    sample local depth, realize damage, maybe adopt a
//!                    measure via the expected-utility rule.
//!   ③ Aggregates  — record the tick's adoption/damage/savings summary.
//! ```
//!
//! Decisions read the adoption map as it stood at tick start, so the social
//! influence a household sees does not depend on where it falls in the
//! iteration order (synchronous-update semantics).  State writes are applied
//! sequentially in ascending `AgentId` order either way.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the decision phase on Rayon's thread pool.        |
//! | `serde`    | Serde derives on configuration and summary types.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fa_hazard::UniformDepth;
//! use fa_sim::{NoopObserver, SimBuilder, SimConfig};
//!
//! let mut sim = SimBuilder::new(config, UniformDepth(1.0)).build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("final adoption rate: {}", sim.households.adoption_rate());
//! ```

pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use config::{
    HazardConfig, MeasureConfig, PopulationConfig, RiskAversionConfig, ScriptedEventConfig,
    SimConfig, TurnoverConfig,
};
pub use diagnostics::{DiagnosticEvent, DiagnosticKind, RunDiagnostics};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use stats::TickSummary;
