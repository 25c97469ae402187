//! Error types for simulation construction and execution.

use fa_core::FaError;
use fa_hazard::HazardError;
use thiserror::Error;

/// Errors surfaced by [`SimBuilder::build`](crate::SimBuilder::build) and
/// [`Sim::run`](crate::Sim::run).
///
/// Per-agent depth sampling failures during a run are NOT errors — they are
/// recorded in [`RunDiagnostics`](crate::RunDiagnostics) and the agent skips
/// its decision for the tick.  A `Hazard` variant here means the provider
/// failed at build time, where every agent's estimated depth is mandatory.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid simulation setup: {0}")]
    Setup(#[from] FaError),

    #[error("depth provider failed during initialization: {0}")]
    Hazard(#[from] HazardError),
}

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;
