//! The external spatial collaborator interface.

use fa_core::{Location, Tick};
use thiserror::Error;

/// Errors a depth provider may surface.
#[derive(Debug, Error)]
pub enum HazardError {
    /// The provider cannot resolve a depth for this location/tick — e.g. the
    /// point falls outside the loaded raster.  The engine treats this as
    /// fatal at build time and as a per-agent diagnostic during a run.
    #[error("no flood depth available at {location} (tick {tick})")]
    DataUnavailable { location: Location, tick: Tick },
}

/// Alias for `Result<T, HazardError>`.
pub type HazardResult<T> = Result<T, HazardError>;

/// Resolves a flood depth (metres) for a location at a tick.
///
/// Implemented by the calling harness over whatever spatial data it loaded
/// (GeoTIFF band, interpolated surface, …).  The returned value may be
/// negative for high-elevation cells — the engine clamps at the sampling
/// boundary — but must be finite.
///
/// Any `Fn(Location, Tick) -> HazardResult<f64>` closure is a provider:
///
/// ```
/// use fa_core::{Location, Tick};
/// use fa_hazard::{DepthProvider, HazardResult};
///
/// let flat = |_loc: Location, _tick: Tick| -> HazardResult<f64> { Ok(0.8) };
/// assert_eq!(flat.depth_at(Location::new(0.0, 0.0), Tick::ZERO).unwrap(), 0.8);
/// ```
pub trait DepthProvider: Send + Sync {
    fn depth_at(&self, location: Location, tick: Tick) -> HazardResult<f64>;
}

impl<F> DepthProvider for F
where
    F: Fn(Location, Tick) -> HazardResult<f64> + Send + Sync,
{
    fn depth_at(&self, location: Location, tick: Tick) -> HazardResult<f64> {
        self(location, tick)
    }
}

/// The trivial provider: the same depth everywhere, always.
///
/// Useful for tests and for runs where spatial heterogeneity is switched off.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UniformDepth(pub f64);

impl DepthProvider for UniformDepth {
    fn depth_at(&self, _location: Location, _tick: Tick) -> HazardResult<f64> {
        Ok(self.0)
    }
}
