//! `fa-hazard` — where flood water comes from.
//!
//! Two seams live here, both deliberately small:
//!
//! - [`DepthProvider`] is the interface to the **external spatial
//!   collaborator**: the engine never parses rasters or shapefiles itself;
//!   it asks `depth_at(location, tick)` and gets a depth in metres back.
//! - [`FloodEventModel`] decides **when** a flood happens.  The scripted and
//!   stochastic implementations satisfy the identical downstream contract,
//!   so the tick loop cannot tell them apart.
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`provider`] | `DepthProvider`, `UniformDepth`, `HazardError`         |
//! | [`event`]    | `FloodEvent`, `FloodEventModel`, `ScriptedFloods`, `StochasticFloods` |

pub mod event;
pub mod provider;


pub use event::{FloodEvent, FloodEventModel, ScriptedFloods, StochasticFloods};
pub use provider::{DepthProvider, HazardError, HazardResult, UniformDepth};
