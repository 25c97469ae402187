//! `fa-core` — foundational types for the `rust_fa` flood adaptation model.
//!
//! This crate is a dependency of every other `fa-*` crate.  It intentionally
//! has no `fa-*` dependencies and minimal external ones (only `rand`,
//! `rand_distr` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `MeasureId`                                |
//! | [`location`] | `Location`, `MapBounds`                               |
//! | [`time`]     | `Tick`                                                |
//! | [`rng`]      | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]    | `FaError`, `FaResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod location;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{FaError, FaResult};
pub use ids::{AgentId, MeasureId};
pub use location::{Location, MapBounds};
pub use rng::{AgentRng, SimRng};
pub use time::Tick;
