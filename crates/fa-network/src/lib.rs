//! `fa-network` — the household interaction network.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`graph`]    | `SocialNetwork` (CSR adjacency), `SocialNetworkBuilder`    |
//! | [`generate`] | `NetworkTopology` + seeded generators (ER / BA / WS / none)|
//!
//! The topology is fixed for the whole run: it is built once at simulation
//! init from a child of the master seed, and agents only ever read it.

pub mod generate;
pub mod graph;

#[cfg(test)]
mod tests;

pub use generate::{generate, NetworkTopology};
pub use graph::{SocialNetwork, SocialNetworkBuilder};
