//! `fa-agent` — Structure-of-Arrays household storage.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`store`] | `HouseholdStore` (SoA arrays), `AgentRngs`, `AdaptationStatus` |
//!
//! The field set is fixed and explicit: every per-household attribute the
//! model uses is a named SoA array, sized once at construction.  There is
//! deliberately no dynamic attribute bag.

pub mod store;


pub use store::{AdaptationStatus, AgentRngs, HouseholdStore};
