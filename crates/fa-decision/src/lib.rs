//! `fa-decision` — the flood-damage model and the expected-utility decision
//! rule.
//!
//! Everything in this crate is a pure function of its inputs: no mutable
//! state, no RNG, no I/O.  That is a deliberate contract — the decision rule
//! must be independently testable and must produce the same output for the
//! same agent snapshot no matter when or on which thread it runs.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`curve`]   | `DamageCurve` — piecewise-linear depth → damage fraction  |
//! | [`utility`] | CRRA utility, `expected_utility`, `choose_measure`        |

pub mod curve;
pub mod utility;


pub use curve::DamageCurve;
pub use utility::{choose_measure, expected_utility, perceived_probability, utility, MeasureOption};
