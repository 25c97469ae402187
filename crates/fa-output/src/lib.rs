//! `fa-output` — pluggable output backends for simulation results.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`row`]      | `TickSummaryRow`, `HouseholdFinalRow` — plain data rows  |
//! | [`writer`]   | The `OutputWriter` backend trait                         |
//! | [`csv`]      | CSV backend (two files)                                  |
//! | [`sqlite`]   | SQLite backend (feature `sqlite`)                        |
//! | [`observer`] | `SimOutputObserver<W>` bridging `SimObserver` to a writer|
//!
//! The observer never panics and never aborts the run on a write failure: it
//! buffers the first error and hands it back through
//! [`SimOutputObserver::take_error`] once the run is over.

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod writer;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{HouseholdFinalRow, TickSummaryRow};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
pub use writer::OutputWriter;
