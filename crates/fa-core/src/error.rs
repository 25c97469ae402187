//! Framework error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `FaError` via `From` impls, or keep them separate and wrap `FaError` as
//! one variant.  Both patterns are acceptable; prefer whichever keeps error
//! sites clean.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `fa-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum FaError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    /// A configuration or input value is out of its documented range.
    /// Raised fail-fast, before the first tick runs.
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason:    String,
    },

    /// A utility or damage computation produced NaN/∞.  Always a fatal
    /// configuration error, never swallowed.
    #[error("numerical degeneracy in {context}: {detail}")]
    NumericalDegeneracy {
        context: &'static str,
        detail:  String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FaError {
    /// Shorthand for the most common construction site.
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        FaError::InvalidParameter { parameter, reason: reason.into() }
    }
}

/// Shorthand result type for all `fa-*` crates.
pub type FaResult<T> = Result<T, FaError>;
