//! Expected-utility comparison between adaptation measures and no action.
//!
//! # Model
//!
//! An agent facing flood probability `p` and expected damage fraction `df`
//! compares, for each candidate measure and for "do nothing":
//!
//! ```text
//! EU(a) = p · u(wealth if flooded under a) + (1 − p) · u(wealth if dry under a)
//! ```
//!
//! Wealth outcomes (exposure base is current savings):
//!
//! | Branch     | flooded                                   | dry              |
//! |------------|-------------------------------------------|------------------|
//! | no action  | `s − s·df`                                | `s`              |
//! | measure m  | `s − s·df·(1 − eff_m) − cost_m`           | `s − cost_m`     |
//!
//! `u` is a CRRA (constant relative risk aversion) transform parameterised by
//! the agent's risk-aversion coefficient ρ: `ln(w + ε)` at ρ = 1, else
//! `((w + ε)^(1−ρ) − 1) / (1 − ρ)`.  Concavity makes risk-averse agents
//! over-weight low-probability, high-damage outcomes.
//!
//! The social influence term is NOT hidden inside the utility: callers pass
//! an already-nudged probability obtained from [`perceived_probability`],
//! which applies the explicit `social_weight` configuration value.
//!
//! All functions here are side-effect-free.

use fa_core::{FaError, FaResult, MeasureId};

/// Small constant preventing `ln(0)` when an outcome wipes out savings.
const EPSILON: f64 = 1e-10;

/// ρ values within this distance of 1.0 use the logarithmic limit form.
const LOG_FORM_TOLERANCE: f64 = 1e-9;

// ── MeasureOption ─────────────────────────────────────────────────────────────

/// One adaptation measure as seen by the decision rule: its table id, the
/// agent-specific up-front cost, and the damage reduction it provides.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasureOption {
    pub id:            MeasureId,
    /// Up-front cost, deducted once at adoption.
    pub cost:          f64,
    /// Fraction of flood damage removed, in `[0, 1]` (1 = fully effective).
    pub effectiveness: f64,
}

// ── Utility transform ─────────────────────────────────────────────────────────

/// CRRA utility of `wealth` under risk aversion `rho`.
///
/// Errors with `NumericalDegeneracy` if the result is NaN/∞ — which happens
/// when a caller evaluates an outcome with wealth below `−ε`, i.e. an
/// unaffordable branch that should have been filtered out beforehand.
pub fn utility(wealth: f64, rho: f64) -> FaResult<f64> {
    let w = wealth + EPSILON;
    let u = if (rho - 1.0).abs() < LOG_FORM_TOLERANCE {
        w.ln()
    } else {
        (w.powf(1.0 - rho) - 1.0) / (1.0 - rho)
    };
    if u.is_finite() {
        Ok(u)
    } else {
        Err(FaError::NumericalDegeneracy {
            context: "utility",
            detail:  format!("u({wealth}) with rho={rho} is not finite"),
        })
    }
}

// ── Social nudge ──────────────────────────────────────────────────────────────

/// Perceived flood probability after the social influence nudge.
///
/// `signal` is the fraction of network neighbors already adapted (0 for an
/// isolated agent) and `social_weight` is the explicit configuration weight.
/// The nudge is additive and the result is clamped to `[0, 1]`:
///
/// ```text
/// p' = clamp(p + social_weight · signal, 0, 1)
/// ```
#[inline]
pub fn perceived_probability(base: f64, signal: f64, social_weight: f64) -> f64 {
    (base + social_weight * signal).clamp(0.0, 1.0)
}

// ── Expected utility ──────────────────────────────────────────────────────────

/// Expected utility of one branch: `Some(measure)` for adopting it, `None`
/// for doing nothing.
///
/// `savings` is the exposed asset base, `damage_fraction` the expected damage
/// fraction if a flood occurs, `probability` the (already socially nudged)
/// flood probability, `rho` the agent's risk aversion.
pub fn expected_utility(
    savings:         f64,
    damage_fraction: f64,
    probability:     f64,
    rho:             f64,
    branch:          Option<&MeasureOption>,
) -> FaResult<f64> {
    if !(0.0..=1.0).contains(&probability) || probability.is_nan() {
        return Err(FaError::invalid(
            "probability",
            format!("flood probability must be in [0, 1], got {probability}"),
        ));
    }
    if !(0.0..=1.0).contains(&damage_fraction) || damage_fraction.is_nan() {
        return Err(FaError::invalid(
            "damage_fraction",
            format!("damage fraction must be in [0, 1], got {damage_fraction}"),
        ));
    }

    let (wealth_flooded, wealth_dry) = match branch {
        None => (savings - savings * damage_fraction, savings),
        Some(m) => {
            let residual = savings * damage_fraction * (1.0 - m.effectiveness);
            (savings - residual - m.cost, savings - m.cost)
        }
    };

    Ok(probability * utility(wealth_flooded, rho)?
        + (1.0 - probability) * utility(wealth_dry, rho)?)
}

// ── Decision rule ─────────────────────────────────────────────────────────────

/// Pick the adaptation measure (if any) an agent adopts this tick.
///
/// Among the offered `options`, a measure is *affordable* when savings cover
/// its cost plus the residual expected damage it leaves behind:
///
/// ```text
/// savings ≥ cost + savings · df · (1 − effectiveness)
/// ```
///
/// The best affordable measure is adopted iff its EU **strictly** beats
/// EU(no action) — ties resolve to doing nothing.  Between equal-EU measures
/// the one earlier in the table wins, keeping the choice deterministic.
///
/// Returns `Ok(None)` when no measure beats inaction (including the
/// no-options and nothing-affordable cases — those are normal outcomes, not
/// errors).
pub fn choose_measure(
    savings:         f64,
    damage_fraction: f64,
    probability:     f64,
    rho:             f64,
    options:         &[MeasureOption],
) -> FaResult<Option<MeasureId>> {
    let eu_no_action = expected_utility(savings, damage_fraction, probability, rho, None)?;

    let mut best: Option<MeasureId> = None;
    let mut best_eu = eu_no_action;

    for option in options {
        let residual = savings * damage_fraction * (1.0 - option.effectiveness);
        if savings < option.cost + residual {
            continue; // unaffordable
        }
        let eu = expected_utility(savings, damage_fraction, probability, rho, Some(option))?;
        if eu > best_eu {
            best = Some(option.id);
            best_eu = eu;
        }
    }

    Ok(best)
}
