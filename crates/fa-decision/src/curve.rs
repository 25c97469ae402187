//! Piecewise-linear depth-damage curve.
//!
//! # Contract
//!
//! For a valid curve, `fraction(depth)`:
//!
//! - is monotonic non-decreasing in `depth`,
//! - returns exactly `0.0` at `depth == 0.0`,
//! - saturates at the last knot's fraction for deeper water,
//! - **rejects** negative depth with `FaError::InvalidParameter` rather than
//!   clamping it — a negative depth reaching the damage model means an
//!   upstream data error that must surface, not be papered over.

use fa_core::{FaError, FaResult};

/// A depth → damage-fraction lookup curve with linear interpolation between
/// knots.
///
/// Knots are `(depth_m, fraction)` pairs with strictly increasing depths and
/// non-decreasing fractions in `[0, 1]`.  The first knot must be
/// `(0.0, 0.0)` so undamaged ground level is exact.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageCurve {
    knots: Vec<(f64, f64)>,
}

impl DamageCurve {
    /// Validate and construct a curve from `(depth, fraction)` knots.
    pub fn new(knots: Vec<(f64, f64)>) -> FaResult<Self> {
        if knots.len() < 2 {
            return Err(FaError::invalid(
                "damage_curve",
                format!("need at least 2 knots, got {}", knots.len()),
            ));
        }
        if knots[0] != (0.0, 0.0) {
            return Err(FaError::invalid(
                "damage_curve",
                format!("first knot must be (0, 0), got ({}, {})", knots[0].0, knots[0].1),
            ));
        }
        for window in knots.windows(2) {
            let (d0, f0) = window[0];
            let (d1, f1) = window[1];
            if !(d1.is_finite() && f1.is_finite()) {
                return Err(FaError::invalid("damage_curve", "non-finite knot"));
            }
            if d1 <= d0 {
                return Err(FaError::invalid(
                    "damage_curve",
                    format!("knot depths must strictly increase ({d0} then {d1})"),
                ));
            }
            if f1 < f0 {
                return Err(FaError::invalid(
                    "damage_curve",
                    format!("knot fractions must be non-decreasing ({f0} then {f1})"),
                ));
            }
            if !(0.0..=1.0).contains(&f1) {
                return Err(FaError::invalid(
                    "damage_curve",
                    format!("fraction {f1} outside [0, 1]"),
                ));
            }
        }
        Ok(Self { knots })
    }

    /// The residential depth-damage curve of Huizinga et al. (2017), as a
    /// log-regression fit sampled to piecewise-linear knots.  Damage
    /// saturates to total loss at 6 m.
    pub fn huizinga() -> Self {
        // fraction = 0.1746 ln(depth) + 0.6483, evaluated at the knot depths;
        // below 2.5 cm the fit is treated as zero damage.
        Self {
            knots: vec![
                (0.0, 0.0),
                (0.025, 0.004),
                (0.25, 0.406),
                (0.5, 0.527),
                (1.0, 0.648),
                (1.5, 0.719),
                (2.0, 0.769),
                (3.0, 0.840),
                (4.0, 0.890),
                (5.0, 0.929),
                (6.0, 1.0),
            ],
        }
    }

    /// Depth at which the curve saturates (the last knot's depth).
    #[inline]
    pub fn saturation_depth(&self) -> f64 {
        self.knots[self.knots.len() - 1].0
    }

    /// Damage fraction in `[0, 1]` for a flood of `depth` metres.
    ///
    /// Errors on negative or non-finite depth.
    pub fn fraction(&self, depth: f64) -> FaResult<f64> {
        if !depth.is_finite() || depth < 0.0 {
            return Err(FaError::invalid(
                "depth",
                format!("flood depth must be finite and >= 0, got {depth}"),
            ));
        }
        let last = self.knots[self.knots.len() - 1];
        if depth >= last.0 {
            return Ok(last.1);
        }
        // Find the knot interval containing `depth` and interpolate.
        let i = self.knots.partition_point(|&(d, _)| d <= depth);
        let (d0, f0) = self.knots[i - 1];
        let (d1, f1) = self.knots[i];
        let t = (depth - d0) / (d1 - d0);
        Ok(f0 + t * (f1 - f0))
    }

    /// Monetary damage for a flood of `depth` metres against an asset worth
    /// `asset_value`.  Bounded in `[0, asset_value]`.
    ///
    /// Errors on negative depth or negative asset value.
    pub fn damage(&self, depth: f64, asset_value: f64) -> FaResult<f64> {
        if !asset_value.is_finite() || asset_value < 0.0 {
            return Err(FaError::invalid(
                "asset_value",
                format!("asset value must be finite and >= 0, got {asset_value}"),
            ));
        }
        Ok(self.fraction(depth)? * asset_value)
    }
}
