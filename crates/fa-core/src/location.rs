//! Household coordinates and the rectangular model domain.
//!
//! `Location` is a point in a projected (metric) coordinate reference system
//! — the reference data uses EPSG:26915 — stored as `f64` because raster
//! extents routinely exceed the exact-integer range of `f32`.
//!
//! The engine never measures distance between households: a location exists
//! only so the external spatial collaborator can resolve a flood depth for
//! it.

/// A projected-CRS coordinate (easting/northing in metres).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// ── MapBounds ─────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box of the model domain.
///
/// Households are placed uniformly at random inside these bounds at build
/// time.  A polygon-shaped domain is the spatial collaborator's concern; the
/// engine only needs a sampling rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl MapBounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// `true` when the box has positive area.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min_x < self.max_x && self.min_y < self.max_y
    }

    /// `true` when `loc` lies inside (or on the edge of) the box.
    #[inline]
    pub fn contains(&self, loc: Location) -> bool {
        loc.x >= self.min_x && loc.x <= self.max_x && loc.y >= self.min_y && loc.y <= self.max_y
    }

    /// Draw a uniform random point inside the box.
    pub fn sample(&self, rng: &mut crate::SimRng) -> Location {
        Location {
            x: rng.gen_range(self.min_x..=self.max_x),
            y: rng.gen_range(self.min_y..=self.max_y),
        }
    }
}
