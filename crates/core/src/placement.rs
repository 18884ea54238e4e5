//! Placement records and free-space gaps.

use crate::transform::{Rotation, AABB2D};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position and rotation of a board on a sheet.
///
/// `(x, y)` is the minimum corner of the board's rotated bounding box in sheet
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub rotation: Rotation,
}

impl Placement {
    pub fn new(x: f64, y: f64, rotation: Rotation) -> Self {
        Self { x, y, rotation }
    }

    /// Placement at the sheet origin without rotation.
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, Rotation::Deg0)
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Rounds to two decimals (millimetre hundredths).
pub fn round_mm(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A free rectangular region on a sheet.
///
/// Gaps are derived values: they are recomputed from the sheet's placed boards
/// whenever the board list changes and are never stored elsewhere.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gap {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub area: f64,
}

impl Gap {
    /// Materialises a gap, rounding every value to two decimals.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: round_mm(x),
            y: round_mm(y),
            width: round_mm(width),
            height: round_mm(height),
            area: round_mm(width * height),
        }
    }

    pub fn aabb(&self) -> AABB2D {
        AABB2D::from_origin_size(self.x, self.y, self.width, self.height)
    }

    /// Returns true if a `width` x `height` rectangle fits inside.
    pub fn fits(&self, width: f64, height: f64) -> bool {
        self.width >= width && self.height >= height
    }

    /// Returns true if `other` lies entirely within this gap.
    pub fn contains(&self, other: &Gap) -> bool {
        self.aabb().contains(&other.aabb())
    }
}

impl std::fmt::Display for Gap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.0} x {:.0} mm at ({:.0}, {:.0})",
            self.width, self.height, self.x, self.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gap_rounding() {
        let gap = Gap::new(10.004, 20.006, 100.5, 50.0);
        assert_relative_eq!(gap.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(gap.y, 20.01, epsilon = 1e-9);
        assert_relative_eq!(gap.width, 100.5, epsilon = 1e-9);
        assert_relative_eq!(gap.area, 5025.0, epsilon = 1e-9);
    }

    #[test]
    fn test_gap_full_sheet() {
        let gap = Gap::new(0.0, 0.0, 2440.0, 1220.0);
        assert_relative_eq!(gap.area, 2_976_800.0);
    }

    #[test]
    fn test_gap_fits_and_contains() {
        let outer = Gap::new(0.0, 0.0, 500.0, 300.0);
        let inner = Gap::new(100.0, 0.0, 400.0, 300.0);
        assert!(outer.fits(500.0, 300.0));
        assert!(!outer.fits(500.01, 300.0));
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn test_placement_origin() {
        let p = Placement::origin();
        assert_eq!(p.position(), (0.0, 0.0));
        assert_eq!(p.rotation, Rotation::Deg0);
    }
}
