//! Axis-aligned bounds, quarter-turn rotations and placement transforms.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 2D axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AABB2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl AABB2D {
    /// Creates a new AABB from its corners.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates an AABB from an origin and a size.
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Computes the AABB of a set of points, `None` if empty.
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        let (&(x0, y0), rest) = points.split_first()?;
        let mut aabb = Self::new(x0, y0, x0, y0);
        for &(x, y) in rest {
            aabb.min_x = aabb.min_x.min(x);
            aabb.min_y = aabb.min_y.min(y);
            aabb.max_x = aabb.max_x.max(x);
            aabb.max_y = aabb.max_y.max(y);
        }
        Some(aabb)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Grows the box by `amount` on every side.
    pub fn expand(&self, amount: f64) -> Self {
        Self::new(
            self.min_x - amount,
            self.min_y - amount,
            self.max_x + amount,
            self.max_y + amount,
        )
    }

    /// Closed intersection test: boxes sharing only an edge intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.max_x < other.min_x
            || self.min_x > other.max_x
            || self.max_y < other.min_y
            || self.min_y > other.max_y)
    }

    /// Open intersection test: boxes sharing only an edge do not intersect.
    pub fn overlaps_interior(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// Returns true if `other` lies entirely within this box (edges may touch).
    pub fn contains(&self, other: &Self) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && self.max_x >= other.max_x
            && self.max_y >= other.max_y
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Quarter-turn rotation applied to a board on a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// All rotations in trial order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Parses a rotation in degrees.
    ///
    /// Only 0, 90, 180 and 270 are accepted; anything else is a contract
    /// violation reported as [`Error::InvalidRotation`].
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(Error::InvalidRotation(other)),
        }
    }

    pub fn degrees(&self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    pub fn radians(&self) -> f64 {
        f64::from(self.degrees()).to_radians()
    }

    /// Returns true if the rotation exchanges width and height.
    pub fn swaps_dimensions(&self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    /// Applies the rotation to `(width, height)`.
    pub fn apply_to_size(&self, width: f64, height: f64) -> (f64, f64) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Rotates a point counter-clockwise about the origin.
    ///
    /// Quarter turns are exact, so no trigonometry is involved.
    pub fn rotate_point(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Self::Deg0 => (x, y),
            Self::Deg90 => (-y, x),
            Self::Deg180 => (-x, -y),
            Self::Deg270 => (y, -x),
        }
    }

    /// Rotations to try for a board: all four, or only the identity.
    pub fn candidates(allow_rotation: bool) -> &'static [Rotation] {
        if allow_rotation {
            &Self::ALL
        } else {
            &Self::ALL[..1]
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = Error;

    fn try_from(degrees: i32) -> Result<Self> {
        Self::from_degrees(degrees)
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Rotation about the local origin followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform2D {
    pub tx: f64,
    pub ty: f64,
    pub rotation: Rotation,
}

impl Transform2D {
    pub fn identity() -> Self {
        Self::translation(0.0, 0.0)
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            tx,
            ty,
            rotation: Rotation::Deg0,
        }
    }

    pub fn rotation(rotation: Rotation) -> Self {
        Self {
            tx: 0.0,
            ty: 0.0,
            rotation,
        }
    }

    /// Builds the transform that rotates a shape with local bounds `local`
    /// and moves the rotated bounds' minimum corner onto `(x, y)`.
    pub fn placement(x: f64, y: f64, rotation: Rotation, local: &AABB2D) -> Self {
        let corners = [
            rotation.rotate_point(local.min_x, local.min_y),
            rotation.rotate_point(local.max_x, local.min_y),
            rotation.rotate_point(local.max_x, local.max_y),
            rotation.rotate_point(local.min_x, local.max_y),
        ];
        let min_x = corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
        let min_y = corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);

        Self {
            tx: x - min_x,
            ty: y - min_y,
            rotation,
        }
    }

    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        let (rx, ry) = self.rotation.rotate_point(x, y);
        (rx + self.tx, ry + self.ty)
    }

    pub fn transform_points(&self, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
        points
            .iter()
            .map(|&(x, y)| self.transform_point(x, y))
            .collect()
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}
