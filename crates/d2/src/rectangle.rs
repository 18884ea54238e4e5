//! 2D board projections.

use geo::{Area, Centroid, Coord, Euclidean, Length, LineString, Polygon as GeoPolygon};
use panel_nest_core::geom::polygon as geom_polygon;
use panel_nest_core::transform::{Rotation, Transform2D, AABB2D};
use panel_nest_core::{Error, Placement, Result};
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A board projected onto the sheet plane.
///
/// The outline is stored in local coordinates and never changes shape when
/// the board is placed; placement only records where the rotated bounding box
/// lands on a sheet. The `id` is the caller's handle for the board and is what
/// sheets use to recognise it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rectangle {
    /// Caller-supplied identity.
    id: String,

    /// Closed outline in local coordinates (mm).
    outline: Vec<(f64, f64)>,

    /// Material name, `None` when unknown.
    material: Option<String>,

    /// Thickness in mm, `None` when unknown.
    thickness: Option<f64>,

    /// Position and rotation once nested.
    placement: Option<Placement>,

    /// Cached local bounding box.
    #[cfg_attr(feature = "serde", serde(skip))]
    cached_bounds: OnceLock<Option<AABB2D>>,
}

impl Rectangle {
    /// Creates an unplaced board with an empty outline.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            outline: Vec::new(),
            material: None,
            thickness: None,
            placement: None,
            cached_bounds: OnceLock::new(),
        }
    }

    /// Creates an axis-aligned `width` x `height` board with its corner at the origin.
    pub fn rectangle(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self::new(id).with_outline(vec![
            (0.0, 0.0),
            (width, 0.0),
            (width, height),
            (0.0, height),
        ])
    }

    /// Sets the outline from a list of (x, y) vertices.
    pub fn with_outline(mut self, points: Vec<(f64, f64)>) -> Self {
        self.set_outline(points);
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = Some(thickness);
        self
    }

    /// Replaces the outline; the bounding box is recomputed on next use.
    pub fn set_outline(&mut self, points: Vec<(f64, f64)>) {
        self.outline = points;
        self.cached_bounds = OnceLock::new();
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn outline(&self) -> &[(f64, f64)] {
        &self.outline
    }

    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    pub fn thickness(&self) -> Option<f64> {
        self.thickness
    }

    /// Local bounding box, `None` for an empty outline.
    pub fn bounds(&self) -> Option<AABB2D> {
        *self
            .cached_bounds
            .get_or_init(|| geom_polygon::bounds(&self.outline))
    }

    pub fn width(&self) -> f64 {
        self.bounds().map_or(0.0, |b| b.width())
    }

    pub fn height(&self) -> f64 {
        self.bounds().map_or(0.0, |b| b.height())
    }

    /// Bounding box size after applying `rotation`.
    pub fn dimensions_at(&self, rotation: Rotation) -> (f64, f64) {
        rotation.apply_to_size(self.width(), self.height())
    }

    /// Unsigned area of the local outline, 0 for fewer than 3 points.
    pub fn area(&self) -> f64 {
        if self.outline.len() < 3 {
            return 0.0;
        }
        self.to_geo_polygon().unsigned_area()
    }

    /// Length of the closed local outline.
    pub fn perimeter(&self) -> f64 {
        if self.outline.len() < 2 {
            return 0.0;
        }
        self.to_geo_polygon().exterior().length::<Euclidean>()
    }

    /// Center of the local bounding box.
    pub fn center(&self) -> (f64, f64) {
        self.bounds().map_or((0.0, 0.0), |b| b.center())
    }

    /// Area centroid of the local outline.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.outline.len() < 3 {
            return None;
        }
        self.to_geo_polygon().centroid().map(|p| (p.x(), p.y()))
    }

    /// Converts the local outline to a geo crate Polygon.
    pub fn to_geo_polygon(&self) -> GeoPolygon<f64> {
        let exterior = LineString::from(
            self.outline
                .iter()
                .map(|&(x, y)| Coord { x, y })
                .collect::<Vec<_>>(),
        );
        GeoPolygon::new(exterior, vec![])
    }

    /// Records the board's position and rotation on a sheet.
    pub fn place_at(&mut self, x: f64, y: f64, rotation: Rotation) {
        self.placement = Some(Placement::new(x, y, rotation));
    }

    /// Like [`place_at`](Self::place_at) with the rotation in degrees.
    ///
    /// # Panics
    /// Panics if `degrees` is not one of 0, 90, 180 or 270.
    pub fn place_at_degrees(&mut self, x: f64, y: f64, degrees: i32) {
        match Rotation::from_degrees(degrees) {
            Ok(rotation) => self.place_at(x, y, rotation),
            Err(e) => panic!("{e}"),
        }
    }

    /// Clears the placement.
    pub fn reset_position(&mut self) {
        self.placement = None;
    }

    pub fn is_positioned(&self) -> bool {
        self.placement.is_some()
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        self.placement.map(|p| p.position())
    }

    /// Current rotation; unplaced boards report no rotation.
    pub fn rotation(&self) -> Rotation {
        self.placement.map_or(Rotation::Deg0, |p| p.rotation)
    }

    /// Transform from local to sheet coordinates, if placed.
    pub fn transform(&self) -> Option<Transform2D> {
        let placement = self.placement?;
        let local = self.bounds()?;
        Some(Transform2D::placement(
            placement.x,
            placement.y,
            placement.rotation,
            &local,
        ))
    }

    /// Outline in sheet coordinates when placed, local coordinates otherwise.
    pub fn placed_outline(&self) -> Vec<(f64, f64)> {
        match self.transform() {
            Some(t) => t.transform_points(&self.outline),
            None => self.outline.clone(),
        }
    }

    /// Bounding box of [`placed_outline`](Self::placed_outline).
    pub fn placed_bounds(&self) -> Option<AABB2D> {
        let local = self.bounds()?;
        match self.placement {
            Some(p) => {
                let (w, h) = p.rotation.apply_to_size(local.width(), local.height());
                Some(AABB2D::from_origin_size(p.x, p.y, w, h))
            }
            None => Some(local),
        }
    }

    /// Ray-casting test against the local (untransformed) outline.
    ///
    /// Points on minimum-side edges count as inside and points on
    /// maximum-side edges as outside; see [`geom_polygon::contains_point`].
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        geom_polygon::contains_point(&self.outline, (x, y))
    }

    /// Approximate overlap test between two boards in sheet coordinates.
    ///
    /// Rejects on disjoint bounding boxes, then reports an overlap if any
    /// vertex of either outline lies inside the other. Crossings where no
    /// vertex is inside the other polygon (a plus sign laid through a square)
    /// are not detected.
    pub fn overlaps_with(&self, other: &Rectangle) -> bool {
        let (Some(b1), Some(b2)) = (self.placed_bounds(), other.placed_bounds()) else {
            return false;
        };
        if !b1.intersects(&b2) {
            return false;
        }

        let mine = self.placed_outline();
        let theirs = other.placed_outline();

        mine.iter()
            .any(|&p| geom_polygon::contains_point(&theirs, p))
            || theirs
                .iter()
                .any(|&p| geom_polygon::contains_point(&mine, p))
    }

    /// Material/thickness key, e.g. `Oak_18.0`.
    pub fn classification_key(&self) -> String {
        classification_key(self.material.as_deref(), self.thickness)
    }

    /// Lists everything that makes the board unusable for nesting.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.outline.is_empty() {
            errors.push("No outline points".to_string());
        } else if self.outline.len() < 3 {
            errors.push("Outline has less than 3 points".to_string());
        }
        if self
            .outline
            .iter()
            .any(|&(x, y)| !x.is_finite() || !y.is_finite())
        {
            errors.push("Outline has non-finite coordinates".to_string());
        }
        if self.area() <= 0.0 {
            errors.push("Zero area".to_string());
        }
        if self.width() <= 0.0 || self.height() <= 0.0 {
            errors.push("Non-positive dimensions".to_string());
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }

    /// Validates the board and returns an error describing every problem.
    pub fn validate(&self) -> Result<()> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidGeometry(format!(
                "board '{}': {}",
                self.id,
                errors.join(", ")
            )))
        }
    }
}

/// Formats a material/thickness pair as `Material_Thickness`.
pub(crate) fn classification_key(material: Option<&str>, thickness: Option<f64>) -> String {
    format!(
        "{}_{:?}",
        material.unwrap_or("nil"),
        thickness.unwrap_or(0.0)
    )
}
