//! Polygon helpers operating on `(x, y)` vertex slices.
//!
//! Polygons are implicitly closed: the last vertex connects back to the first,
//! and the first vertex is not repeated at the end.

use crate::transform::AABB2D;

/// Ray-casting point-in-polygon test.
///
/// Boundary points follow the half-open crossing rule: a point on an edge
/// facing the minimum side (left or bottom of an axis-aligned rectangle) is
/// inside, a point on an edge facing the maximum side is outside.
pub fn contains_point(vertices: &[(f64, f64)], point: (f64, f64)) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let (x, y) = point;
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];

        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Axis-aligned bounds of the vertices, or `None` for an empty slice.
pub fn bounds(vertices: &[(f64, f64)]) -> Option<AABB2D> {
    AABB2D::from_points(vertices)
}
