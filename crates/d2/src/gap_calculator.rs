//! Free-space search on a sheet.
//!
//! Gaps are found with a corner-origin heuristic: a fixed set of candidate
//! origins is taken from the sides of every placed board and the corners of
//! the sheet, and from each origin the largest free axis-aligned rectangle is
//! grown first to the right, then upward. This does not find every maximal
//! free rectangle, only the ones anchored at those origins, which keeps the
//! search linear in the number of boards per origin. Placements never rely on
//! the gap list alone; the engine checks collisions before accepting one.

use crate::rectangle::Rectangle;
use crate::sheet::Sheet;
use panel_nest_core::config::{DEFAULT_MIN_GAP_SIZE, DEFAULT_MIN_SPACING};
use panel_nest_core::transform::{Rotation, AABB2D};
use panel_nest_core::{Gap, NestingConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Slack for board positions taken from gaps rounded to hundredths (mm).
const ROUNDING_TOLERANCE: f64 = 0.01;

/// Gap search settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GapCalculator {
    /// Clearance kept around every placed board (mm).
    pub min_spacing: f64,
    /// Gaps narrower or shorter than this are dropped (mm).
    pub min_gap_size: f64,
}

impl Default for GapCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SPACING, DEFAULT_MIN_GAP_SIZE)
    }
}

/// Best gap for a board across rotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapFit {
    pub gap: Gap,
    pub rotation: Rotation,
    /// Gap area not covered by the board (mm²).
    pub wasted_area: f64,
}

impl GapCalculator {
    pub fn new(min_spacing: f64, min_gap_size: f64) -> Self {
        Self {
            min_spacing,
            min_gap_size,
        }
    }

    pub fn from_config(config: &NestingConfig) -> Self {
        Self::new(config.min_spacing, config.min_gap_size)
    }

    /// Board size at `rotation` plus spacing on every side.
    pub fn padded_size(&self, board: &Rectangle, rotation: Rotation) -> (f64, f64) {
        let (w, h) = board.dimensions_at(rotation);
        (w + 2.0 * self.min_spacing, h + 2.0 * self.min_spacing)
    }

    /// Finds the free rectangles of `sheet`, largest first.
    ///
    /// The search runs at full precision; values are rounded to hundredths
    /// only when the final gaps are materialised. An empty sheet yields a
    /// single gap covering the whole sheet.
    pub fn find_gaps(&self, sheet: &Sheet) -> Vec<Gap> {
        if sheet.is_empty() {
            return vec![Gap::new(0.0, 0.0, sheet.width(), sheet.height())];
        }

        let obstacles = self.padded_obstacles(sheet);

        let candidates: Vec<AABB2D> = self
            .candidate_origins(sheet)
            .into_iter()
            .filter_map(|(x, y)| self.max_rectangle_from(sheet, &obstacles, x, y))
            .filter(|area| {
                // Origins inside another board's clearance grow over that board
                !obstacles
                    .iter()
                    .any(|o| area.overlaps_interior(&o.expand(-ROUNDING_TOLERANCE)))
            })
            .collect();

        let mut free = remove_contained(candidates);
        free.sort_by(|a, b| b.area().total_cmp(&a.area()));
        free.into_iter()
            .map(|a| Gap::new(a.min_x, a.min_y, a.width(), a.height()))
            .collect()
    }

    /// Placed board bounds grown by the spacing.
    fn padded_obstacles(&self, sheet: &Sheet) -> Vec<AABB2D> {
        sheet
            .boards()
            .iter()
            .filter(|b| b.is_positioned())
            .filter_map(Rectangle::placed_bounds)
            .map(|b| b.expand(self.min_spacing))
            .collect()
    }

    /// Origin points beside every board plus the four sheet corners.
    fn candidate_origins(&self, sheet: &Sheet) -> Vec<(f64, f64)> {
        let s = self.min_spacing;
        let g = self.min_gap_size;
        let mut origins = Vec::with_capacity(sheet.board_count() * 4 + 4);

        for bounds in sheet
            .boards()
            .iter()
            .filter(|b| b.is_positioned())
            .filter_map(Rectangle::placed_bounds)
        {
            let (x, y) = (bounds.min_x, bounds.min_y);
            origins.push((bounds.max_x + s, y)); // right
            origins.push((x, bounds.max_y + s)); // top
            origins.push((x - g - s, y)); // left
            origins.push((x, y - g - s)); // bottom
        }

        let (w, h) = (sheet.width(), sheet.height());
        origins.push((0.0, 0.0));
        origins.push((w - g, 0.0));
        origins.push((0.0, h - g));
        origins.push((w - g, h - g));

        origins
    }

    /// Grows the largest free rectangle anchored at `(x, y)`.
    fn max_rectangle_from(
        &self,
        sheet: &Sheet,
        obstacles: &[AABB2D],
        x: f64,
        y: f64,
    ) -> Option<AABB2D> {
        if x < 0.0 || y < 0.0 || x >= sheet.width() || y >= sheet.height() {
            return None;
        }

        let width = self.max_width_from(sheet, obstacles, x, y);
        if width < self.min_gap_size {
            return None;
        }

        let height = self.max_height_from(sheet, obstacles, x, y, width);
        if height < self.min_gap_size {
            return None;
        }

        Some(AABB2D::from_origin_size(x, y, width, height))
    }

    /// Distance to the first obstacle crossing the horizontal ray from `(x, y)`.
    fn max_width_from(&self, sheet: &Sheet, obstacles: &[AABB2D], x: f64, y: f64) -> f64 {
        let mut max_width = sheet.width() - x;

        for o in obstacles {
            let crosses_ray =
                y >= o.min_y && y <= o.max_y && x + max_width >= o.min_x && x <= o.max_x;
            let board_x = o.min_x + self.min_spacing;
            if crosses_ray && board_x > x {
                max_width = max_width.min(board_x - x - self.min_spacing);
            }
        }

        max_width
    }

    /// Height available above `(x, y)` for a gap of the given width.
    fn max_height_from(
        &self,
        sheet: &Sheet,
        obstacles: &[AABB2D],
        x: f64,
        y: f64,
        width: f64,
    ) -> f64 {
        let mut max_height = sheet.height() - y;

        for o in obstacles {
            let column = AABB2D::from_origin_size(x, y, width, max_height);
            let board_y = o.min_y + self.min_spacing;
            if column.intersects(o) && board_y > y {
                max_height = max_height.min(board_y - y - self.min_spacing);
            }
        }

        max_height
    }

    /// Gaps from `gaps` that hold the padded board, in order.
    pub fn fitting_gaps<'a>(
        &self,
        gaps: &'a [Gap],
        board: &Rectangle,
        rotation: Rotation,
    ) -> impl Iterator<Item = &'a Gap> + 'a {
        let (w, h) = self.padded_size(board, rotation);
        gaps.iter().filter(move |g| g.fits(w, h))
    }

    /// First gap on `sheet` that holds the padded board at `rotation`.
    pub fn find_gap_for_board(
        &self,
        sheet: &Sheet,
        board: &Rectangle,
        rotation: Rotation,
    ) -> Option<Gap> {
        let gaps = self.find_gaps(sheet);
        let first = self.fitting_gaps(&gaps, board, rotation).next().copied();
        first
    }

    /// Gap and rotation that leave the least unused gap area.
    pub fn find_best_gap(
        &self,
        sheet: &Sheet,
        board: &Rectangle,
        rotations: &[Rotation],
    ) -> Option<GapFit> {
        let board_area = board.width() * board.height();
        let mut best: Option<GapFit> = None;

        for &rotation in rotations {
            let Some(gap) = self.find_gap_for_board(sheet, board, rotation) else {
                continue;
            };
            let wasted_area = gap.area - board_area;
            if best.map_or(true, |b| wasted_area < b.wasted_area) {
                best = Some(GapFit {
                    gap,
                    rotation,
                    wasted_area,
                });
            }
        }

        best
    }

    /// Checks a gap against the sheet: large enough, on the sheet and clear
    /// of every placed board.
    pub fn gap_is_valid(&self, gap: &Gap, sheet: &Sheet) -> bool {
        if gap.width < self.min_gap_size || gap.height < self.min_gap_size {
            return false;
        }
        if !sheet.within_bounds(gap.x, gap.y, gap.width, gap.height) {
            return false;
        }

        let area = gap.aabb();
        !sheet
            .boards()
            .iter()
            .filter(|b| b.is_positioned())
            .filter_map(Rectangle::placed_bounds)
            .any(|b| area.intersects(&b))
    }
}

/// Drops duplicates and rectangles lying entirely inside another one.
fn remove_contained(areas: Vec<AABB2D>) -> Vec<AABB2D> {
    let mut unique: Vec<AABB2D> = Vec::with_capacity(areas.len());
    for area in areas {
        if !unique.contains(&area) {
            unique.push(area);
        }
    }

    unique
        .iter()
        .enumerate()
        .filter(|&(i, inner)| {
            !unique
                .iter()
                .enumerate()
                .any(|(j, outer)| i != j && outer.contains(inner))
        })
        .map(|(_, area)| *area)
        .collect()
}
