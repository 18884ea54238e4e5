//! Stock sheets holding placed boards.

use crate::gap_calculator::GapCalculator;
use crate::rectangle::{classification_key, Rectangle};
use panel_nest_core::config::{DEFAULT_FULL_THRESHOLD, DEFAULT_THICKNESS_TOLERANCE};
use panel_nest_core::transform::Rotation;
use panel_nest_core::{Error, Gap, Result};
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular stock panel onto which boards are nested.
///
/// The sheet does not check collisions or bounds when a board is added; the
/// engine validates every placement before calling [`Sheet::add_board`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sheet {
    id: String,

    /// Width in mm.
    width: f64,

    /// Height in mm.
    height: f64,

    /// Material name, `None` accepts any material.
    material: Option<String>,

    /// Thickness in mm, `None` accepts any thickness.
    thickness: Option<f64>,

    /// Placed boards, in placement order.
    boards: Vec<Rectangle>,

    /// Settings used to compute the gap cache.
    gap_calculator: GapCalculator,

    /// Free regions, computed on first access after a change.
    #[cfg_attr(feature = "serde", serde(skip))]
    gaps: OnceLock<Vec<Gap>>,
}

impl Sheet {
    /// Creates an empty sheet.
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            material: None,
            thickness: None,
            boards: Vec::new(),
            gap_calculator: GapCalculator::default(),
            gaps: OnceLock::new(),
        }
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = Some(thickness);
        self
    }

    /// Sets the gap settings used by [`Sheet::gaps`].
    pub fn with_gap_calculator(mut self, calculator: GapCalculator) -> Self {
        self.set_gap_calculator(calculator);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    pub fn thickness(&self) -> Option<f64> {
        self.thickness
    }

    pub fn gap_calculator(&self) -> &GapCalculator {
        &self.gap_calculator
    }

    /// Replaces the gap settings, dropping cached gaps if they changed.
    pub fn set_gap_calculator(&mut self, calculator: GapCalculator) {
        if self.gap_calculator != calculator {
            self.gap_calculator = calculator;
            self.invalidate_gaps();
        }
    }

    // Board management

    pub fn boards(&self) -> &[Rectangle] {
        &self.boards
    }

    pub fn board(&self, id: &str) -> Option<&Rectangle> {
        self.boards.iter().find(|b| b.id() == id)
    }

    pub fn contains_board(&self, id: &str) -> bool {
        self.board(id).is_some()
    }

    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Adds a board; returns false if a board with the same id is present.
    pub fn add_board(&mut self, board: Rectangle) -> bool {
        if self.contains_board(board.id()) {
            return false;
        }
        self.boards.push(board);
        self.invalidate_gaps();
        true
    }

    /// Removes the board with the given id; returns whether it was present.
    pub fn remove_board(&mut self, id: &str) -> bool {
        let Some(index) = self.boards.iter().position(|b| b.id() == id) else {
            return false;
        };
        self.boards.remove(index);
        self.invalidate_gaps();
        true
    }

    // Area utilization

    /// Sum of placed board areas (mm²).
    pub fn used_area(&self) -> f64 {
        self.boards.iter().map(Rectangle::area).sum()
    }

    pub fn available_area(&self) -> f64 {
        self.area() - self.used_area()
    }

    /// Used area divided by sheet area, 0 for a zero-area sheet.
    pub fn utilization(&self) -> f64 {
        let area = self.area();
        if area == 0.0 {
            return 0.0;
        }
        self.used_area() / area
    }

    /// Utilization as a percentage rounded to 2 decimals.
    pub fn utilization_percentage(&self) -> f64 {
        (self.utilization() * 10_000.0).round() / 100.0
    }

    /// Returns true once utilization reaches `threshold`.
    pub fn is_full(&self, threshold: f64) -> bool {
        self.utilization() >= threshold
    }

    /// [`is_full`](Self::is_full) at the standard 95% threshold.
    pub fn is_full_default(&self) -> bool {
        self.is_full(DEFAULT_FULL_THRESHOLD)
    }

    /// Returns true if a `width` x `height` rectangle at `(x, y)` lies on the
    /// sheet. Touching the far edges is allowed.
    pub fn within_bounds(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        if x < 0.0 || y < 0.0 {
            return false;
        }
        x + width <= self.width && y + height <= self.height
    }

    // Material & thickness matching

    pub fn matches_material(&self, material: Option<&str>) -> bool {
        match (self.material.as_deref(), material) {
            (Some(mine), Some(theirs)) => mine == theirs,
            _ => true,
        }
    }

    pub fn matches_thickness(&self, thickness: Option<f64>, tolerance: f64) -> bool {
        match (self.thickness, thickness) {
            (Some(mine), Some(theirs)) => (mine - theirs).abs() < tolerance,
            _ => true,
        }
    }

    /// Material and thickness compatibility using the 0.5 mm tolerance.
    pub fn matches_board(&self, board: &Rectangle) -> bool {
        self.matches_board_within(board, DEFAULT_THICKNESS_TOLERANCE)
    }

    pub fn matches_board_within(&self, board: &Rectangle, tolerance: f64) -> bool {
        self.matches_material(board.material())
            && self.matches_thickness(board.thickness(), tolerance)
    }

    // Gap management

    /// Free regions of the sheet, largest first.
    ///
    /// Computed on the first call after the board list changes and served
    /// from the cache afterwards.
    pub fn gaps(&self) -> &[Gap] {
        self.gaps.get_or_init(|| {
            let gaps = self.gap_calculator.find_gaps(self);
            log::debug!(
                "Computed {} gaps for sheet {} ({} boards)",
                gaps.len(),
                self.id,
                self.boards.len()
            );
            gaps
        })
    }

    /// Returns true if the gap cache is current.
    pub fn has_cached_gaps(&self) -> bool {
        self.gaps.get().is_some()
    }

    /// Drops the gap cache.
    pub fn invalidate_gaps(&mut self) {
        self.gaps = OnceLock::new();
    }

    pub fn largest_gap(&self) -> Option<&Gap> {
        self.gaps()
            .iter()
            .max_by(|a, b| a.area.total_cmp(&b.area))
    }

    /// Returns true if some gap holds the board's bare (unpadded) size.
    pub fn has_gap_for_board(&self, board: &Rectangle, rotation: Rotation) -> bool {
        let (w, h) = board.dimensions_at(rotation);
        self.gaps().iter().any(|g| g.fits(w, h))
    }

    /// First cached gap that holds the board plus spacing on every side.
    pub fn find_gap_for_board(&self, board: &Rectangle, rotation: Rotation) -> Option<&Gap> {
        let (w, h) = self.gap_calculator.padded_size(board, rotation);
        self.gaps().iter().find(|g| g.fits(w, h))
    }

    /// Quick feasibility check: compatible, enough free area and a gap large
    /// enough for the board.
    pub fn can_fit(&self, board: &Rectangle, rotation: Rotation) -> bool {
        self.matches_board(board)
            && board.area() <= self.available_area()
            && self.has_gap_for_board(board, rotation)
    }

    /// Material/thickness key, e.g. `Oak_18.0`.
    pub fn classification_key(&self) -> String {
        classification_key(self.material.as_deref(), self.thickness)
    }

    // Validation

    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.width > 0.0) {
            errors.push("Width is zero or invalid".to_string());
        }
        if !(self.height > 0.0) {
            errors.push("Height is zero or invalid".to_string());
        }
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidSheet(format!(
                "sheet '{}': {}",
                self.id,
                errors.join(", ")
            )))
        }
    }
}
