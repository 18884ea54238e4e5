//! Nesting configuration.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default clearance between boards (mm).
pub const DEFAULT_MIN_SPACING: f64 = 5.0;
/// Smallest gap worth reporting (mm).
pub const DEFAULT_MIN_GAP_SIZE: f64 = 100.0;
/// Standard stock sheet width (mm).
pub const DEFAULT_SHEET_WIDTH: f64 = 2440.0;
/// Standard stock sheet height (mm).
pub const DEFAULT_SHEET_HEIGHT: f64 = 1220.0;
/// Utilization at which a sheet stops accepting boards.
pub const DEFAULT_FULL_THRESHOLD: f64 = 0.95;
/// Allowed thickness difference between a board and a sheet (mm).
pub const DEFAULT_THICKNESS_TOLERANCE: f64 = 0.5;

/// Configuration for a nesting session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NestingConfig {
    /// Try all four quarter turns instead of the original orientation only.
    pub allow_rotation: bool,

    /// Open a new sheet when no existing sheet accepts a board.
    pub create_new_sheets: bool,

    /// Fill the most utilized sheets first (false spreads boards out).
    pub prefer_existing_sheets: bool,

    /// Minimum clearance between boards (mm).
    pub min_spacing: f64,

    /// Smallest usable gap edge (mm).
    pub min_gap_size: f64,

    /// Order candidate sheets by utilization.
    pub optimize_utilization: bool,

    /// Utilization (0.0 - 1.0) at which a sheet counts as full.
    pub full_threshold: f64,

    /// Width of sheets created on demand (mm).
    pub default_sheet_width: f64,

    /// Height of sheets created on demand (mm).
    pub default_sheet_height: f64,

    /// Thickness tolerance used when matching boards to sheets (mm).
    pub thickness_tolerance: f64,
}

impl Default for NestingConfig {
    fn default() -> Self {
        Self {
            allow_rotation: true,
            create_new_sheets: true,
            prefer_existing_sheets: true,
            min_spacing: DEFAULT_MIN_SPACING,
            min_gap_size: DEFAULT_MIN_GAP_SIZE,
            optimize_utilization: true,
            full_threshold: DEFAULT_FULL_THRESHOLD,
            default_sheet_width: DEFAULT_SHEET_WIDTH,
            default_sheet_height: DEFAULT_SHEET_HEIGHT,
            thickness_tolerance: DEFAULT_THICKNESS_TOLERANCE,
        }
    }
}

impl NestingConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rotation(mut self, allow: bool) -> Self {
        self.allow_rotation = allow;
        self
    }

    pub fn with_new_sheets(mut self, create: bool) -> Self {
        self.create_new_sheets = create;
        self
    }

    pub fn with_prefer_existing_sheets(mut self, prefer: bool) -> Self {
        self.prefer_existing_sheets = prefer;
        self
    }

    pub fn with_min_spacing(mut self, spacing: f64) -> Self {
        self.min_spacing = spacing;
        self
    }

    pub fn with_min_gap_size(mut self, size: f64) -> Self {
        self.min_gap_size = size;
        self
    }

    pub fn with_optimize_utilization(mut self, optimize: bool) -> Self {
        self.optimize_utilization = optimize;
        self
    }

    /// Sets the full threshold, clamped to 0.0 - 1.0.
    pub fn with_full_threshold(mut self, threshold: f64) -> Self {
        self.full_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Sets the size of sheets created on demand.
    pub fn with_default_sheet_size(mut self, width: f64, height: f64) -> Self {
        self.default_sheet_width = width;
        self.default_sheet_height = height;
        self
    }

    pub fn with_thickness_tolerance(mut self, tolerance: f64) -> Self {
        self.thickness_tolerance = tolerance;
        self
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_spacing >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "min_spacing must be non-negative, got {}",
                self.min_spacing
            )));
        }
        if !(self.min_gap_size > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "min_gap_size must be positive, got {}",
                self.min_gap_size
            )));
        }
        if !(self.full_threshold > 0.0 && self.full_threshold <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "full_threshold must be in (0, 1], got {}",
                self.full_threshold
            )));
        }
        if !(self.default_sheet_width > 0.0 && self.default_sheet_height > 0.0) {
            return Err(Error::InvalidConfig(
                "default sheet dimensions must be positive".into(),
            ));
        }
        if !(self.thickness_tolerance >= 0.0) {
            return Err(Error::InvalidConfig(
                "thickness_tolerance must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
