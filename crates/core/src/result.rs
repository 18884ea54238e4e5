//! Placement outcomes and session summaries.

use crate::placement::{Gap, Placement};
use crate::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Failure reason reported when no sheet, rotation or gap accepts a board.
pub const NO_PLACEMENT_REASON: &str = "No suitable placement found";

/// Outcome of one board placement attempt.
///
/// Failures are ordinary values: a batch keeps going after a board fails.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlacementResult {
    /// The board was placed on a sheet.
    Placed {
        board_id: String,
        /// Index of the sheet in the engine's sheet list.
        sheet_index: usize,
        sheet_id: String,
        /// Gap the board was placed in.
        gap: Gap,
        placement: Placement,
        /// Whether the sheet was created for this board.
        new_sheet: bool,
    },
    /// The board could not be placed.
    Failed { board_id: String, reason: String },
}

impl PlacementResult {
    /// Failure with an explicit reason.
    pub fn failed(board_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failed {
            board_id: board_id.into(),
            reason: reason.into(),
        }
    }

    /// Failure because no candidate placement was valid.
    pub fn no_placement(board_id: impl Into<String>) -> Self {
        Self::failed(board_id, NO_PLACEMENT_REASON)
    }

    /// Failure carrying an error's message.
    pub fn from_error(board_id: impl Into<String>, error: &Error) -> Self {
        Self::failed(board_id, error.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }

    pub fn board_id(&self) -> &str {
        match self {
            Self::Placed { board_id, .. } | Self::Failed { board_id, .. } => board_id,
        }
    }

    /// True only for successful placements on a freshly created sheet.
    pub fn is_new_sheet(&self) -> bool {
        matches!(
            self,
            Self::Placed {
                new_sheet: true,
                ..
            }
        )
    }

    pub fn placement(&self) -> Option<&Placement> {
        match self {
            Self::Placed { placement, .. } => Some(placement),
            Self::Failed { .. } => None,
        }
    }

    pub fn sheet_index(&self) -> Option<usize> {
        match self {
            Self::Placed { sheet_index, .. } => Some(*sheet_index),
            Self::Failed { .. } => None,
        }
    }

    pub fn gap(&self) -> Option<&Gap> {
        match self {
            Self::Placed { gap, .. } => Some(gap),
            Self::Failed { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Placed { .. } => None,
            Self::Failed { reason, .. } => Some(reason),
        }
    }
}

impl std::fmt::Display for PlacementResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Placed {
                board_id,
                sheet_id,
                placement,
                new_sheet,
                ..
            } => write!(
                f,
                "{board_id}: placed on {sheet_id} at ({:.0}, {:.0}) @ {}{}",
                placement.x,
                placement.y,
                placement.rotation,
                if *new_sheet { " (new sheet)" } else { "" }
            ),
            Self::Failed { board_id, reason } => write!(f, "{board_id}: {reason}"),
        }
    }
}

/// Summary statistics for a nesting session.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NestingSummary {
    pub sheet_count: usize,
    pub new_sheets_created: usize,
    pub boards_processed: usize,
    pub boards_nested: usize,
    pub boards_failed: usize,
    /// Mean sheet utilization as a percentage, rounded to 2 decimals.
    pub average_utilization_percent: f64,
    /// Total placed board area (mm²).
    pub total_area_used: f64,
    /// Total sheet area (mm²).
    pub total_area_available: f64,
}

impl NestingSummary {
    /// Returns true if every processed board was placed.
    pub fn all_nested(&self) -> bool {
        self.boards_failed == 0
    }
}

impl std::fmt::Display for NestingSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Sheets: {} ({} new)", self.sheet_count, self.new_sheets_created)?;
        writeln!(
            f,
            "Boards: {} processed, {} nested, {} failed",
            self.boards_processed, self.boards_nested, self.boards_failed
        )?;
        write!(
            f,
            "Utilization: {:.2}% average, {:.0} of {:.0} mm² used",
            self.average_utilization_percent, self.total_area_used, self.total_area_available
        )
    }
}
