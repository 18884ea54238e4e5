//! Error types for panel nesting.

use thiserror::Error;

/// Result type alias using the nesting [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the nesting crates.
///
/// Expected nesting outcomes (a board that does not fit, a malformed board in a
/// batch) are reported through `PlacementResult` instead; these variants carry
/// the reason text for such results and signal contract violations elsewhere.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The board outline or dimensions are unusable.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The sheet dimensions are unusable.
    #[error("invalid sheet: {0}")]
    InvalidSheet(String),

    /// A rotation other than 0, 90, 180 or 270 degrees was requested.
    #[error("invalid rotation: {0} degrees (expected 0, 90, 180 or 270)")]
    InvalidRotation(i32),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An operation needed session context that was not supplied.
    #[error("missing context: {0}")]
    MissingContext(String),

    /// Unexpected internal state.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns true for errors caused by caller input rather than engine state.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidGeometry(_) | Self::InvalidSheet(_) | Self::InvalidConfig(_)
        )
    }
}
