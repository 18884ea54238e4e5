//! # Panel Nest Core
//!
//! Core types shared by the panel sheet nesting crates.
//!
//! This crate holds the pieces that do not depend on how boards and sheets are
//! stored: errors, configuration, quarter-turn rotations, bounding boxes,
//! polygon primitives and placement outcomes.
//!
//! ## Core Components
//!
//! - **Geometry**: [`geom::polygon`] (ray-cast point containment, bounds), [`AABB2D`]
//! - **Transforms**: [`Rotation`], [`Transform2D`]
//! - **Placement data**: [`Placement`], [`Gap`], [`PlacementResult`], [`NestingSummary`]
//! - **Configuration**: [`NestingConfig`]
//!
//! ## Configuration
//!
//! ```rust
//! use panel_nest_core::NestingConfig;
//!
//! let config = NestingConfig::new()
//!     .with_rotation(true)
//!     .with_min_spacing(5.0)
//!     .with_min_gap_size(100.0);
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod config;
pub mod error;
pub mod geom;
pub mod placement;
pub mod result;
pub mod transform;

// Re-exports
pub use config::NestingConfig;
pub use error::{Error, Result};
pub use placement::{round_mm, Gap, Placement};
pub use result::{NestingSummary, PlacementResult, NO_PLACEMENT_REASON};
pub use transform::{Rotation, Transform2D, AABB2D};
