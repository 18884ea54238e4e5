//! # Panel Nest 2D
//!
//! Sheet nesting for rectangular panel boards.
//!
//! Boards are placed one at a time onto stock sheets of matching material and
//! thickness. Free space on each sheet is tracked as a list of axis-aligned
//! gaps, recomputed whenever the sheet's boards change, and every candidate
//! placement is checked against the boards already on the sheet.
//!
//! ## Features
//!
//! - Quarter-turn rotations (0°, 90°, 180°, 270°)
//! - Material and thickness matching with a thickness tolerance
//! - Minimum spacing between boards
//! - Utilization-ordered sheet selection
//! - New stock sheets opened on demand
//! - Per-board results and session statistics
//!
//! ## Quick Start
//!
//! ```rust
//! use panel_nest_d2::{NestingConfig, NestingContext, NestingEngine, Rectangle, Sheet};
//!
//! let config = NestingConfig::new().with_min_spacing(5.0);
//! let mut engine = NestingEngine::new(config, NestingContext::new("kitchen")).unwrap();
//!
//! engine
//!     .add_sheet(Sheet::new("S1", 2440.0, 1220.0).with_material("Oak").with_thickness(18.0))
//!     .unwrap();
//!
//! let mut boards = vec![
//!     Rectangle::rectangle("side-left", 720.0, 560.0).with_material("Oak").with_thickness(18.0),
//!     Rectangle::rectangle("side-right", 720.0, 560.0).with_material("Oak").with_thickness(18.0),
//!     Rectangle::rectangle("shelf", 564.0, 540.0).with_material("Oak").with_thickness(18.0),
//! ];
//!
//! let results = engine.nest_boards(&mut boards);
//! assert!(results.iter().all(|r| r.is_success()));
//! assert!(engine.is_valid_nesting());
//!
//! println!("{}", engine.summary());
//! ```
//!
//! ## Boards
//!
//! ```rust
//! use panel_nest_d2::{Rectangle, Rotation};
//!
//! // Axis-aligned board
//! let mut door = Rectangle::rectangle("door", 600.0, 400.0).with_material("Maple");
//! door.place_at(100.0, 100.0, Rotation::Deg90);
//! assert_eq!(door.dimensions_at(door.rotation()), (400.0, 600.0));
//!
//! // Custom outline
//! let corner = Rectangle::new("corner").with_outline(vec![
//!     (0.0, 0.0),
//!     (300.0, 0.0),
//!     (300.0, 100.0),
//!     (100.0, 100.0),
//!     (100.0, 300.0),
//!     (0.0, 300.0),
//! ]);
//! assert_eq!(corner.area(), 50_000.0);
//! ```

pub mod engine;
pub mod gap_calculator;
pub mod rectangle;
pub mod sheet;

// Re-exports
pub use engine::{NestingContext, NestingEngine};
pub use gap_calculator::{GapCalculator, GapFit};
pub use rectangle::Rectangle;
pub use sheet::Sheet;
pub use panel_nest_core::{
    Error, Gap, NestingConfig, NestingSummary, Placement, PlacementResult, Result, Rotation,
    Transform2D, AABB2D, NO_PLACEMENT_REASON,
};
