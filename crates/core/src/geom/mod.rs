//! Plain-slice geometry primitives shared by the nesting crates.

pub mod polygon;
