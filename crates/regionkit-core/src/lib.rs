//! Core geometry types for the regionkit region engine.
//!
//! This crate provides the integer primitives every region operation is
//! expressed in:
//! - [`Point`]: a cell coordinate
//! - [`Size`]: a width/height pair
//! - [`Rect`]: an axis-aligned rectangle, empty when either dimension is
//!   non-positive

mod geometry;

pub use geometry::{Point, Rect, Size};
