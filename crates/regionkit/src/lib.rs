//! regionkit: region algebra for terminal user interfaces.
//!
//! A [`Region`] is a 2D area stored as a list of axis-aligned integer
//! rectangles. Rendering code uses it to compute clip and dirty areas:
//! intersect a view's frame with its viewport, exclude what siblings
//! occlude, then test containment or walk the resulting rectangles.
//!
//! - [`subtract`]: band decomposition of `original - cut`
//! - [`merge_rectangles`]: sweep merge of overlapping rectangles into a
//!   disjoint cover, optionally coalesced
//! - [`RegionOp`]: the operators accepted by [`Region::combine`]
//! - [`outline`]: boundary segments of a covered area
//!
//! ```
//! use regionkit::{Rect, Region, RegionOp};
//!
//! let mut dirty = Region::from_rect(Rect::new(0, 0, 4, 4));
//! dirty.combine(&Region::from_rect(Rect::new(2, 2, 4, 4)), RegionOp::Intersect);
//!
//! assert_eq!(dirty.rectangles(), &[Rect::new(2, 2, 2, 2)]);
//! ```

mod error;
mod merge;
mod op;
pub mod outline;
mod region;
mod subtract;

pub use error::{RegionError, Result};
pub use merge::{merge_rectangles, minimize_rectangles};
pub use op::RegionOp;
pub use outline::{Orientation, Segment, MAX_OUTLINE_EXTENT};
pub use region::{Cells, Operand, Region};
pub use regionkit_core::*;
pub use subtract::{subtract, subtract_all};
