//! Rectangle subtraction: band decomposition of `original - cut`.
//!
//! The result is at most four disjoint fragments emitted in a fixed order:
//!
//! ```text
//!   +-----------------------+
//!   |          top          |
//!   +------+--------+-------+
//!   | left |  cut   | right |
//!   +------+--------+-------+
//!   |        bottom         |
//!   +-----------------------+
//! ```
//!
//! Top and bottom bands span the full width of `original`; left and right
//! bands are restricted to the rows of the overlap. Callers (difference,
//! complement, area containment) depend on this exact shape and order.

use regionkit_core::Rect;

/// Compute `original - cut` as 0 to 4 disjoint rectangles.
///
/// - empty `original` yields nothing
/// - empty or non-overlapping `cut` yields `original` unchanged
/// - otherwise the top, bottom, left and right bands around the overlap,
///   in that order, skipping empty bands
#[must_use]
pub fn subtract(original: Rect, cut: Rect) -> Vec<Rect> {
    if original.is_empty() {
        return Vec::new();
    }

    let Some(ix) = original.intersection(&cut) else {
        return vec![original];
    };

    let mut fragments = Vec::with_capacity(4);

    if original.top() < ix.top() {
        fragments.push(Rect::from_ltrb(
            original.left(),
            original.top(),
            original.right(),
            ix.top(),
        ));
    }

    if ix.bottom() < original.bottom() {
        fragments.push(Rect::from_ltrb(
            original.left(),
            ix.bottom(),
            original.right(),
            original.bottom(),
        ));
    }

    if original.left() < ix.left() {
        fragments.push(Rect::from_ltrb(
            original.left(),
            ix.top(),
            ix.left(),
            ix.bottom(),
        ));
    }

    if ix.right() < original.right() {
        fragments.push(Rect::from_ltrb(
            ix.right(),
            ix.top(),
            original.right(),
            ix.bottom(),
        ));
    }

    fragments
}

/// Subtract `cut` from every fragment, keeping fragment order.
#[must_use]
pub fn subtract_all(fragments: &[Rect], cut: Rect) -> Vec<Rect> {
    fragments
        .iter()
        .flat_map(|&fragment| subtract(fragment, cut))
        .collect()
}
