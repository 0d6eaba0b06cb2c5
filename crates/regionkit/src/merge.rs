//! Normalization of overlapping rectangle lists into disjoint covers.
//!
//! [`merge_rectangles`] runs a left-to-right sweep over the vertical edges of
//! the input. Between two consecutive edge positions the covered rows are
//! coalesced into maximal intervals and emitted as one rectangle each, so
//! the output is a set of vertical slabs ordered by `x`, then by `y`.
//!
//! The output depends only on the covered area and on the set of edge
//! positions of the input. Merging an already merged list together with new
//! rectangles therefore gives the same result as merging every input at
//! once, which is what allows a region to defer normalization.

use regionkit_core::Rect;
use std::collections::btree_map::{BTreeMap, Entry};
use tracing::trace;

/// Edge kind. `End` orders before `Start` at the same `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EdgeKind {
    End,
    Start,
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    x: i32,
    kind: EdgeKind,
    top: i32,
    bottom: i32,
}

/// Merge a possibly overlapping list of rectangles into a disjoint cover.
///
/// Empty rectangles are dropped. When `minimize` is set, rectangles that share
/// a full edge are coalesced until no further join applies.
#[must_use]
pub fn merge_rectangles(rects: &[Rect], minimize: bool) -> Vec<Rect> {
    let mut edges: Vec<Edge> = Vec::with_capacity(rects.len() * 2);

    for r in rects.iter().filter(|r| !r.is_empty()) {
        edges.push(Edge {
            x: r.left(),
            kind: EdgeKind::Start,
            top: r.top(),
            bottom: r.bottom(),
        });
        edges.push(Edge {
            x: r.right(),
            kind: EdgeKind::End,
            top: r.top(),
            bottom: r.bottom(),
        });
    }

    if edges.is_empty() {
        return Vec::new();
    }

    // Stable: equal edges keep input order.
    edges.sort_by_key(|e| (e.x, e.kind));
    let mut last_x = edges[0].x;

    // Multiset of active row intervals, keyed by (top, bottom).
    let mut active: BTreeMap<(i32, i32), usize> = BTreeMap::new();
    let mut merged = Vec::new();

    for edge in &edges {
        if edge.x > last_x && !active.is_empty() {
            emit_slab(&active, last_x, edge.x, &mut merged);
        }

        let key = (edge.top, edge.bottom);
        match edge.kind {
            EdgeKind::Start => *active.entry(key).or_insert(0) += 1,
            EdgeKind::End => {
                if let Entry::Occupied(mut slot) = active.entry(key) {
                    if *slot.get() > 1 {
                        *slot.get_mut() -= 1;
                    } else {
                        slot.remove();
                    }
                }
            }
        }

        last_x = edge.x;
    }

    trace!(
        input = rects.len(),
        output = merged.len(),
        minimize,
        "merged rectangles"
    );

    if minimize {
        minimize_rectangles(merged)
    } else {
        merged
    }
}

/// Emit the coalesced active intervals for the slab `[start_x, end_x)`.
fn emit_slab(active: &BTreeMap<(i32, i32), usize>, start_x: i32, end_x: i32, out: &mut Vec<Rect>) {
    let mut current: Option<(i32, i32)> = None;

    for &(top, bottom) in active.keys() {
        current = match current {
            None => Some((top, bottom)),
            Some((cur_top, cur_bottom)) if top <= cur_bottom => Some((cur_top, cur_bottom.max(bottom))),
            Some((cur_top, cur_bottom)) => {
                out.push(Rect::from_ltrb(start_x, cur_top, end_x, cur_bottom));
                Some((top, bottom))
            }
        };
    }

    if let Some((top, bottom)) = current {
        out.push(Rect::from_ltrb(start_x, top, end_x, bottom));
    }
}

/// Coalesce rectangles that share a full edge, repeating until stable.
///
/// Each pass sorts by `(top, left)` and greedily grows every rectangle by
/// absorbing later ones with the same row span that touch or overlap it
/// horizontally, or the same column span that touch or overlap it
/// vertically.
#[must_use]
pub fn minimize_rectangles(rects: Vec<Rect>) -> Vec<Rect> {
    if rects.len() <= 1 {
        return rects;
    }

    let mut current = rects;

    loop {
        current.sort_by_key(|r| (r.top(), r.left()));

        let mut changed = false;
        let mut minimized = Vec::with_capacity(current.len());
        let mut i = 0;

        while i < current.len() {
            let mut r = current[i];
            let mut j = i + 1;

            while j < current.len() {
                if let Some(joined) = join(&r, &current[j]) {
                    r = joined;
                    current.remove(j);
                    changed = true;
                } else {
                    j += 1;
                }
            }

            minimized.push(r);
            i += 1;
        }

        current = minimized;

        if !changed {
            return current;
        }
    }
}

/// Join two rectangles into one if they span the same rows or columns and
/// touch or overlap along that axis.
fn join(a: &Rect, b: &Rect) -> Option<Rect> {
    let same_rows = a.top() == b.top() && a.bottom() == b.bottom();
    let same_cols = a.left() == b.left() && a.right() == b.right();

    if same_rows && (a.right() == b.left() || b.right() == a.left() || a.intersects(b)) {
        return Some(Rect::from_ltrb(
            a.left().min(b.left()),
            a.top(),
            a.right().max(b.right()),
            a.bottom(),
        ));
    }

    if same_cols && (a.bottom() == b.top() || b.bottom() == a.top() || a.intersects(b)) {
        return Some(Rect::from_ltrb(
            a.left(),
            a.top().min(b.top()),
            a.right(),
            a.bottom().max(b.bottom()),
        ));
    }

    None
}
