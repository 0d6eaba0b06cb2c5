//! The [`Region`] type: an area stored as a list of rectangles.
//!
//! A region keeps its rectangles in insertion order together with a
//! normalization tag. [`RegionOp::Union`] only appends and marks the list
//! pending; the sweep merge runs the next time the decomposition is
//! observed. Every other mutation normalizes first, so its result never
//! depends on when the deferred merge happens.
//!
//! Queries that do not depend on the decomposition (containment, bounds,
//! emptiness) read the raw list directly. Queries that expose it either
//! take `&mut self` and cache ([`Region::rectangles`]) or work on a
//! temporary normalized view ([`Region::to_rectangles`], `==`, hashing,
//! serialization).

use crate::merge::merge_rectangles;
use crate::op::RegionOp;
use crate::outline::{self, Segment};
use crate::subtract::subtract_all;
use regionkit_core::{Point, Rect};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::hash::{Hash, Hasher};
use tracing::trace;

/// Whether the stored rectangles are a disjoint cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Normalization {
    #[default]
    Normalized,
    Pending,
}

/// Right-hand side of a region operation.
///
/// `Operand::None` stands for an absent operand and behaves exactly like
/// the empty region.
#[derive(Debug, Clone, Copy, Default)]
pub enum Operand<'a> {
    /// No operand.
    #[default]
    None,
    /// A single rectangle. Empty rectangles behave like the empty region.
    Rect(Rect),
    /// Another region.
    Region(&'a Region),
}

impl<'a> Operand<'a> {
    /// The operand's area as a disjoint rectangle list.
    fn rectangles(&self) -> Cow<'a, [Rect]> {
        match *self {
            Self::None => Cow::Borrowed(&[]),
            Self::Rect(r) if r.is_empty() => Cow::Borrowed(&[]),
            Self::Rect(r) => Cow::Owned(vec![r]),
            Self::Region(region) => region.normalized(),
        }
    }

    /// Whether the operand covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Rect(r) => r.is_empty(),
            Self::Region(region) => region.is_empty(),
        }
    }
}

impl From<Rect> for Operand<'_> {
    fn from(rect: Rect) -> Self {
        Self::Rect(rect)
    }
}

impl<'a> From<&'a Region> for Operand<'a> {
    fn from(region: &'a Region) -> Self {
        Self::Region(region)
    }
}

impl From<Option<Rect>> for Operand<'_> {
    fn from(rect: Option<Rect>) -> Self {
        rect.map_or(Self::None, Self::Rect)
    }
}

impl<'a> From<Option<&'a Region>> for Operand<'a> {
    fn from(region: Option<&'a Region>) -> Self {
        region.map_or(Self::None, Self::Region)
    }
}

/// A 2D area represented as a set of axis-aligned rectangles.
///
/// # Examples
///
/// ```
/// use regionkit::{Rect, Region};
///
/// let mut clip = Region::from_rect(Rect::new(10, 10, 50, 50));
/// clip.exclude(Rect::new(20, 20, 20, 20));
///
/// assert!(!clip.contains_point(25, 25));
/// assert!(clip.contains_point(15, 15));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Region {
    rects: Vec<Rect>,
    state: Normalization,
}

impl Region {
    /// Create an empty region.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a region covering one rectangle. An empty rectangle yields the
    /// empty region.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        let mut region = Self::new();
        if !rect.is_empty() {
            region.rects.push(rect);
        }
        region
    }

    /// Create a region from the union of many rectangles.
    #[must_use]
    pub fn from_rects(rects: impl IntoIterator<Item = Rect>) -> Self {
        rects.into_iter().collect()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Combine `operand` into this region.
    ///
    /// An empty or absent operand leaves the region unchanged for
    /// [`RegionOp::Union`], [`RegionOp::MinimalUnion`], [`RegionOp::Difference`]
    /// and [`RegionOp::Xor`], and empties it for every other operator.
    pub fn combine<'a>(&mut self, operand: impl Into<Operand<'a>>, op: RegionOp) {
        let others = operand.into().rectangles();

        if others.is_empty() {
            if !op.empty_operand_is_identity() {
                self.clear();
            }
            trace!(%op, rects = self.rects.len(), "combined with empty operand");
            return;
        }

        match op {
            RegionOp::Union => {
                self.rects.extend_from_slice(&others);
                self.state = Normalization::Pending;
            }
            RegionOp::MinimalUnion => {
                self.rects.extend_from_slice(&others);
                self.rects = merge_rectangles(&self.rects, true);
                self.state = Normalization::Normalized;
            }
            RegionOp::Intersect => {
                self.normalize();
                self.rects = intersect_all(&self.rects, &others);
            }
            RegionOp::Difference => {
                self.normalize();
                self.rects = difference(&self.rects, &others);
            }
            RegionOp::Xor => {
                self.normalize();
                let mut rects = difference(&self.rects, &others);
                rects.extend(difference(&others, &self.rects));
                self.rects = rects;
            }
            RegionOp::ReverseDifference => {
                self.normalize();
                self.rects = difference(&others, &self.rects);
            }
            RegionOp::Replace => {
                self.rects = others.into_owned();
                self.state = Normalization::Normalized;
            }
        }

        trace!(%op, rects = self.rects.len(), pending = self.is_pending(), "combined region");
    }

    /// Add the operand's area. Normalization is deferred.
    pub fn union<'a>(&mut self, operand: impl Into<Operand<'a>>) {
        self.combine(operand, RegionOp::Union);
    }

    /// Add the operand's area and coalesce the result immediately.
    pub fn minimal_union<'a>(&mut self, operand: impl Into<Operand<'a>>) {
        self.combine(operand, RegionOp::MinimalUnion);
    }

    /// Keep only the area also covered by the operand.
    pub fn intersect<'a>(&mut self, operand: impl Into<Operand<'a>>) {
        self.combine(operand, RegionOp::Intersect);
    }

    /// Remove the operand's area.
    pub fn difference<'a>(&mut self, operand: impl Into<Operand<'a>>) {
        self.combine(operand, RegionOp::Difference);
    }

    /// Remove the operand's area. Same as [`Region::difference`].
    pub fn exclude<'a>(&mut self, operand: impl Into<Operand<'a>>) {
        self.combine(operand, RegionOp::Difference);
    }

    /// Keep the area covered by exactly one of the region and the operand.
    pub fn xor<'a>(&mut self, operand: impl Into<Operand<'a>>) {
        self.combine(operand, RegionOp::Xor);
    }

    /// Replace the region with the operand minus the region.
    pub fn reverse_difference<'a>(&mut self, operand: impl Into<Operand<'a>>) {
        self.combine(operand, RegionOp::ReverseDifference);
    }

    /// Replace the region with the operand's area.
    pub fn replace<'a>(&mut self, operand: impl Into<Operand<'a>>) {
        self.combine(operand, RegionOp::Replace);
    }

    /// Replace the region with the part of `bounds` it does not cover.
    ///
    /// Empty `bounds` or an empty region leave the region empty.
    pub fn complement(&mut self, bounds: Rect) {
        if bounds.is_empty() || self.is_empty() {
            self.clear();
            return;
        }

        self.normalize();
        self.rects = difference(&[bounds], &self.rects);
        trace!(%bounds, rects = self.rects.len(), "complemented region");
    }

    /// Replace the region with the part of `bounds` not covered by `region`.
    ///
    /// Empty `bounds` or an empty `region` leave this region empty.
    pub fn complement_region(&mut self, bounds: Rect, region: &Self) {
        if bounds.is_empty() || region.is_empty() {
            self.clear();
            return;
        }

        self.rects = difference(&[bounds], &region.normalized());
        self.state = Normalization::Normalized;
        trace!(%bounds, rects = self.rects.len(), "complemented against region");
    }

    /// Shift every rectangle by the given offset.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }

        for rect in &mut self.rects {
            *rect = rect.translate(dx, dy);
        }
    }

    /// Remove all area.
    pub fn clear(&mut self) {
        self.rects.clear();
        self.state = Normalization::Normalized;
    }

    /// Run any deferred merge now.
    pub fn normalize(&mut self) {
        if self.is_pending() {
            let before = self.rects.len();
            self.rects = merge_rectangles(&self.rects, false);
            self.state = Normalization::Normalized;
            trace!(before, after = self.rects.len(), "normalized region");
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether a merge is waiting to run.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state == Normalization::Pending
    }

    /// Whether the region covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.iter().all(Rect::is_empty)
    }

    /// Smallest rectangle enclosing the region; [`Rect::EMPTY`] when empty.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.rects.iter().fold(Rect::EMPTY, |acc, r| acc.union(r))
    }

    /// Whether the cell at `(x, y)` is covered.
    #[must_use]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.contains(Point::new(x, y))
    }

    /// Whether `point` is covered.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.rects.iter().any(|r| r.contains_point(point))
    }

    /// Whether every cell of `rect` is covered, possibly by several
    /// rectangles together. An empty `rect` is never contained.
    #[must_use]
    pub fn contains_rect(&self, rect: Rect) -> bool {
        if rect.is_empty() {
            return false;
        }

        let mut uncovered = vec![rect];
        for &r in &self.rects {
            uncovered = subtract_all(&uncovered, r);
            if uncovered.is_empty() {
                return true;
            }
        }

        false
    }

    /// The disjoint decomposition, normalizing and caching first.
    pub fn rectangles(&mut self) -> &[Rect] {
        self.normalize();
        &self.rects
    }

    /// The disjoint decomposition, without touching the cache.
    #[must_use]
    pub fn to_rectangles(&self) -> Vec<Rect> {
        self.normalized().into_owned()
    }

    /// Number of rectangles in the disjoint decomposition.
    #[must_use]
    pub fn len(&self) -> usize {
        self.normalized().len()
    }

    /// Number of covered cells.
    #[must_use]
    pub fn area(&self) -> i64 {
        self.normalized().iter().map(Rect::area).sum()
    }

    /// Iterate every covered cell, row-major within each rectangle of the
    /// disjoint decomposition.
    #[must_use]
    pub fn cells(&self) -> Cells<'_> {
        Cells::new(self.normalized())
    }

    /// Boundary segments of the covered area.
    #[must_use]
    pub fn outline(&self) -> Vec<Segment> {
        outline::outline(&self.normalized())
    }

    fn normalized(&self) -> Cow<'_, [Rect]> {
        match self.state {
            Normalization::Normalized => Cow::Borrowed(&self.rects),
            Normalization::Pending => Cow::Owned(merge_rectangles(&self.rects, false)),
        }
    }
}

/// Pairwise intersections, region rectangle outer, operand rectangle inner.
fn intersect_all(rects: &[Rect], others: &[Rect]) -> Vec<Rect> {
    rects
        .iter()
        .flat_map(|a| others.iter().filter_map(move |b| a.intersection(b)))
        .collect()
}

/// `rects` minus every rectangle of `cuts`, in order.
fn difference(rects: &[Rect], cuts: &[Rect]) -> Vec<Rect> {
    let mut fragments = rects.to_vec();
    for &cut in cuts {
        if fragments.is_empty() {
            break;
        }
        fragments = subtract_all(&fragments, cut);
    }
    fragments
}

impl PartialEq for Region {
    /// Regions are equal when their normalized decompositions match. All
    /// empty regions are equal.
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Region {}

impl Hash for Region {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

impl FromIterator<Rect> for Region {
    fn from_iter<I: IntoIterator<Item = Rect>>(iter: I) -> Self {
        let mut region = Self::new();
        region.extend(iter);
        region
    }
}

impl Extend<Rect> for Region {
    fn extend<I: IntoIterator<Item = Rect>>(&mut self, iter: I) {
        for rect in iter {
            self.union(rect);
        }
    }
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.normalized().iter())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rects = Vec::<Rect>::deserialize(deserializer)?;
        Ok(rects.into_iter().collect())
    }
}

/// Iterator over the covered cells of a region. See [`Region::cells`].
#[derive(Debug, Clone)]
pub struct Cells<'a> {
    rects: Cow<'a, [Rect]>,
    index: usize,
    next: Option<Point>,
}

impl<'a> Cells<'a> {
    fn new(rects: Cow<'a, [Rect]>) -> Self {
        let next = rects.first().map(Rect::origin);
        Self {
            rects,
            index: 0,
            next,
        }
    }
}

impl Iterator for Cells<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let rect = self.rects[self.index];

        self.next = if current.x + 1 < rect.right() {
            Some(Point::new(current.x + 1, current.y))
        } else if current.y + 1 < rect.bottom() {
            Some(Point::new(rect.left(), current.y + 1))
        } else {
            self.index += 1;
            self.rects.get(self.index).map(Rect::origin)
        };

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_region_is_empty() {
        let region = Region::new();
        assert!(region.is_empty());
        assert!(!region.is_pending());
        assert_eq!(region.bounds(), Rect::EMPTY);
        assert_eq!(region.len(), 0);
    }

    #[test]
    fn test_from_empty_rect_is_empty() {
        for r in [Rect::new(0, 0, 0, 0), Rect::new(0, 0, 0, 10), Rect::new(10, 10, -5, -5)] {
            let mut region = Region::from_rect(r);
            assert!(region.is_empty());
            assert!(region.rectangles().is_empty());
        }
    }

    #[test]
    fn test_union_defers_normalization() {
        let mut region = Region::from_rect(Rect::new(0, 0, 4, 4));
        region.union(Rect::new(2, 2, 4, 4));
        assert!(region.is_pending());

        // Decomposition-independent queries do not normalize.
        assert!(region.contains_point(5, 5));
        assert_eq!(region.bounds(), Rect::new(0, 0, 6, 6));
        assert!(region.is_pending());

        assert_eq!(
            region.rectangles(),
            &[Rect::new(0, 0, 2, 4), Rect::new(2, 0, 2, 6), Rect::new(4, 2, 2, 4)]
        );
        assert!(!region.is_pending());
    }

    #[test]
    fn test_to_rectangles_leaves_cache_alone() {
        let mut region = Region::new();
        region.union(Rect::new(0, 0, 2, 2));
        region.union(Rect::new(0, 0, 2, 2));
        assert_eq!(region.to_rectangles(), vec![Rect::new(0, 0, 2, 2)]);
        assert!(region.is_pending());
    }

    #[test]
    fn test_minimal_union_normalizes_immediately() {
        let mut region = Region::from_rect(Rect::new(0, 0, 5, 5));
        region.minimal_union(Rect::new(5, 0, 5, 5));
        assert!(!region.is_pending());
        assert_eq!(region.rectangles(), &[Rect::new(0, 0, 10, 5)]);
    }

    #[test]
    fn test_operand_none_behaves_as_empty() {
        let mut region = Region::from_rect(Rect::new(0, 0, 10, 10));
        region.union(Operand::None);
        region.difference(Option::<&Region>::None);
        assert_eq!(region, Region::from_rect(Rect::new(0, 0, 10, 10)));

        region.intersect(Option::<Rect>::None);
        assert!(region.is_empty());
    }

    #[test]
    fn test_operand_is_empty() {
        assert!(Operand::None.is_empty());
        assert!(Operand::from(Rect::EMPTY).is_empty());
        assert!(Operand::from(&Region::new()).is_empty());
        assert!(!Operand::from(Rect::new(0, 0, 1, 1)).is_empty());
    }

    #[test]
    fn test_difference_after_pending_union() {
        let mut region = Region::new();
        region.union(Rect::new(0, 0, 4, 2));
        region.union(Rect::new(0, 0, 4, 2));
        region.difference(Rect::new(1, 0, 2, 2));
        assert_eq!(
            region.rectangles(),
            &[Rect::new(0, 0, 1, 2), Rect::new(3, 0, 1, 2)]
        );
    }

    #[test]
    fn test_translate_keeps_state() {
        let mut region = Region::from_rect(Rect::new(0, 0, 2, 2));
        region.union(Rect::new(1, 1, 2, 2));
        region.translate(10, -10);
        assert!(region.is_pending());
        assert!(region.contains_point(12, -8));
        assert!(!region.contains_point(0, 0));
    }

    #[test]
    fn test_cells_iterates_every_covered_cell() {
        let mut region = Region::from_rect(Rect::new(0, 0, 2, 2));
        region.union(Rect::new(5, 5, 1, 1));
        let cells: Vec<Point> = region.cells().collect();
        assert_eq!(
            cells,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(5, 5),
            ]
        );
        assert_eq!(Region::new().cells().count(), 0);
    }

    #[test]
    fn test_hash_matches_eq() {
        use std::collections::hash_map::DefaultHasher;

        fn hash_of(region: &Region) -> u64 {
            let mut hasher = DefaultHasher::new();
            region.hash(&mut hasher);
            hasher.finish()
        }

        let mut lazy = Region::new();
        lazy.union(Rect::new(0, 0, 3, 3));
        lazy.union(Rect::new(1, 1, 3, 3));

        let mut eager = lazy.clone();
        eager.normalize();

        assert_eq!(lazy, eager);
        assert_eq!(hash_of(&lazy), hash_of(&eager));
    }

    #[test]
    fn test_serde_roundtrip_normalizes() {
        let mut region = Region::new();
        region.union(Rect::new(0, 0, 2, 2));
        region.union(Rect::new(0, 0, 2, 2));

        let json = serde_json::to_string(&region).expect("serialize");
        assert_eq!(json, r#"[{"x":0,"y":0,"width":2,"height":2}]"#);

        let back: Region = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, region);
    }
}
