//! Boundary extraction: the edges separating covered from uncovered cells.

use regionkit_core::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Regions whose bounds exceed this extent in either dimension fall back to
/// per-rectangle boundaries instead of rasterizing a cell grid.
pub const MAX_OUTLINE_EXTENT: i32 = 1000;

/// Direction of a boundary segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Runs along `x` at a fixed `y`.
    Horizontal,
    /// Runs along `y` at a fixed `x`.
    Vertical,
}

/// A straight boundary segment in lattice coordinates.
///
/// Lattice point `(x, y)` is the top-left corner of cell `(x, y)`, so the
/// outline of `Rect::new(0, 0, 3, 2)` runs from `(0, 0)` to `(3, 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// First lattice point of the segment.
    pub start: Point,
    /// Number of cell edges covered.
    pub length: i32,
    /// Direction.
    pub orientation: Orientation,
}

impl Segment {
    /// Create a horizontal segment.
    #[must_use]
    pub const fn horizontal(x: i32, y: i32, length: i32) -> Self {
        Self {
            start: Point::new(x, y),
            length,
            orientation: Orientation::Horizontal,
        }
    }

    /// Create a vertical segment.
    #[must_use]
    pub const fn vertical(x: i32, y: i32, length: i32) -> Self {
        Self {
            start: Point::new(x, y),
            length,
            orientation: Orientation::Vertical,
        }
    }

    /// Last lattice point of the segment.
    #[must_use]
    pub const fn end(&self) -> Point {
        match self.orientation {
            Orientation::Horizontal => self.start.offset(self.length, 0),
            Orientation::Vertical => self.start.offset(0, self.length),
        }
    }
}

/// Compute the outer boundary of the area covered by `rects`.
///
/// Horizontal segments come first, top to bottom, then vertical segments,
/// left to right. Collinear runs are joined into maximal segments.
#[must_use]
pub fn outline(rects: &[Rect]) -> Vec<Segment> {
    let bounds = rects.iter().fold(Rect::EMPTY, |acc, r| acc.union(r));

    if bounds.is_empty() {
        return Vec::new();
    }

    if bounds.width > MAX_OUTLINE_EXTENT || bounds.height > MAX_OUTLINE_EXTENT {
        return rect_boundaries(rects);
    }

    let grid = CellGrid::rasterize(bounds, rects);
    let mut segments = Vec::new();

    for y in 0..=grid.height {
        let mut run: Option<i32> = None;
        for x in 0..=grid.width {
            let edge = x < grid.width && grid.get(x, y - 1) != grid.get(x, y);
            match (edge, run) {
                (true, None) => run = Some(x),
                (false, Some(start)) => {
                    segments.push(Segment::horizontal(
                        bounds.left() + start,
                        bounds.top() + y,
                        x - start,
                    ));
                    run = None;
                }
                _ => {}
            }
        }
    }

    for x in 0..=grid.width {
        let mut run: Option<i32> = None;
        for y in 0..=grid.height {
            let edge = y < grid.height && grid.get(x - 1, y) != grid.get(x, y);
            match (edge, run) {
                (true, None) => run = Some(y),
                (false, Some(start)) => {
                    segments.push(Segment::vertical(
                        bounds.left() + x,
                        bounds.top() + start,
                        y - start,
                    ));
                    run = None;
                }
                _ => {}
            }
        }
    }

    segments
}

/// The four sides of every rectangle, without joining or removing shared
/// edges.
fn rect_boundaries(rects: &[Rect]) -> Vec<Segment> {
    rects
        .iter()
        .filter(|r| !r.is_empty())
        .flat_map(|r| {
            [
                Segment::horizontal(r.left(), r.top(), r.width),
                Segment::horizontal(r.left(), r.bottom(), r.width),
                Segment::vertical(r.left(), r.top(), r.height),
                Segment::vertical(r.right(), r.top(), r.height),
            ]
        })
        .collect()
}

/// Covered cells of the bounding box, row-major.
struct CellGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl CellGrid {
    fn rasterize(bounds: Rect, rects: &[Rect]) -> Self {
        let mut grid = Self {
            width: bounds.width,
            height: bounds.height,
            cells: vec![false; bounds.width as usize * bounds.height as usize],
        };

        for r in rects.iter().filter_map(|r| r.intersection(&bounds)) {
            for y in r.top()..r.bottom() {
                let row = (y - bounds.top()) as usize * grid.width as usize;
                for x in r.left()..r.right() {
                    grid.cells[row + (x - bounds.left()) as usize] = true;
                }
            }
        }

        grid
    }

    /// Coverage of a grid cell; anything outside the grid is uncovered.
    fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_length(segments: &[Segment]) -> i32 {
        segments.iter().map(|s| s.length).sum()
    }

    #[test]
    fn test_empty_outline() {
        assert!(outline(&[]).is_empty());
        assert!(outline(&[Rect::EMPTY]).is_empty());
    }

    #[test]
    fn test_single_rect_outline() {
        let segments = outline(&[Rect::new(0, 0, 3, 2)]);
        assert_eq!(
            segments,
            vec![
                Segment::horizontal(0, 0, 3),
                Segment::horizontal(0, 2, 3),
                Segment::vertical(0, 0, 2),
                Segment::vertical(3, 0, 2),
            ]
        );
    }

    #[test]
    fn test_adjacent_rects_share_no_inner_edge() {
        let segments = outline(&[Rect::new(5, 5, 2, 2), Rect::new(7, 5, 2, 2)]);
        assert_eq!(
            segments,
            vec![
                Segment::horizontal(5, 5, 4),
                Segment::horizontal(5, 7, 4),
                Segment::vertical(5, 5, 2),
                Segment::vertical(9, 5, 2),
            ]
        );
    }

    #[test]
    fn test_l_shape_outline() {
        let segments = outline(&[Rect::new(0, 0, 2, 1), Rect::new(0, 1, 1, 1)]);
        assert_eq!(
            segments,
            vec![
                Segment::horizontal(0, 0, 2),
                Segment::horizontal(1, 1, 1),
                Segment::horizontal(0, 2, 1),
                Segment::vertical(0, 0, 2),
                Segment::vertical(1, 1, 1),
                Segment::vertical(2, 0, 1),
            ]
        );
        assert_eq!(total_length(&segments), 8);
    }

    #[test]
    fn test_ring_outline_length() {
        let ring = [
            Rect::new(1, 0, 3, 1),
            Rect::new(0, 1, 1, 3),
            Rect::new(4, 1, 1, 3),
            Rect::new(1, 4, 3, 1),
        ];
        assert_eq!(total_length(&outline(&ring)), 32);
    }

    #[test]
    fn test_large_bounds_fall_back_to_rect_sides() {
        let segments = outline(&[Rect::new(0, 0, 2000, 10)]);
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[1], Segment::horizontal(0, 10, 2000));
    }

    #[test]
    fn test_segment_end() {
        assert_eq!(Segment::horizontal(1, 2, 5).end(), Point::new(6, 2));
        assert_eq!(Segment::vertical(1, 2, 5).end(), Point::new(1, 7));
    }
}
