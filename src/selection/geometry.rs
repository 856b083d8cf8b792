//! Path geometry: bounding boxes and a ray-parity inside test.

use std::collections::HashSet;

use super::grid::{offset, Location, CARDINAL};

/// Axis-aligned bounds of a point set, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_row: isize,
    pub max_row: isize,
    pub min_col: isize,
    pub max_col: isize,
}

impl BoundingBox {
    pub fn from_points(points: &[Location]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let mut bounds = BoundingBox {
            min_row: first.0,
            max_row: first.0,
            min_col: first.1,
            max_col: first.1,
        };
        for &(row, col) in rest {
            bounds.min_row = bounds.min_row.min(row);
            bounds.max_row = bounds.max_row.max(row);
            bounds.min_col = bounds.min_col.min(col);
            bounds.max_col = bounds.max_col.max(col);
        }
        Some(bounds)
    }

    /// Strict containment: a location on the box border is outside.
    pub fn strictly_contains(&self, loc: Location) -> bool {
        self.min_row < loc.0 && loc.0 < self.max_row && self.min_col < loc.1 && loc.1 < self.max_col
    }

    /// Extent product. Over-estimates the area a path encloses; only used to
    /// rank candidate paths against each other.
    pub fn area(&self) -> isize {
        (self.max_row - self.min_row) * (self.max_col - self.min_col)
    }
}

/// Ray-parity test against a pixel path.
///
/// A location on the path is outside. Otherwise each of the four axis rays
/// (left, right, up, down) counts the path pixels it passes through; an odd
/// count on any ray means inside. Runs of path pixels lying along a ray count
/// once per pixel, so flat stretches parallel to an axis can mislead a single
/// ray; checking all four keeps the common cases right.
pub fn is_inside_path(loc: Location, path: &[Location]) -> bool {
    if path.contains(&loc) {
        return false;
    }
    let (row, col) = loc;
    let left = path.iter().filter(|p| p.0 == row && p.1 < col).count();
    let right = path.iter().filter(|p| p.0 == row && p.1 > col).count();
    let up = path.iter().filter(|p| p.1 == col && p.0 < row).count();
    let down = path.iter().filter(|p| p.1 == col && p.0 > row).count();

    [left, right, up, down].iter().any(|crossings| crossings % 2 == 1)
}

/// First cardinal neighbor of the path's start that lies inside the path.
pub fn point_inside_path(path: &[Location]) -> Option<Location> {
    let &start = path.first()?;
    CARDINAL
        .iter()
        .map(|&delta| offset(start, delta, 1))
        .find(|&candidate| is_inside_path(candidate, path))
}

pub(crate) fn point_set(points: &[Location]) -> HashSet<Location> {
    points.iter().copied().collect()
}
