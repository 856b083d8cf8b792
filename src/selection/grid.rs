//! Raster addressing shared by the tracing components.
//!
//! Locations are signed `(row, col)` pairs so that neighbor arithmetic may
//! step off the grid; every lookup goes through [`index`], which turns an
//! out-of-bounds location into `None` instead of a panic.

use ndarray::{Array2, ArrayBase, Data, Ix2};

/// `(row, col)` in raster index space.
pub type Location = (isize, isize);

/// Cardinal directions in seek order: east, south, west, north.
pub const CARDINAL: [Location; 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Fill expansion order: up, down, left, right.
pub const FILL_NEIGHBORS: [Location; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Moore neighborhood (8-connected, clockwise from east)
pub const MOORE: [Location; 8] = [
    (0, 1),   // E
    (1, 1),   // SE
    (1, 0),   // S
    (1, -1),  // SW
    (0, -1),  // W
    (-1, -1), // NW
    (-1, 0),  // N
    (-1, 1),  // NE
];

#[inline]
pub fn offset(loc: Location, delta: Location, steps: isize) -> Location {
    (loc.0 + delta.0 * steps, loc.1 + delta.1 * steps)
}

/// Convert a location to an array index, `None` when outside `dim`.
#[inline]
pub fn index(loc: Location, dim: (usize, usize)) -> Option<(usize, usize)> {
    let (row, col) = loc;
    if row < 0 || col < 0 {
        return None;
    }
    let (row, col) = (row as usize, col as usize);
    if row < dim.0 && col < dim.1 {
        Some((row, col))
    } else {
        None
    }
}

/// Bounds-checked read.
#[inline]
pub fn lookup<S, T>(grid: &ArrayBase<S, Ix2>, loc: Location) -> Option<T>
where
    S: Data<Elem = T>,
    T: Copy,
{
    index(loc, grid.dim()).map(|idx| grid[idx])
}

/// Widen an integer slice (CT and MR data usually arrive as `i16`/`u16`)
/// to the `f32` intensities the tracer reads.
pub fn to_intensity<S, T>(grid: &ArrayBase<S, Ix2>) -> Array2<f32>
where
    S: Data<Elem = T>,
    T: Copy + Into<f32>,
{
    grid.mapv(Into::into)
}

/// True when the two locations are equal or 8-adjacent.
#[inline]
pub fn touches(a: Location, b: Location) -> bool {
    (a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1
}
