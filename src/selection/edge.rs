//! Edge classification and outward seed search.
//!
//! An edge pixel is an in-band pixel with at least one 4-connected neighbor
//! that is out of band or off the raster. The seeker walks the four cardinal
//! rays from a click and reports the first edge pixel on each.

use ndarray::{Array2, ArrayView2, Axis};
use rayon::prelude::*;

use super::grid::{index, lookup, offset, Location, CARDINAL};
use crate::config::ThresholdBand;

#[inline]
fn in_band(loc: Location, band: ThresholdBand, raster: ArrayView2<f32>) -> Option<bool> {
    lookup(&raster, loc).map(|value| band.contains(value))
}

/// Check whether `loc` is an edge pixel under `band`.
///
/// Off-raster locations are never edges; off-raster neighbors count as out of
/// band, so in-band pixels on the raster border are always edges.
pub fn is_edge(loc: Location, band: ThresholdBand, raster: ArrayView2<f32>) -> bool {
    if in_band(loc, band, raster) != Some(true) {
        return false;
    }
    CARDINAL
        .iter()
        .any(|&delta| in_band(offset(loc, delta, 1), band, raster) != Some(true))
}

/// Classify every pixel of the raster. Rows are processed in parallel.
pub fn edge_mask(band: ThresholdBand, raster: ArrayView2<f32>) -> Array2<bool> {
    let mut mask = Array2::from_elem(raster.dim(), false);

    mask.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(row, mut line)| {
            for (col, cell) in line.iter_mut().enumerate() {
                *cell = is_edge((row as isize, col as isize), band, raster);
            }
        });

    mask
}

/// First edge pixel along `direction`, scanning steps `1..max_dist`.
///
/// Returns the hit and the number of steps it took. The scan ends at the
/// raster border whatever `max_dist` is.
pub fn find_edge(
    start: Location,
    direction: Location,
    max_dist: usize,
    band: ThresholdBand,
    raster: ArrayView2<f32>,
) -> Option<(Location, usize)> {
    (1..max_dist)
        .map(|step| (offset(start, direction, step as isize), step))
        .take_while(|&(candidate, _)| index(candidate, raster.dim()).is_some())
        .find(|&(candidate, _)| is_edge(candidate, band, raster))
}

/// Collect edge seeds around `start`.
///
/// One seed per cardinal direction at most. When the click itself is out of
/// band (typically inside a thin ring of in-band pixels), each direction gets
/// a second scan from its first hit, limited to the distance that hit took,
/// so the far wall of the ring is picked up too. Duplicates are kept.
pub fn find_edges(
    start: Location,
    max_dist: usize,
    band: ThresholdBand,
    raster: ArrayView2<f32>,
) -> Vec<Location> {
    let Some(start_in_band) = in_band(start, band, raster) else {
        return Vec::new();
    };

    let mut seeds = Vec::with_capacity(8);
    for &direction in CARDINAL.iter() {
        let Some((first, steps)) = find_edge(start, direction, max_dist, band, raster) else {
            continue;
        };
        seeds.push(first);
        if !start_in_band {
            if let Some((second, _)) = find_edge(first, direction, steps, band, raster) {
                seeds.push(second);
            }
        }
    }
    seeds
}

#[cfg(test)]
mod tests {
    use super::*;

    const IN: f32 = 500.0;
    const OUT: f32 = 0.0;

    fn band() -> ThresholdBand {
        ThresholdBand { lo: 400.0, hi: 600.0 }
    }

    /// Out-of-band background with an in-band square ring of the given
    /// corners and thickness.
    fn ring_raster(size: usize, lo: usize, hi: usize, thickness: usize) -> Array2<f32> {
        Array2::from_shape_fn((size, size), |(r, c)| {
            let inside_outer = (lo..=hi).contains(&r) && (lo..=hi).contains(&c);
            let inside_inner = (lo + thickness..=hi - thickness).contains(&r)
                && (lo + thickness..=hi - thickness).contains(&c);
            if inside_outer && !inside_inner {
                IN
            } else {
                OUT
            }
        })
    }

    #[test]
    fn test_interior_and_border_pixels() {
        // 9x9: in-band 7x7 block framed by out-of-band border
        let raster = Array2::from_shape_fn((9, 9), |(r, c)| {
            if (1..=7).contains(&r) && (1..=7).contains(&c) {
                IN
            } else {
                OUT
            }
        });
        let view = raster.view();

        for r in 1..=7isize {
            for c in 1..=7isize {
                let border_adjacent = r == 1 || r == 7 || c == 1 || c == 7;
                assert_eq!(is_edge((r, c), band(), view), border_adjacent, "({}, {})", r, c);
            }
        }
        // Out-of-band pixels are never edges
        assert!(!is_edge((0, 0), band(), view));
        assert!(!is_edge((0, 4), band(), view));
    }

    #[test]
    fn test_out_of_bounds_is_never_edge() {
        let raster = Array2::from_elem((4, 4), IN);
        let view = raster.view();
        for loc in [(-1, 0), (0, -1), (4, 0), (0, 4), (-5, -5), (100, 2)] {
            assert!(!is_edge(loc, band(), view));
        }
    }

    #[test]
    fn test_raster_border_counts_as_edge() {
        let raster = Array2::from_elem((3, 3), IN);
        let view = raster.view();
        assert!(is_edge((0, 1), band(), view));
        assert!(is_edge((2, 2), band(), view));
        assert!(!is_edge((1, 1), band(), view));
    }

    #[test]
    fn test_edge_mask_matches_predicate() {
        let raster = ring_raster(12, 2, 9, 2);
        let mask = edge_mask(band(), raster.view());
        for ((r, c), &value) in mask.indexed_iter() {
            assert_eq!(value, is_edge((r as isize, c as isize), band(), raster.view()));
        }
        assert!(mask[[2, 2]]);
        assert!(!mask[[0, 0]]);
    }

    #[test]
    fn test_seeds_on_square_ring_from_center() {
        // One pixel thick ring on rows/cols 2..=8, click at the center (5, 5)
        let raster = ring_raster(11, 2, 8, 1);
        let seeds = find_edges((5, 5), 200, band(), raster.view());

        // Click is out of band; second scans find nothing past a thin ring.
        assert_eq!(seeds, vec![(5, 8), (8, 5), (5, 2), (2, 5)]);
        for seed in seeds {
            assert_eq!(raster[[seed.0 as usize, seed.1 as usize]], IN);
        }
    }

    #[test]
    fn test_seeds_from_in_band_click() {
        // Solid 5x5 square centered in a 7x7 raster
        let raster = Array2::from_shape_fn((7, 7), |(r, c)| {
            if (1..=5).contains(&r) && (1..=5).contains(&c) {
                IN
            } else {
                OUT
            }
        });
        let seeds = find_edges((3, 3), 200, band(), raster.view());
        assert_eq!(seeds, vec![(3, 5), (5, 3), (3, 1), (1, 3)]);
    }

    #[test]
    fn test_second_crossing_in_thick_ring() {
        // Three pixel thick ring with a hole over rows/cols 4..=10: the inner
        // wall is hit first, then the outer wall within the same number of
        // steps, in every direction.
        let raster = ring_raster(15, 1, 13, 3);
        let seeds = find_edges((7, 7), 200, band(), raster.view());

        assert_eq!(raster[[7, 10]], OUT);
        assert_eq!(
            seeds,
            vec![
                (7, 11),
                (7, 13),
                (11, 7),
                (13, 7),
                (7, 3),
                (7, 1),
                (3, 7),
                (1, 7),
            ]
        );
    }

    #[test]
    fn test_scan_stops_at_raster_border() {
        let raster = Array2::from_elem((7, 7), OUT);
        let view = raster.view();
        for &direction in CARDINAL.iter() {
            assert_eq!(find_edge((3, 3), direction, usize::MAX, band(), view), None);
        }
        assert!(find_edges((3, 3), usize::MAX, band(), view).is_empty());

        // A hit within the raster is still found with an unbounded distance.
        let ring = ring_raster(11, 2, 8, 1);
        assert_eq!(find_edges((5, 5), usize::MAX, band(), ring.view()).len(), 4);
    }

    #[test]
    fn test_seek_distance_limits_scan() {
        let raster = ring_raster(11, 2, 8, 1);
        // Ring is 3 steps away; steps 1..3 stop short of it.
        assert!(find_edges((5, 5), 3, band(), raster.view()).is_empty());
        assert_eq!(find_edges((5, 5), 4, band(), raster.view()).len(), 4);
    }

    #[test]
    fn test_click_off_raster_finds_nothing() {
        let raster = ring_raster(11, 2, 8, 1);
        assert!(find_edges((-1, 5), 200, band(), raster.view()).is_empty());
        assert!(find_edges((5, 11), 200, band(), raster.view()).is_empty());
    }
}
