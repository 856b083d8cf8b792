//! Budgeted flood fill of a traced region.
//!
//! Breadth-first from the origin over 4-connected neighbors. The traced
//! boundary is never painted, so it stops the fill; so do the raster edges
//! and, without paint-over, any pixel that already carries a label.

use std::collections::VecDeque;

use log::debug;
use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use super::geometry::point_set;
use super::grid::{index, offset, Location, FILL_NEIGHBORS};

/// One fill invocation.
#[derive(Debug, Clone)]
pub struct FillRequest<'a> {
    pub origin: Location,
    /// Boundary pixels that must not be painted.
    pub excluded_path: &'a [Location],
    pub label: i32,
    /// Fill stops once more than this many pixels changed.
    pub max_pixels: usize,
    /// Overwrite existing labels instead of treating them as walls.
    pub paint_over: bool,
}

/// What a fill did to the label grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Pixels whose label actually changed.
    pub pixels_changed: usize,
    /// The budget stopped the fill. Pixels written so far are kept.
    pub budget_exhausted: bool,
}

/// Flood-fill `labels` with `request.label` starting at `request.origin`.
///
/// With paint-over, pixels already carrying the target label are passed
/// through once per call so the fill can grow a region across earlier
/// clicks; they do not count toward the budget.
pub fn fill_region(
    request: &FillRequest<'_>,
    raster: ArrayView2<f32>,
    mut labels: ArrayViewMut2<i32>,
) -> FillReport {
    let excluded = point_set(request.excluded_path);
    let mut touched = request
        .paint_over
        .then(|| Array2::from_elem(labels.dim(), false));

    let mut queue = VecDeque::from([request.origin]);
    let mut report = FillReport::default();

    while let Some(loc) = queue.pop_front() {
        let Some(idx) = index(loc, labels.dim()) else {
            continue;
        };
        if index(loc, raster.dim()).is_none() {
            continue;
        }

        let previous = labels[idx];
        if !request.paint_over && previous != 0 {
            continue;
        }
        if previous == request.label {
            if let Some(touched) = touched.as_mut() {
                if touched[idx] {
                    continue;
                }
                touched[idx] = true;
            }
        }
        if excluded.contains(&loc) {
            continue;
        }

        labels[idx] = request.label;
        if previous != request.label {
            report.pixels_changed += 1;
        }
        if report.pixels_changed > request.max_pixels {
            report.budget_exhausted = true;
            break;
        }

        for &delta in FILL_NEIGHBORS.iter() {
            queue.push_back(offset(loc, delta, 1));
        }
    }

    debug!(
        "Fill from {:?} changed {} pixels{}",
        request.origin,
        report.pixels_changed,
        if report.budget_exhausted {
            " (budget exhausted)"
        } else {
            ""
        }
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(origin: Location, excluded: &[Location], max_pixels: usize, paint_over: bool) -> FillRequest<'_> {
        FillRequest {
            origin,
            excluded_path: excluded,
            label: 5,
            max_pixels,
            paint_over,
        }
    }

    fn count(labels: &Array2<i32>, value: i32) -> usize {
        labels.iter().filter(|&&v| v == value).count()
    }

    #[test]
    fn test_fills_open_region() {
        let raster = Array2::<f32>::zeros((4, 6));
        let mut labels = Array2::<i32>::zeros((4, 6));

        let report = fill_region(&request((1, 1), &[], 1000, false), raster.view(), labels.view_mut());

        assert_eq!(report.pixels_changed, 24);
        assert!(!report.budget_exhausted);
        assert_eq!(count(&labels, 5), 24);
    }

    #[test]
    fn test_budget_overshoots_by_one_in_bfs_order() {
        let raster = Array2::<f32>::zeros((10, 10));
        let mut labels = Array2::<i32>::zeros((10, 10));

        let report = fill_region(&request((5, 5), &[], 5, false), raster.view(), labels.view_mut());

        assert_eq!(report.pixels_changed, 6);
        assert!(report.budget_exhausted);
        assert_eq!(count(&labels, 5), 6);
        // Origin, its four neighbors (up, down, left, right), then the pixel
        // above the first neighbor.
        for (r, c) in [(5, 5), (4, 5), (6, 5), (5, 4), (5, 6), (3, 5)] {
            assert_eq!(labels[[r, c]], 5, "({}, {})", r, c);
        }
    }

    #[test]
    fn test_existing_labels_are_walls_without_paint_over() {
        let raster = Array2::<f32>::zeros((5, 5));
        let mut labels = Array2::<i32>::zeros((5, 5));
        labels.column_mut(2).fill(3);
        let before = labels.clone();

        let report = fill_region(&request((2, 0), &[], 1000, false), raster.view(), labels.view_mut());

        assert_eq!(report.pixels_changed, 10);
        for ((r, c), &v) in before.indexed_iter() {
            if v != 0 {
                assert_eq!(labels[[r, c]], v);
            }
        }
        assert_eq!(labels[[0, 3]], 0);
        assert_eq!(labels[[4, 1]], 5);
    }

    #[test]
    fn test_excluded_path_is_never_painted() {
        let raster = Array2::<f32>::zeros((5, 5));
        let mut labels = Array2::<i32>::zeros((5, 5));
        let wall: Vec<Location> = (0..5).map(|r| (r, 2)).collect();

        let report = fill_region(&request((0, 0), &wall, 1000, true), raster.view(), labels.view_mut());

        assert_eq!(report.pixels_changed, 10);
        assert!(labels.column(2).iter().all(|&v| v == 0));
        assert!(labels.column(4).iter().all(|&v| v == 0));
    }

    #[test]
    fn test_paint_over_replaces_other_labels() {
        let raster = Array2::<f32>::zeros((4, 4));
        let mut labels = Array2::<i32>::from_elem((4, 4), 2);

        let report = fill_region(&request((0, 0), &[], 1000, true), raster.view(), labels.view_mut());

        assert_eq!(report.pixels_changed, 16);
        assert_eq!(count(&labels, 5), 16);
    }

    #[test]
    fn test_paint_over_grows_through_same_label() {
        // Left half already filled by an earlier click
        let raster = Array2::<f32>::zeros((4, 4));
        let mut labels = Array2::<i32>::zeros((4, 4));
        labels.slice_mut(ndarray::s![.., ..2]).fill(5);

        let report = fill_region(&request((0, 0), &[], 1000, true), raster.view(), labels.view_mut());

        assert_eq!(report.pixels_changed, 8);
        assert_eq!(count(&labels, 5), 16);
    }

    #[test]
    fn test_same_label_pixels_do_not_spend_budget() {
        let raster = Array2::<f32>::zeros((4, 4));
        let mut labels = Array2::<i32>::from_elem((4, 4), 5);

        let report = fill_region(&request((1, 1), &[], 1, true), raster.view(), labels.view_mut());

        assert_eq!(report.pixels_changed, 0);
        assert!(!report.budget_exhausted);
    }

    #[test]
    fn test_origin_off_grid_changes_nothing() {
        let raster = Array2::<f32>::zeros((3, 3));
        let mut labels = Array2::<i32>::zeros((3, 3));

        let report = fill_region(&request((-1, 1), &[], 1000, false), raster.view(), labels.view_mut());

        assert_eq!(report, FillReport::default());
        assert_eq!(count(&labels, 0), 9);
    }

    #[test]
    fn test_stops_at_smaller_raster_extent() {
        let raster = Array2::<f32>::zeros((2, 2));
        let mut labels = Array2::<i32>::zeros((4, 4));

        let report = fill_region(&request((0, 0), &[], 1000, false), raster.view(), labels.view_mut());

        assert_eq!(report.pixels_changed, 4);
        assert_eq!(labels[[2, 2]], 0);
    }
}
