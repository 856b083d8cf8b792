//! Click-to-label pipeline: seek, walk, select, fill.

use std::collections::HashSet;

use log::{debug, info, warn};
use ndarray::{Array2, ArrayView2, ArrayViewMut2};
use rayon::prelude::*;

use super::edge::find_edges;
use super::fill::{fill_region, FillRequest};
use super::geometry::{is_inside_path, point_inside_path};
use super::grid::{index, lookup, Location};
use super::path::{build_path, select_best, PathTrace};
use crate::config::TraceParams;
use crate::error::{Error, Result};

/// Save/restore hook around a labeling attempt.
///
/// `save_state` runs before the first label is written; `undo` runs when the
/// traced path is rejected and must restore the grid to the saved state.
/// Hosts with their own undo stack may ignore the views.
pub trait Checkpoint {
    fn save_state(&mut self, labels: ArrayView2<'_, i32>);
    fn undo(&mut self, labels: ArrayViewMut2<'_, i32>);
}

/// In-memory checkpoint holding a copy of the label grid.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    saved: Option<Array2<i32>>,
}

impl Checkpoint for Snapshot {
    fn save_state(&mut self, labels: ArrayView2<'_, i32>) {
        self.saved = Some(labels.to_owned());
    }

    fn undo(&mut self, mut labels: ArrayViewMut2<'_, i32>) {
        if let Some(saved) = self.saved.take() {
            labels.assign(&saved);
        }
    }
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOutcome {
    /// A boundary was accepted and its interior filled.
    Filled {
        path_len: usize,
        /// Pixels labeled while walking boundaries, over all walks.
        traced_pixels: usize,
        pixels_changed: usize,
        budget_exhausted: bool,
        fill_origin: Location,
    },
    /// No acceptable boundary; the label grid was rolled back.
    Rejected { path_len: usize },
}

impl TraceOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, TraceOutcome::Filled { .. })
    }

    pub fn pixels_changed(&self) -> usize {
        match self {
            TraceOutcome::Filled { pixels_changed, .. } => *pixels_changed,
            TraceOutcome::Rejected { .. } => 0,
        }
    }
}

/// Trace the region around `click` and label it.
///
/// Parameters and shapes are checked before anything is written. Every pixel
/// visited while walking boundaries is labeled, even on walks that lose the
/// selection; a rejected attempt is rolled back through `checkpoint`.
pub fn apply<C>(
    params: &TraceParams,
    raster: ArrayView2<f32>,
    mut labels: ArrayViewMut2<i32>,
    click: Location,
    checkpoint: &mut C,
) -> Result<TraceOutcome>
where
    C: Checkpoint + ?Sized,
{
    params.validate()?;
    if raster.dim() != labels.dim() {
        return Err(Error::ShapeMismatch {
            raster: raster.dim(),
            labels: labels.dim(),
        });
    }

    debug!("Click at {:?}, value {:?}", click, lookup(&raster, click));
    checkpoint.save_state(labels.view());

    let seeds = find_edges(click, params.seed_distance, params.band, raster);
    debug!("Found {} edge seeds: {:?}", seeds.len(), seeds);

    let mut paths: Vec<PathTrace> = Vec::new();
    for seed in seeds {
        if paths.iter().any(|path| path.contains(seed)) {
            continue;
        }
        let trace = build_path(seed, params.band, raster, params.max_trace_pixels);
        if trace.is_closed() {
            paths.push(trace);
        }
    }

    let mut traced: HashSet<Location> = HashSet::new();
    for path in &paths {
        for &loc in &path.visited {
            if let Some(idx) = index(loc, labels.dim()) {
                labels[idx] = params.label;
                traced.insert(loc);
            }
        }
    }

    let best = select_best(&paths, click);
    let path_len = best.map_or(0, PathTrace::len);
    let best = match best {
        Some(best) if path_len >= params.min_path_len => best,
        _ => {
            warn!(
                "Path around {:?} was unexpectedly short ({} pixels), undoing",
                click, path_len
            );
            checkpoint.undo(labels.view_mut());
            return Ok(TraceOutcome::Rejected { path_len });
        }
    };

    let mut fill_origin = click;
    if params.relocate_fill_origin && !is_inside_path(click, &best.points) {
        if let Some(inside) = point_inside_path(&best.points) {
            debug!("Fill origin moved from {:?} to {:?}", click, inside);
            fill_origin = inside;
        }
    }

    let report = fill_region(
        &FillRequest {
            origin: fill_origin,
            excluded_path: &best.points,
            label: params.label,
            max_pixels: params.max_pixels,
            paint_over: params.paint_over,
        },
        raster,
        labels.view_mut(),
    );

    info!(
        "Traced {} pixel boundary ({} dead ends), filled {} pixels",
        path_len, best.dead_ends, report.pixels_changed
    );
    Ok(TraceOutcome::Filled {
        path_len,
        traced_pixels: traced.len(),
        pixels_changed: report.pixels_changed,
        budget_exhausted: report.budget_exhausted,
        fill_origin,
    })
}

/// One independent slice for [`trace_slices`].
#[derive(Debug)]
pub struct SliceJob<'a> {
    pub raster: ArrayView2<'a, f32>,
    pub labels: ArrayViewMut2<'a, i32>,
    pub click: Location,
}

/// Run [`apply`] on independent slices in parallel.
///
/// Each job owns its label view, so no two jobs can write the same grid;
/// rasters may be shared. Every job is rolled back through its own
/// [`Snapshot`].
pub fn trace_slices(jobs: &mut [SliceJob<'_>], params: &TraceParams) -> Vec<Result<TraceOutcome>> {
    jobs.par_iter_mut()
        .map(|job| {
            let mut checkpoint = Snapshot::default();
            apply(params, job.raster, job.labels.view_mut(), job.click, &mut checkpoint)
        })
        .collect()
}
