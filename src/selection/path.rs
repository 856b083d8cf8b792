//! Boundary walking and candidate selection.
//!
//! From a seed edge pixel the builder walks 8-connected edge pixels in a
//! fixed clockwise neighbor order until a step lands back on the seed. Dead
//! ends are backtracked; visited pixels stay visited, so a dead branch is
//! never walked twice.
//!
//! A loop needs at least three pixels. Stepping back to the seed from its
//! own first neighbor is not a closure, otherwise every open arc would
//! "close" as soon as backtracking reached its second pixel.

use std::collections::HashSet;

use log::{debug, warn};
use ndarray::ArrayView2;

use super::edge::is_edge;
use super::geometry::BoundingBox;
use super::grid::{offset, Location, MOORE};
use crate::config::ThresholdBand;

const MIN_LOOP_LEN: usize = 3;

/// Result of one boundary walk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathTrace {
    /// Ordered walk starting at the seed; empty when the walk did not close.
    pub points: Vec<Location>,
    /// Every pixel touched, including abandoned dead-end branches.
    pub visited: HashSet<Location>,
    /// Backtracks taken before closing, `-1` for a walk that never closed.
    pub dead_ends: isize,
}

impl PathTrace {
    fn failed() -> Self {
        Self {
            points: Vec::new(),
            visited: HashSet::new(),
            dead_ends: -1,
        }
    }

    pub fn is_closed(&self) -> bool {
        !self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, loc: Location) -> bool {
        self.points.contains(&loc)
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.points)
    }
}

/// Walk edge pixels from `seed` until the loop closes.
///
/// The walk is abandoned once more than `max_visited` pixels were touched;
/// an abandoned walk is reported like any other non-closing walk.
pub fn build_path(
    seed: Location,
    band: ThresholdBand,
    raster: ArrayView2<f32>,
    max_visited: usize,
) -> PathTrace {
    let mut visited = HashSet::from([seed]);
    let mut path = vec![seed];
    let mut current = seed;
    let mut dead_ends = 0isize;

    while !path.is_empty() {
        if visited.len() > max_visited {
            warn!(
                "Boundary walk from {:?} abandoned after {} pixels",
                seed,
                visited.len()
            );
            return PathTrace::failed();
        }

        let mut advanced = false;
        for &delta in MOORE.iter() {
            let neighbor = offset(current, delta, 1);
            if neighbor == seed && path.len() >= MIN_LOOP_LEN {
                debug!("Path from {:?} closed, dead ends: {}", seed, dead_ends);
                return PathTrace {
                    points: path,
                    visited,
                    dead_ends,
                };
            }
            if is_edge(neighbor, band, raster) && visited.insert(neighbor) {
                path.push(neighbor);
                current = neighbor;
                advanced = true;
                break;
            }
        }

        if !advanced {
            dead_ends += 1;
            path.pop();
            if let Some(&tail) = path.last() {
                current = tail;
            }
        }
    }

    debug!("Edge at {:?} is not part of a closed path", seed);
    PathTrace::failed()
}

/// Pick the candidate whose bounding box strictly contains `click` and has
/// the largest extent product. The first candidate wins ties.
pub fn select_best(paths: &[PathTrace], click: Location) -> Option<&PathTrace> {
    let mut best: Option<(&PathTrace, isize)> = None;

    for path in paths.iter().filter(|p| p.is_closed()) {
        let Some(bounds) = path.bounds() else {
            continue;
        };
        if !bounds.strictly_contains(click) {
            continue;
        }
        let area = bounds.area();
        if best.map_or(true, |(_, best_area)| area > best_area) {
            best = Some((path, area));
        }
    }

    best.map(|(path, _)| path)
}
