//! Threshold-guided region tracing for label images.
//!
//! A click is turned into a labeled region in four stages:
//! - **Edge seeking**: scan outward from the click for in-band pixels that
//!   border out-of-band ones
//! - **Path building**: walk connected edge pixels from each seed until the
//!   walk closes on itself
//! - **Selection**: keep the closed path whose bounding box best encloses
//!   the click
//! - **Filling**: budgeted flood fill of the enclosed area
//!
//! [`apply`] runs the whole pipeline for one click; the stages are public so
//! hosts can preview seeds, edges or paths on their own.

pub mod edge;
pub mod fill;
pub mod geometry;
pub mod grid;
pub mod path;
pub mod trace;

pub use edge::{edge_mask, find_edges, is_edge};
pub use fill::{fill_region, FillReport, FillRequest};
pub use geometry::{is_inside_path, point_inside_path, BoundingBox};
pub use grid::{to_intensity, Location};
pub use path::{build_path, select_best, PathTrace};
pub use trace::{apply, trace_slices, Checkpoint, SliceJob, Snapshot, TraceOutcome};
