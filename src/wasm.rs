//! WebAssembly exports for LabelTrace.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Slices are
//! passed as flat row-major buffers of length `width * height`.

use ndarray::{Array2, ArrayView2};
use wasm_bindgen::prelude::*;

use crate::config::{ThresholdBand, TraceParams};
use crate::selection::{self, Snapshot};

fn js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

// ============================================================================
// Trace and Select
// ============================================================================

/// Trace the region around a click and label it.
///
/// # Arguments
/// * `background` - Flat f32 intensities (length = width * height)
/// * `labels` - Flat i32 labels (length = width * height)
/// * `width` - Slice width in pixels
/// * `height` - Slice height in pixels
/// * `row`, `col` - Click location
/// * `label` - Label value to write (> 0)
/// * `lo`, `hi` - Inclusive threshold band
/// * `max_pixels` - Fill budget per click
/// * `paint_over` - Overwrite existing labels
///
/// # Returns
/// The updated flat label buffer; unchanged when the click was rejected.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn trace_and_select_wasm(
    background: &[f32],
    labels: &[i32],
    width: usize,
    height: usize,
    row: isize,
    col: isize,
    label: i32,
    lo: f32,
    hi: f32,
    max_pixels: usize,
    paint_over: bool,
) -> Result<Vec<i32>, JsError> {
    let raster = ArrayView2::from_shape((height, width), background).map_err(js_error)?;
    let mut grid = Array2::from_shape_vec((height, width), labels.to_vec()).map_err(js_error)?;

    let params = TraceParams {
        band: ThresholdBand::new(lo, hi).map_err(js_error)?,
        label,
        max_pixels,
        paint_over,
        ..TraceParams::default()
    };
    let mut checkpoint = Snapshot::default();
    selection::apply(&params, raster, grid.view_mut(), (row, col), &mut checkpoint)
        .map_err(js_error)?;

    Ok(grid.into_raw_vec_and_offset().0)
}

// ============================================================================
// Edge Preview
// ============================================================================

/// Edge mask for a threshold band, 1 = edge pixel.
///
/// # Arguments
/// * `background` - Flat f32 intensities (length = width * height)
/// * `width` - Slice width in pixels
/// * `height` - Slice height in pixels
/// * `lo`, `hi` - Inclusive threshold band
#[wasm_bindgen]
pub fn edge_mask_wasm(
    background: &[f32],
    width: usize,
    height: usize,
    lo: f32,
    hi: f32,
) -> Result<Vec<u8>, JsError> {
    let raster = ArrayView2::from_shape((height, width), background).map_err(js_error)?;
    let band = ThresholdBand::new(lo, hi).map_err(js_error)?;

    Ok(selection::edge_mask(band, raster)
        .iter()
        .map(|&edge| edge as u8)
        .collect())
}
