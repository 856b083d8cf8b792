//! LabelTrace Rust Extensions
//!
//! Click-driven region tracing for 2D label images, with Python bindings via
//! PyO3 and WASM bindings for JavaScript.
//!
//! ## Data Layout
//! Every operation works on one already-extracted 2D slice:
//! - **Background**: (height, width) `f32` intensities, read-only
//! - **Labels**: (height, width) `i32`, 0 = unlabeled, written in place
//!
//! Coordinates are `(row, col)` indices into both arrays. Locations off the
//! slice are never an error; they read as "outside the threshold band".
//!
//! ## Pipeline
//! A click seeks edge pixels of the threshold band, walks them into closed
//! boundaries, keeps the boundary that best encloses the click and fills its
//! interior up to a pixel budget. Attempts whose boundary is too short are
//! rolled back through a [`selection::Checkpoint`].

pub mod config;
pub mod error;
pub mod selection;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{ThresholdBand, TraceParams};
pub use error::{Error, Result};
pub use selection::{apply, Checkpoint, Snapshot, TraceOutcome};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use ndarray::ArrayView2;
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2, PyReadwriteArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::config::{ThresholdBand, TraceParams};
    use crate::selection::{self, to_intensity, Snapshot};

    impl From<crate::Error> for PyErr {
        fn from(err: crate::Error) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    // ========================================================================
    // Trace and Select
    // ========================================================================

    fn trace_view(
        background: ArrayView2<'_, f32>,
        mut labels: PyReadwriteArray2<'_, i32>,
        click: (isize, isize),
        params: &TraceParams,
    ) -> PyResult<(bool, usize)> {
        let mut checkpoint = Snapshot::default();
        let outcome = selection::apply(
            params,
            background,
            labels.as_array_mut(),
            click,
            &mut checkpoint,
        )?;
        Ok((outcome.is_accepted(), outcome.pixels_changed()))
    }

    fn trace_params(
        label: i32,
        lo: f32,
        hi: f32,
        max_pixels: usize,
        paint_over: bool,
    ) -> PyResult<TraceParams> {
        Ok(TraceParams {
            band: ThresholdBand::new(lo, hi)?,
            label,
            max_pixels,
            paint_over,
            ..TraceParams::default()
        })
    }

    /// Trace the region around a click and label it in place.
    ///
    /// # Arguments
    /// * `background` - 2D float32 intensity slice
    /// * `labels` - 2D int32 label slice, same shape, modified in place
    /// * `row`, `col` - Click location in index space
    /// * `label` - Label value to write (> 0)
    /// * `lo`, `hi` - Inclusive threshold band
    /// * `max_pixels` - Fill budget per click
    /// * `paint_over` - Overwrite existing labels
    ///
    /// # Returns
    /// `(accepted, pixels_changed)`. A rejected click leaves `labels` as it was.
    #[pyfunction]
    #[pyo3(signature = (background, labels, row, col, label=1, lo=250.0, hi=2799.0, max_pixels=2500, paint_over=true))]
    #[allow(clippy::too_many_arguments)]
    pub fn trace_and_select<'py>(
        background: PyReadonlyArray2<'py, f32>,
        labels: PyReadwriteArray2<'py, i32>,
        row: isize,
        col: isize,
        label: i32,
        lo: f32,
        hi: f32,
        max_pixels: usize,
        paint_over: bool,
    ) -> PyResult<(bool, usize)> {
        let params = trace_params(label, lo, hi, max_pixels, paint_over)?;
        trace_view(background.as_array(), labels, (row, col), &params)
    }

    /// Trace and select on an int16 slice (CT data).
    #[pyfunction]
    #[pyo3(signature = (background, labels, row, col, label=1, lo=250.0, hi=2799.0, max_pixels=2500, paint_over=true))]
    #[allow(clippy::too_many_arguments)]
    pub fn trace_and_select_i16<'py>(
        background: PyReadonlyArray2<'py, i16>,
        labels: PyReadwriteArray2<'py, i32>,
        row: isize,
        col: isize,
        label: i32,
        lo: f32,
        hi: f32,
        max_pixels: usize,
        paint_over: bool,
    ) -> PyResult<(bool, usize)> {
        let params = trace_params(label, lo, hi, max_pixels, paint_over)?;
        let raster = to_intensity(&background.as_array());
        trace_view(raster.view(), labels, (row, col), &params)
    }

    /// Trace and select on a uint16 slice.
    #[pyfunction]
    #[pyo3(signature = (background, labels, row, col, label=1, lo=250.0, hi=2799.0, max_pixels=2500, paint_over=true))]
    #[allow(clippy::too_many_arguments)]
    pub fn trace_and_select_u16<'py>(
        background: PyReadonlyArray2<'py, u16>,
        labels: PyReadwriteArray2<'py, i32>,
        row: isize,
        col: isize,
        label: i32,
        lo: f32,
        hi: f32,
        max_pixels: usize,
        paint_over: bool,
    ) -> PyResult<(bool, usize)> {
        let params = trace_params(label, lo, hi, max_pixels, paint_over)?;
        let raster = to_intensity(&background.as_array());
        trace_view(raster.view(), labels, (row, col), &params)
    }

    /// Edge seeds found from a click, as a list of `(row, col)`.
    #[pyfunction]
    #[pyo3(signature = (background, row, col, lo, hi, max_dist=200))]
    pub fn find_edge_seeds(
        background: PyReadonlyArray2<'_, f32>,
        row: isize,
        col: isize,
        lo: f32,
        hi: f32,
        max_dist: usize,
    ) -> PyResult<Vec<(isize, isize)>> {
        let band = ThresholdBand::new(lo, hi)?;
        Ok(selection::find_edges((row, col), max_dist, band, background.as_array()))
    }

    /// Boolean mask of edge pixels under a threshold band.
    #[pyfunction]
    pub fn edge_mask<'py>(
        py: Python<'py>,
        background: PyReadonlyArray2<'py, f32>,
        lo: f32,
        hi: f32,
    ) -> PyResult<Bound<'py, PyArray2<bool>>> {
        let band = ThresholdBand::new(lo, hi)?;
        let mask = selection::edge_mask(band, background.as_array());
        Ok(mask.into_pyarray(py))
    }

    #[pymodule]
    pub fn labeltrace(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(trace_and_select, m)?)?;
        m.add_function(wrap_pyfunction!(trace_and_select_i16, m)?)?;
        m.add_function(wrap_pyfunction!(trace_and_select_u16, m)?)?;
        m.add_function(wrap_pyfunction!(find_edge_seeds, m)?)?;
        m.add_function(wrap_pyfunction!(edge_mask, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::labeltrace;
