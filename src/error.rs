use std::fmt;

/// Errors raised at the boundary of a trace, before any label is written.
///
/// Conditions that arise mid-trace (no seeds, non-closing walks, short paths,
/// an exhausted fill budget) are not errors; they are reported through
/// [`crate::selection::TraceOutcome`].
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    InvalidThreshold { lo: f32, hi: f32 },
    InvalidMaxPixels(f64),
    InvalidLabel(i64),
    InvalidParameter { name: String, value: String },
    ShapeMismatch {
        raster: (usize, usize),
        labels: (usize, usize),
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidThreshold { lo, hi } => {
                write!(f, "Invalid threshold band: lo {} must not exceed hi {}", lo, hi)
            }
            Error::InvalidMaxPixels(value) => {
                write!(f, "Invalid max pixels per click: {} (must be at least 1)", value)
            }
            Error::InvalidLabel(value) => {
                write!(f, "Invalid label value: {} (must be positive)", value)
            }
            Error::InvalidParameter { name, value } => {
                write!(f, "Invalid value for parameter '{}': {:?}", name, value)
            }
            Error::ShapeMismatch { raster, labels } => write!(
                f,
                "Raster shape {:?} does not match label shape {:?}",
                raster, labels
            ),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
