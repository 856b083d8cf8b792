//! Trace parameters supplied by the host for each click.
//!
//! Hosts usually persist these as strings (spin boxes, parameter nodes);
//! [`TraceParams::from_parameters`] parses and validates them up front so that
//! malformed input is rejected before any label is touched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_THRESHOLD_MIN: f32 = 250.0;
pub const DEFAULT_THRESHOLD_MAX: f32 = 2799.0;
pub const DEFAULT_MAX_PIXELS: usize = 2500;
/// How far the seeker scans outward from the click in each direction.
pub const DEFAULT_SEED_DISTANCE: usize = 200;
/// Largest seek distance accepted from host strings.
pub const MAX_SEED_DISTANCE: usize = 1 << 20;
/// Paths shorter than this are rejected and the attempt is rolled back.
pub const DEFAULT_MIN_PATH_LEN: usize = 5;
/// Ceiling on pixels a single boundary walk may visit.
pub const DEFAULT_MAX_TRACE_PIXELS: usize = 1_000_000;

/// Inclusive intensity band `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    pub lo: f32,
    pub hi: f32,
}

impl ThresholdBand {
    pub fn new(lo: f32, hi: f32) -> Result<Self> {
        let band = Self { lo, hi };
        band.validate()?;
        Ok(band)
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        self.lo <= value && value <= self.hi
    }

    pub fn validate(&self) -> Result<()> {
        if !self.lo.is_finite() || !self.hi.is_finite() || self.lo > self.hi {
            return Err(Error::InvalidThreshold {
                lo: self.lo,
                hi: self.hi,
            });
        }
        Ok(())
    }
}

impl Default for ThresholdBand {
    fn default() -> Self {
        Self {
            lo: DEFAULT_THRESHOLD_MIN,
            hi: DEFAULT_THRESHOLD_MAX,
        }
    }
}

/// Everything one click needs besides the rasters themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceParams {
    pub band: ThresholdBand,
    /// Fill budget: the fill stops once more than this many pixels changed.
    pub max_pixels: usize,
    /// Allow the fill to overwrite pixels that already carry a label.
    pub paint_over: bool,
    pub label: i32,
    pub seed_distance: usize,
    pub min_path_len: usize,
    pub max_trace_pixels: usize,
    /// Move the fill origin inside the traced path when the click is not.
    pub relocate_fill_origin: bool,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            band: ThresholdBand::default(),
            max_pixels: DEFAULT_MAX_PIXELS,
            paint_over: true,
            label: 1,
            seed_distance: DEFAULT_SEED_DISTANCE,
            min_path_len: DEFAULT_MIN_PATH_LEN,
            max_trace_pixels: DEFAULT_MAX_TRACE_PIXELS,
            relocate_fill_origin: false,
        }
    }
}

impl TraceParams {
    pub fn validate(&self) -> Result<()> {
        self.band.validate()?;
        if self.max_pixels < 1 {
            return Err(Error::InvalidMaxPixels(self.max_pixels as f64));
        }
        if self.label <= 0 {
            return Err(Error::InvalidLabel(self.label as i64));
        }
        Ok(())
    }

    /// Build parameters from host string parameters.
    ///
    /// Recognized keys: `threshold_min`, `threshold_max`, `max_pixels`,
    /// `paint_over`, `label`, `seed_distance`. Missing keys keep their
    /// defaults; present keys must parse.
    pub fn from_parameters(parameters: &HashMap<String, String>) -> Result<Self> {
        let mut params = Self::default();

        if let Some(value) = parameters.get("threshold_min") {
            params.band.lo = parse_number("threshold_min", value)? as f32;
        }
        if let Some(value) = parameters.get("threshold_max") {
            params.band.hi = parse_number("threshold_max", value)? as f32;
        }
        if let Some(value) = parameters.get("max_pixels") {
            // Spin boxes hand over "2500.0"
            let max_pixels = parse_number("max_pixels", value)?;
            if max_pixels < 1.0 {
                return Err(Error::InvalidMaxPixels(max_pixels));
            }
            params.max_pixels = max_pixels as usize;
        }
        if let Some(value) = parameters.get("paint_over") {
            params.paint_over = parse_flag("paint_over", value)?;
        }
        if let Some(value) = parameters.get("label") {
            params.label = parse_label(value)?;
        }
        if let Some(value) = parameters.get("seed_distance") {
            params.seed_distance = parse_seed_distance(value)?;
        }

        params.validate()?;
        Ok(params)
    }
}

fn invalid(name: &str, value: &str) -> Error {
    Error::InvalidParameter {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn parse_number(name: &str, value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(name, value)),
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(name, value)),
    }
}

fn parse_label(value: &str) -> Result<i32> {
    let label = parse_number("label", value)?;
    if label.fract() != 0.0 {
        return Err(invalid("label", value));
    }
    if label <= 0.0 || label > i32::MAX as f64 {
        return Err(Error::InvalidLabel(label as i64));
    }
    Ok(label as i32)
}

fn parse_seed_distance(value: &str) -> Result<usize> {
    let distance = parse_number("seed_distance", value)?;
    if distance.fract() != 0.0 || distance < 0.0 || distance > MAX_SEED_DISTANCE as f64 {
        return Err(invalid("seed_distance", value));
    }
    Ok(distance as usize)
}
