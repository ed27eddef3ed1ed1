//! Value converter
//!
//! Forward: `physical = raw * slope + offset`, evaluated in f64.
//! Inverse: `raw = clamp(round_half_even((physical - offset) / slope), 0, 65535)`.
//!
//! The inverse is lossy by policy: values outside the u16 range saturate
//! instead of failing, and NaN maps to 0. Callers that need exact raw values
//! use [`to_raw_exact`], which rejects anything that is not already a valid
//! sample.

use crate::xre_tiff::calibration::Calibration;
use crate::xre_tiff::common::error::{Result, XreTiffError};

/// Floating point type a physical grid can be stored as.
pub trait PhysicalSample: Copy + PartialEq + std::fmt::Debug + Into<f64> {
    const NAME: &'static str;

    fn from_f64(value: f64) -> Self;
}

impl PhysicalSample for f32 {
    const NAME: &'static str = "float32";

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl PhysicalSample for f64 {
    const NAME: &'static str = "float64";

    fn from_f64(value: f64) -> Self {
        value
    }
}

/// Raw samples produced by the inverse conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSamples {
    pub samples: Vec<u16>,
    /// Number of inputs that fell outside [0, 65535] (or were NaN) and were
    /// saturated.
    pub clamped: usize,
}

const RAW_MAX: f64 = u16::MAX as f64;

pub fn to_physical<P: PhysicalSample>(raw: &[u16], calibration: &Calibration) -> Vec<P> {
    let slope = calibration.slope();
    let offset = calibration.offset();
    raw.iter()
        .map(|&value| P::from_f64(f64::from(value) * slope + offset))
        .collect()
}

/// Inverse conversion. Fails only when the slope is zero.
pub fn to_raw<T: Copy + Into<f64>>(physical: &[T], calibration: &Calibration) -> Result<RawSamples> {
    calibration.ensure_invertible()?;

    let slope = calibration.slope();
    let offset = calibration.offset();
    let mut clamped = 0;
    let samples = physical
        .iter()
        .map(|&value| {
            let scaled = ((value.into() - offset) / slope).round_ties_even();
            if !(0.0..=RAW_MAX).contains(&scaled) {
                clamped += 1;
            }
            // NaN saturates to 0 in the cast
            scaled.clamp(0.0, RAW_MAX) as u16
        })
        .collect();

    Ok(RawSamples { samples, clamped })
}

/// Converts values that must already be raw samples, without rounding or
/// clamping.
pub fn to_raw_exact<T: Copy + Into<f64>>(values: &[T]) -> Result<Vec<u16>> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let value: f64 = value.into();
            let reason = if value.is_nan() {
                "not a number"
            } else if value.fract() != 0.0 {
                "not an integer"
            } else if !(0.0..=RAW_MAX).contains(&value) {
                "outside the raw range [0, 65535]"
            } else {
                return Ok(value as u16);
            };
            Err(XreTiffError::InvalidRawSample { index, value, reason })
        })
        .collect()
}
