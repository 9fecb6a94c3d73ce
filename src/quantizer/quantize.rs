//! The fused quantize-dequantize transform

use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

use crate::error::{QuantError, Result};

use super::params::QuantParams;
use super::types::QuantMode;

/// Uniform quantizer: clip, scale, round, dequantize in one pass
///
/// Stateless and pure: the same input and parameters always produce the
/// same output, and nothing is cached between calls. Safe to share across
/// threads.
///
/// Non-finite inputs are handled deterministically by the clamp step:
/// infinities saturate to the nearest clip bound, NaN propagates
/// unchanged through `apply` (and maps to code 0 in `codes`).
#[derive(Clone, Copy, Debug)]
pub struct Quantizer {
    params: QuantParams,
}

impl Quantizer {
    /// Create a quantizer from validated parameters
    pub fn new(params: QuantParams) -> Self {
        Self { params }
    }

    /// Create a quantizer directly from raw parameters
    pub fn from_parts(bits: u32, clip_lower: f32, clip_upper: f32, mode: QuantMode) -> Result<Self> {
        Ok(Self::new(QuantParams::new(bits, clip_lower, clip_upper, mode)?))
    }

    /// The parameters this quantizer applies
    pub fn params(&self) -> &QuantParams {
        &self.params
    }

    /// Quantize-dequantize an array, preserving its shape
    ///
    /// Every output element lies on one of `params.num_levels()` evenly
    /// spaced levels within the representable range, inclusive.
    pub fn apply(&self, input: &ArrayD<f32>) -> ArrayD<f32> {
        let (lo, hi) = (self.params.range_lower(), self.params.range_upper());
        let zero_point = self.params.zero_point();
        let step = self.params.step_size();
        let rounding = self.params.rounding();

        input.mapv(|x| {
            let code = rounding.round((x.clamp(lo, hi) - zero_point) / step);
            // Rounded codes can land past a bound: an ulp of step
            // arithmetic in the usual case, up to half a step when the
            // symmetric range is not a whole number of steps
            (code * step + zero_point).clamp(lo, hi)
        })
    }

    /// Quantize-dequantize a flat slice
    pub fn apply_slice(&self, input: &[f32]) -> Vec<f32> {
        let (lo, hi) = (self.params.range_lower(), self.params.range_upper());
        let zero_point = self.params.zero_point();
        let step = self.params.step_size();
        let rounding = self.params.rounding();

        input
            .iter()
            .map(|&x| {
                let code = rounding.round((x.clamp(lo, hi) - zero_point) / step);
                (code * step + zero_point).clamp(lo, hi)
            })
            .collect()
    }

    /// Quantize to integer codes without dequantizing
    ///
    /// Secondary output for inspection and testing; `apply` is the fused
    /// form and does not go through this representation.
    pub fn codes(&self, input: &ArrayD<f32>) -> QuantizedArray {
        let (lo, hi) = (self.params.range_lower(), self.params.range_upper());
        let zero_point = self.params.zero_point();
        let step = self.params.step_size();
        let rounding = self.params.rounding();

        let codes = input
            .iter()
            .map(|&x| rounding.round((x.clamp(lo, hi) - zero_point) / step) as i32)
            .collect();

        QuantizedArray {
            codes,
            shape: input.shape().to_vec(),
            params: self.params,
        }
    }
}

/// Integer-code form of a quantized array
///
/// Holds the codes produced by [`Quantizer::codes`] together with the
/// original shape and the parameters needed to reconstruct real values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuantizedArray {
    /// Integer codes, row-major
    pub codes: Vec<i32>,
    /// Original array shape
    pub shape: Vec<usize>,
    /// Parameters the codes were produced with
    pub params: QuantParams,
}

impl QuantizedArray {
    /// Reconstruct the real-valued array from the codes
    ///
    /// # Errors
    /// `ShapeMismatch` if the code count does not match the recorded shape.
    pub fn dequantize(&self) -> Result<ArrayD<f32>> {
        let expected: usize = self.shape.iter().product();
        if self.codes.len() != expected {
            return Err(QuantError::ShapeMismatch {
                expected,
                actual: self.codes.len(),
            });
        }

        let zero_point = self.params.zero_point();
        let step = self.params.step_size();
        let (lo, hi) = (self.params.range_lower(), self.params.range_upper());
        let values: Vec<f32> = self
            .codes
            .iter()
            .map(|&c| (c as f32 * step + zero_point).clamp(lo, hi))
            .collect();

        ArrayD::from_shape_vec(self.shape.clone(), values).map_err(|_| {
            QuantError::ShapeMismatch {
                expected,
                actual: self.codes.len(),
            }
        })
    }

    /// Footprint of the codes if packed at `bits` per element, in bytes
    pub fn memory_bytes(&self) -> usize {
        (self.codes.len() * self.params.bits() as usize).div_ceil(8)
    }
}

/// Convenience function: quantize-dequantize in a single call
///
/// Validates parameters and applies the transform.
///
/// # Errors
/// Propagates parameter validation failures from [`QuantParams::new`].
pub fn quantize(
    input: &ArrayD<f32>,
    bits: u32,
    clip_lower: f32,
    clip_upper: f32,
    mode: QuantMode,
) -> Result<ArrayD<f32>> {
    let params = QuantParams::new(bits, clip_lower, clip_upper, mode)?;
    Ok(Quantizer::new(params).apply(input))
}
