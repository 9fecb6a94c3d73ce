//! Type definitions for clip-bound calibration

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::quantizer::{QuantMode, QuantParams};

/// Calibration method for choosing clip bounds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub enum CalibrationMethod {
    /// Min-max calibration: bounds from actual min/max values
    #[default]
    MinMax,
    /// Percentile calibration: bounds from percentile values (more robust to outliers)
    Percentile {
        /// Lower percentile (e.g., 0.01 for 0.01%)
        lower: f32,
        /// Upper percentile (e.g., 99.99 for 99.99%)
        upper: f32,
    },
    /// Moving average: smoothed min/max over multiple batches
    MovingAverage {
        /// Smoothing factor (0 = no smoothing, 1 = fully use new value)
        momentum: f32,
    },
}

/// Clip bounds chosen by calibration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipBounds {
    /// Lower clip bound
    pub lower: f32,
    /// Upper clip bound
    pub upper: f32,
}

/// Smallest range calibration will hand to the quantizer. All-constant
/// data is widened to this rather than producing a zero step.
const MIN_RANGE: f32 = 1e-6;

impl ClipBounds {
    /// Build validated quantization parameters from these bounds
    ///
    /// Degenerate observed ranges (constant data) are widened symmetrically
    /// around the observed value; everything else goes through
    /// [`QuantParams::new`] validation unchanged.
    ///
    /// # Errors
    /// Propagates parameter validation failures.
    pub fn into_params(self, bits: u32, mode: QuantMode) -> Result<QuantParams> {
        let (mut lower, mut upper) = (self.lower, self.upper);
        if upper - lower < MIN_RANGE {
            let mid = (lower + upper) / 2.0;
            let pad = MIN_RANGE.max(mid.abs() * 1e-5);
            lower = mid - pad;
            upper = mid + pad;
        }
        QuantParams::new(bits, lower, upper, mode)
    }
}
