//! # cuantizar
//!
//! Uniform fake-quantization for f32 tensors: clip, scale, round,
//! dequantize in one fused pass.
//!
//! The core is a pure, stateless transform mapping a real-valued array
//! onto a finite set of evenly spaced representable levels inside a clip
//! range, in either the asymmetric convention (zero-point at the lower
//! clip bound) or the symmetric one (zero-point at zero). Around it:
//! clip-bound calibration from observed data, and a composition seam for
//! quantizing the operands of an opaque downstream computation.
//!
//! ## Example
//!
//! ```
//! use cuantizar::{quantize, QuantMode};
//! use ndarray::arr1;
//!
//! let input = arr1(&[0.0f32, 1.2, 3.0, -3.0]).into_dyn();
//! let output = quantize(&input, 4, -2.5, 2.5, QuantMode::Asymmetric).unwrap();
//!
//! // Out-of-range values clamp to the clip bounds
//! assert_eq!(output[2], 2.5);
//! assert_eq!(output[3], -2.5);
//! ```
//!
//! ## Calibrated pipeline
//!
//! ```
//! use cuantizar::{calibrate_min_max, QuantMode, Quantizer};
//!
//! let data = [0.3f32, -0.7, 1.9, -2.4];
//! let params = calibrate_min_max(&data)
//!     .into_params(8, QuantMode::Asymmetric)
//!     .unwrap();
//! let quantized = Quantizer::new(params).apply_slice(&data);
//! assert_eq!(quantized.len(), data.len());
//! ```

pub mod calibration;
pub mod compose;
pub mod error;
pub mod quantizer;

pub use calibration::{
    calibrate_min_max, calibrate_percentile, CalibrationMethod, ClipBounds, ClipCalibrator,
};
pub use compose::{ClipInit, Compute, QuantConfig, QuantizedLayer};
pub use error::{QuantError, Result};
pub use quantizer::{quantize, QuantMode, QuantParams, QuantizedArray, Quantizer, Rounding};
