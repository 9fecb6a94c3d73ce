//! Uniform quantization: clip, scale, round, dequantize
//!
//! The core transform maps a real-valued array onto a finite set of
//! evenly spaced representable levels inside a clip range:
//! - Asymmetric (default): zero-point anchored at the lower clip bound,
//!   `2^bits` levels across `[clip_lower, clip_upper]`.
//! - Symmetric: zero-point at 0, range forced symmetric about zero,
//!   `2^bits - 1` levels with an exact zero at the center.
//!
//! The quantize and dequantize halves are fused into one pass, so the
//! output stays in floating point but carries exactly the information a
//! `bits`-wide integer representation would.

mod params;
mod quantize;
mod types;


// Re-export all public types
pub use params::QuantParams;
pub use quantize::{quantize, QuantizedArray, Quantizer};
pub use types::{QuantMode, Rounding};
