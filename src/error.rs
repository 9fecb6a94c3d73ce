//! Error types for quantization parameter validation.

use thiserror::Error;

/// Quantization errors
///
/// All parameter errors are raised synchronously at construction time,
/// before any elementwise computation. Invalid configuration is never
/// coerced (reversed clip bounds are an error, not a swap).
#[derive(Debug, Error)]
pub enum QuantError {
    #[error("invalid bit width {bits}: {reason}")]
    InvalidBitWidth { bits: u32, reason: &'static str },

    #[error("invalid clip range: lower {lower} must be strictly less than upper {upper}")]
    InvalidClipRange { lower: f32, upper: f32 },

    #[error("degenerate step size {step}: parameters collapse the quantization grid")]
    DegenerateStep { step: f32 },

    #[error("shape mismatch: shape implies {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

/// Result type for quantization operations
pub type Result<T> = std::result::Result<T, QuantError>;
