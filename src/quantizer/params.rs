//! Validated quantization parameters

use serde::{Deserialize, Serialize};

use crate::error::{QuantError, Result};

use super::types::{QuantMode, Rounding};

/// Quantization parameters: bit width, clip bounds, mode, rounding
///
/// Immutable once constructed; `new` validates every constraint up front
/// so downstream quantization cannot fail. The derived quantities
/// (zero-point, step size, level count) are closed-form functions of the
/// fields and are computed on demand.
///
/// Conventions per mode:
/// - Asymmetric: zero-point = `clip_lower`, the grid spans
///   `[clip_lower, clip_upper]` in `2^bits - 1` steps (`2^bits` levels).
/// - Symmetric: zero-point = 0, the range is forced symmetric about zero
///   using whichever bound has the larger magnitude, in `2^bits - 2`
///   steps (`2^bits - 1` levels, one of which is an exact zero).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQuantParams")]
pub struct QuantParams {
    bits: u32,
    clip_lower: f32,
    clip_upper: f32,
    mode: QuantMode,
    rounding: Rounding,
}

/// Unvalidated mirror of `QuantParams` for deserialization
///
/// Serde input goes through `TryFrom` into the validated type, so a
/// deserialized config hits the same checks as direct construction.
#[derive(Deserialize)]
struct RawQuantParams {
    bits: u32,
    clip_lower: f32,
    clip_upper: f32,
    mode: QuantMode,
    #[serde(default)]
    rounding: Rounding,
}

impl TryFrom<RawQuantParams> for QuantParams {
    type Error = crate::error::QuantError;

    fn try_from(raw: RawQuantParams) -> Result<Self> {
        Ok(QuantParams::new(raw.bits, raw.clip_lower, raw.clip_upper, raw.mode)?
            .with_rounding(raw.rounding))
    }
}

impl QuantParams {
    /// Create validated quantization parameters
    ///
    /// # Errors
    /// - `InvalidBitWidth` if `bits < 1`, or `bits < 2` in symmetric mode
    /// - `InvalidClipRange` if `clip_lower >= clip_upper` (or either is NaN)
    /// - `DegenerateStep` if the resulting step size is not a positive
    ///   finite number (e.g. non-finite clip bounds)
    pub fn new(bits: u32, clip_lower: f32, clip_upper: f32, mode: QuantMode) -> Result<Self> {
        if bits < 1 {
            return Err(QuantError::InvalidBitWidth {
                bits,
                reason: "bit width must be at least 1",
            });
        }
        if mode == QuantMode::Symmetric && bits < 2 {
            return Err(QuantError::InvalidBitWidth {
                bits,
                reason: "symmetric mode requires at least 2 bits",
            });
        }
        if bits > 24 {
            return Err(QuantError::InvalidBitWidth {
                bits,
                reason: "bit width exceeds f32 integer precision (max 24)",
            });
        }
        if !(clip_lower < clip_upper) {
            return Err(QuantError::InvalidClipRange {
                lower: clip_lower,
                upper: clip_upper,
            });
        }

        let params = Self {
            bits,
            clip_lower,
            clip_upper,
            mode,
            rounding: Rounding::default(),
        };

        let step = params.step_size();
        if !(step.is_finite() && step > 0.0) {
            return Err(QuantError::DegenerateStep { step });
        }

        Ok(params)
    }

    /// Override the tie-breaking convention (default: half away from zero)
    #[must_use]
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Bit width
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Configured lower clip bound
    pub fn clip_lower(&self) -> f32 {
        self.clip_lower
    }

    /// Configured upper clip bound
    pub fn clip_upper(&self) -> f32 {
        self.clip_upper
    }

    /// Quantization mode
    pub fn mode(&self) -> QuantMode {
        self.mode
    }

    /// Tie-breaking convention
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Effective lower bound of the representable range
    ///
    /// Asymmetric: the configured `clip_lower`. Symmetric: the negated
    /// larger-magnitude bound, `-max(clip_upper, |clip_lower|)`.
    pub fn range_lower(&self) -> f32 {
        match self.mode {
            QuantMode::Asymmetric => self.clip_lower,
            QuantMode::Symmetric => -self.clip_upper.max(self.clip_lower.abs()),
        }
    }

    /// Effective upper bound of the representable range
    pub fn range_upper(&self) -> f32 {
        self.clip_upper
    }

    /// Real value corresponding to integer code 0
    pub fn zero_point(&self) -> f32 {
        match self.mode {
            QuantMode::Asymmetric => self.clip_lower,
            QuantMode::Symmetric => 0.0,
        }
    }

    /// Number of steps (intervals) spanning the representable range
    ///
    /// Asymmetric: `2^bits - 1`. Symmetric: `2^bits - 2` (one step is
    /// given up so a code of exactly zero sits at the center).
    pub fn steps(&self) -> u32 {
        let full = (1u64 << self.bits) as u32;
        match self.mode {
            QuantMode::Asymmetric => full - 1,
            QuantMode::Symmetric => full - 2,
        }
    }

    /// Number of representable levels (grid points), `steps + 1`
    pub fn num_levels(&self) -> u32 {
        self.steps() + 1
    }

    /// Distance between adjacent representable levels
    pub fn step_size(&self) -> f32 {
        (self.range_upper() - self.range_lower()) / self.steps() as f32
    }
}
