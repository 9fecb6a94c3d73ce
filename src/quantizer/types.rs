//! Quantization mode and rounding type definitions

use serde::{Deserialize, Serialize};

/// Quantization mode: symmetric or asymmetric
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QuantMode {
    /// Symmetric: zero-point = 0, range forced symmetric about zero
    Symmetric,
    /// Asymmetric: zero-point anchored at the lower clip bound
    #[default]
    Asymmetric,
}

/// Tie-breaking convention for the round-to-nearest step
///
/// Half-way cases are the only place the two conventions diverge.
/// `HalfAwayFromZero` matches `f32::round` and is the default;
/// `HalfToEven` matches `f32::round_ties_even` and the IEEE default
/// used by most tensor runtimes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Rounding {
    /// Round half-way cases away from zero (7.5 rounds to 8, -7.5 to -8)
    #[default]
    HalfAwayFromZero,
    /// Round half-way cases to the nearest even integer (7.5 rounds to 8, 6.5 to 6)
    HalfToEven,
}

impl Rounding {
    /// Round to the nearest integer under this convention
    pub fn round(self, x: f32) -> f32 {
        match self {
            Rounding::HalfAwayFromZero => x.round(),
            Rounding::HalfToEven => x.round_ties_even(),
        }
    }
}
