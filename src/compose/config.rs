//! Quantization configuration mapping
//!
//! The serializable record a model-preparation facility consumes: bit
//! widths per operand class, clip initialization, mode selection, and a
//! first/last-layer exclusion flag. Resolving the mapping always goes
//! through `QuantParams` validation.

use serde::{Deserialize, Serialize};

use crate::calibration::{CalibrationMethod, ClipCalibrator};
use crate::error::Result;
use crate::quantizer::{QuantMode, QuantParams};

/// How clip bounds are initialized when resolving a config
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClipInit {
    /// Fixed bounds, used as-is
    Fixed {
        /// Lower clip bound
        lower: f32,
        /// Upper clip bound
        upper: f32,
    },
    /// Bounds calibrated from sample data
    Calibrate(CalibrationMethod),
}

impl Default for ClipInit {
    fn default() -> Self {
        ClipInit::Calibrate(CalibrationMethod::MinMax)
    }
}

/// Quantization configuration mapping
///
/// Defaults follow the usual convention: 8 bits everywhere, symmetric
/// weights (centered distributions), asymmetric activations, min-max
/// clip initialization, first and last layers kept in full precision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantConfig {
    /// Bit width for weight quantization
    #[serde(default = "default_bits")]
    pub weight_bits: u32,
    /// Bit width for activation quantization
    #[serde(default = "default_bits")]
    pub activation_bits: u32,
    /// Quantizer mode for weights
    #[serde(default = "default_weight_mode")]
    pub weight_mode: QuantMode,
    /// Quantizer mode for activations
    #[serde(default)]
    pub activation_mode: QuantMode,
    /// Clip bound initialization
    #[serde(default)]
    pub clip_init: ClipInit,
    /// Leave the first and last layer in full precision
    #[serde(default = "default_true")]
    pub skip_first_last: bool,
}

fn default_bits() -> u32 {
    8
}

fn default_weight_mode() -> QuantMode {
    QuantMode::Symmetric
}

fn default_true() -> bool {
    true
}

impl Default for QuantConfig {
    fn default() -> Self {
        Self {
            weight_bits: default_bits(),
            activation_bits: default_bits(),
            weight_mode: default_weight_mode(),
            activation_mode: QuantMode::default(),
            clip_init: ClipInit::default(),
            skip_first_last: default_true(),
        }
    }
}

impl QuantConfig {
    /// Resolve quantization parameters for a weight tensor
    ///
    /// `sample` supplies the data calibration observes when `clip_init`
    /// is `Calibrate`; it is ignored for fixed bounds.
    ///
    /// # Errors
    /// Propagates parameter validation failures.
    pub fn weight_params(&self, sample: &[f32]) -> Result<QuantParams> {
        self.resolve(self.weight_bits, self.weight_mode, sample)
    }

    /// Resolve quantization parameters for an activation tensor
    ///
    /// # Errors
    /// Propagates parameter validation failures.
    pub fn activation_params(&self, sample: &[f32]) -> Result<QuantParams> {
        self.resolve(self.activation_bits, self.activation_mode, sample)
    }

    fn resolve(&self, bits: u32, mode: QuantMode, sample: &[f32]) -> Result<QuantParams> {
        match &self.clip_init {
            ClipInit::Fixed { lower, upper } => QuantParams::new(bits, *lower, *upper, mode),
            ClipInit::Calibrate(method) => {
                let mut calibrator = ClipCalibrator::with_method(method.clone());
                calibrator.observe(sample);
                calibrator.compute().into_params(bits, mode)
            }
        }
    }
}
