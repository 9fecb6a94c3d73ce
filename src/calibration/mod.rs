//! Clip-bound calibration for post-training quantization
//!
//! The quantizer takes explicit clip bounds; this module chooses them
//! from observed data. Methods: min-max, percentile (robust to
//! outliers), and moving average over batches.

mod calibrator;
mod helpers;
mod types;


pub use calibrator::ClipCalibrator;
pub use helpers::{calibrate_min_max, calibrate_percentile};
pub use types::{CalibrationMethod, ClipBounds};
