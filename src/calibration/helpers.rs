//! Helper functions for calibration

use super::calibrator::ClipCalibrator;
use super::types::ClipBounds;

/// Simple deterministic pseudo-random for reservoir sampling
pub(crate) fn rand_simple(seed: usize) -> usize {
    // Simple LCG-based PRNG
    let a: usize = 1103515245;
    let c: usize = 12345;
    let m: usize = 1 << 31;
    (a.wrapping_mul(seed).wrapping_add(c)) % m
}

/// Convenience function for min-max calibration
pub fn calibrate_min_max(data: &[f32]) -> ClipBounds {
    let mut calibrator = ClipCalibrator::min_max();
    calibrator.observe(data);
    calibrator.compute()
}

/// Convenience function for percentile calibration
pub fn calibrate_percentile(data: &[f32], lower: f32, upper: f32) -> ClipBounds {
    let mut calibrator = ClipCalibrator::percentile(lower, upper, data.len().max(1));
    calibrator.observe(data);
    calibrator.compute()
}
