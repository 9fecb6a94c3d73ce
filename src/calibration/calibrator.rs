//! Clip-bound calibrator implementation
//!
//! The main `ClipCalibrator` struct for collecting statistics over one or
//! more batches and choosing clip bounds for the quantizer.

use ndarray::ArrayD;

use super::helpers::rand_simple;
use super::types::{CalibrationMethod, ClipBounds};

/// Default reservoir size for percentile calibration
const DEFAULT_MAX_SAMPLES: usize = 10_000;

/// Streaming calibrator for choosing clip bounds from observed data
#[derive(Clone, Debug)]
pub struct ClipCalibrator {
    /// Calibration method
    method: CalibrationMethod,
    /// Running minimum (min-max and moving average)
    running_min: Option<f32>,
    /// Running maximum (min-max and moving average)
    running_max: Option<f32>,
    /// Collected samples (percentile)
    samples: Vec<f32>,
    /// Maximum samples to collect (percentile)
    max_samples: usize,
    /// Number of batches observed
    num_batches: usize,
}

impl ClipCalibrator {
    /// Create new calibrator with min-max method
    pub fn min_max() -> Self {
        Self::with_method(CalibrationMethod::MinMax)
    }

    /// Create new calibrator with percentile method
    ///
    /// # Arguments
    /// * `lower` - Lower percentile (e.g., 0.01 for 0.01%)
    /// * `upper` - Upper percentile (e.g., 99.99 for 99.99%)
    /// * `max_samples` - Maximum number of samples to keep in the reservoir
    pub fn percentile(lower: f32, upper: f32, max_samples: usize) -> Self {
        let mut cal = Self::with_method(CalibrationMethod::Percentile { lower, upper });
        cal.max_samples = max_samples;
        cal.samples = Vec::with_capacity(max_samples.min(DEFAULT_MAX_SAMPLES));
        cal
    }

    /// Create new calibrator with moving average method
    pub fn moving_average(momentum: f32) -> Self {
        Self::with_method(CalibrationMethod::MovingAverage { momentum })
    }

    /// Create new calibrator for the given method with default settings
    pub fn with_method(method: CalibrationMethod) -> Self {
        let max_samples = match method {
            CalibrationMethod::Percentile { .. } => DEFAULT_MAX_SAMPLES,
            _ => 0,
        };
        Self {
            method,
            running_min: None,
            running_max: None,
            samples: Vec::new(),
            max_samples,
            num_batches: 0,
        }
    }

    /// Observe a batch of data for calibration
    pub fn observe(&mut self, data: &[f32]) {
        if data.is_empty() {
            return;
        }

        match &self.method {
            CalibrationMethod::MinMax => {
                self.observe_min_max(data);
            }
            CalibrationMethod::Percentile { .. } => {
                self.observe_percentile(data);
            }
            CalibrationMethod::MovingAverage { momentum } => {
                let momentum = *momentum;
                self.observe_moving_average(data, momentum);
            }
        }

        self.num_batches += 1;
    }

    /// Observe an n-dimensional array for calibration
    pub fn observe_array(&mut self, array: &ArrayD<f32>) {
        if let Some(slice) = array.as_slice() {
            self.observe(slice);
        } else {
            let values: Vec<f32> = array.iter().copied().collect();
            self.observe(&values);
        }
    }

    /// Compute the calibrated clip bounds
    pub fn compute(&self) -> ClipBounds {
        let (lower, upper) = match &self.method {
            CalibrationMethod::MinMax | CalibrationMethod::MovingAverage { .. } => (
                self.running_min.unwrap_or(0.0),
                self.running_max.unwrap_or(0.0),
            ),
            CalibrationMethod::Percentile { lower, upper } => {
                self.compute_percentile_bounds(*lower, *upper)
            }
        };

        ClipBounds { lower, upper }
    }

    /// Get number of batches observed
    pub fn num_batches(&self) -> usize {
        self.num_batches
    }

    /// Get calibration method
    pub fn method(&self) -> &CalibrationMethod {
        &self.method
    }

    /// Check if any data has been observed
    pub fn has_data(&self) -> bool {
        self.num_batches > 0
    }

    /// Reset calibration state
    pub fn reset(&mut self) {
        self.running_min = None;
        self.running_max = None;
        self.samples.clear();
        self.num_batches = 0;
    }

    // Internal methods

    fn observe_min_max(&mut self, data: &[f32]) {
        let batch_min = data.iter().copied().fold(f32::INFINITY, f32::min);
        let batch_max = data.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        self.running_min = Some(self.running_min.map_or(batch_min, |m| m.min(batch_min)));
        self.running_max = Some(self.running_max.map_or(batch_max, |m| m.max(batch_max)));
    }

    fn observe_percentile(&mut self, data: &[f32]) {
        // Collect samples (with reservoir sampling if needed)
        if self.samples.len() < self.max_samples {
            let remaining = self.max_samples - self.samples.len();
            self.samples.extend(data.iter().take(remaining).copied());
        } else {
            // Deterministic reservoir replacement for samples beyond max_samples
            let total_seen = self.num_batches * data.len() + data.len();
            for (i, &val) in data.iter().enumerate() {
                let j = rand_simple(total_seen + i) % self.max_samples.max(1);
                if j < self.samples.len() {
                    self.samples[j] = val;
                }
            }
        }

        // Also track min/max for fallback
        self.observe_min_max(data);
    }

    fn observe_moving_average(&mut self, data: &[f32], momentum: f32) {
        let batch_min = data.iter().copied().fold(f32::INFINITY, f32::min);
        let batch_max = data.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        self.running_min = Some(
            self.running_min
                .map_or(batch_min, |m| m * (1.0 - momentum) + batch_min * momentum),
        );
        self.running_max = Some(
            self.running_max
                .map_or(batch_max, |m| m * (1.0 - momentum) + batch_max * momentum),
        );
    }

    fn compute_percentile_bounds(&self, lower: f32, upper: f32) -> (f32, f32) {
        if self.samples.is_empty() {
            return (
                self.running_min.unwrap_or(0.0),
                self.running_max.unwrap_or(0.0),
            );
        }

        let mut sorted = self.samples.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = sorted.len();
        let lower_idx = ((lower / 100.0) * n as f32) as usize;
        let upper_idx = (((upper / 100.0) * n as f32) as usize).min(n - 1);

        (sorted[lower_idx.min(n - 1)], sorted[upper_idx])
    }
}

impl Default for ClipCalibrator {
    fn default() -> Self {
        Self::min_max()
    }
}
