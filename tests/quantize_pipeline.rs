//! End-to-end test of the public quantization API:
//! calibrate clip bounds, build parameters, quantize, compose with a
//! downstream computation.

use approx::assert_abs_diff_eq;
use cuantizar::{
    calibrate_min_max, quantize, ClipCalibrator, QuantConfig, QuantMode, QuantizedLayer, Quantizer,
};
use ndarray::{arr1, ArrayD};

fn dyn1(values: &[f32]) -> ArrayD<f32> {
    arr1(values).into_dyn()
}

#[test]
fn calibrated_quantization_stays_within_observed_range() {
    let batches = [
        vec![0.1f32, -0.8, 2.3, 1.1],
        vec![-1.9f32, 0.4, 0.0, 2.9],
        vec![0.7f32, -2.1, 1.6, -0.3],
    ];

    let mut calibrator = ClipCalibrator::min_max();
    for batch in &batches {
        calibrator.observe(batch);
    }
    let params = calibrator
        .compute()
        .into_params(8, QuantMode::Asymmetric)
        .unwrap();

    assert_abs_diff_eq!(params.clip_lower(), -2.1, epsilon = 1e-6);
    assert_abs_diff_eq!(params.clip_upper(), 2.9, epsilon = 1e-6);

    let quantizer = Quantizer::new(params);
    for batch in &batches {
        for &value in quantizer.apply_slice(batch).iter() {
            assert!(value >= -2.1 && value <= 2.9);
        }
    }
}

#[test]
fn config_driven_layer_matches_manual_pipeline() {
    let weights = dyn1(&[0.9, -0.3, 0.5]);
    let activations = dyn1(&[1.4, -2.2, 0.6]);

    let config = QuantConfig::default();
    let weight_sample: Vec<f32> = weights.iter().copied().collect();
    let act_sample: Vec<f32> = activations.iter().copied().collect();

    let weight_quant = Quantizer::new(config.weight_params(&weight_sample).unwrap());
    let data_quant = Quantizer::new(config.activation_params(&act_sample).unwrap());

    let dot = |d: &ArrayD<f32>, w: &ArrayD<f32>| {
        dyn1(&[d.iter().zip(w.iter()).map(|(a, b)| a * b).sum()])
    };

    let layer = QuantizedLayer::new(dot, weights.clone())
        .with_data_quant(data_quant)
        .with_weight_quant(weight_quant);

    let via_layer = layer.forward(&activations);
    let by_hand = dot(
        &data_quant.apply(&activations),
        &weight_quant.apply(&weights),
    );

    assert_eq!(via_layer[0], by_hand[0]);
}

#[test]
fn quantization_error_shrinks_with_bit_width() {
    let data: Vec<f32> = (0..64).map(|i| (i as f32 * 0.37).sin() * 2.0).collect();
    let input = dyn1(&data);
    let bounds = calibrate_min_max(&data);

    let mut previous_error = f32::INFINITY;
    for bits in [2u32, 4, 6, 8] {
        let output = quantize(&input, bits, bounds.lower, bounds.upper, QuantMode::Asymmetric)
            .unwrap();
        let error: f32 = data
            .iter()
            .zip(output.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        assert!(
            error <= previous_error,
            "{bits}-bit error {error} should not exceed previous {previous_error}"
        );
        previous_error = error;
    }
}
