//! Quantized wrapper around an opaque computation layer

use ndarray::ArrayD;

use crate::quantizer::Quantizer;

/// An opaque computation layer: tensor in, tensor out
///
/// The quantizer has no awareness of what consumes its output; this
/// trait is the seam between the two. A convolution, a matmul, or any
/// other function of data and weights fits behind it.
pub trait Compute {
    /// Apply the computation to data and weights
    fn compute(&self, data: &ArrayD<f32>, weights: &ArrayD<f32>) -> ArrayD<f32>;
}

impl<F> Compute for F
where
    F: Fn(&ArrayD<f32>, &ArrayD<f32>) -> ArrayD<f32>,
{
    fn compute(&self, data: &ArrayD<f32>, weights: &ArrayD<f32>) -> ArrayD<f32> {
        self(data, weights)
    }
}

/// A computation layer with quantization applied to its inputs
///
/// Data and weights are quantized independently, with possibly different
/// parameters, before the inner computation runs. Either quantizer can
/// be omitted to leave that operand in full precision.
///
/// The numeric contract: `forward` produces exactly what calling
/// [`Quantizer::apply`] by hand on each operand and then the inner
/// computation would produce.
pub struct QuantizedLayer<C> {
    inner: C,
    weights: ArrayD<f32>,
    data_quant: Option<Quantizer>,
    weight_quant: Option<Quantizer>,
}

impl<C: Compute> QuantizedLayer<C> {
    /// Wrap a computation layer with its weights, no quantization yet
    pub fn new(inner: C, weights: ArrayD<f32>) -> Self {
        Self {
            inner,
            weights,
            data_quant: None,
            weight_quant: None,
        }
    }

    /// Quantize incoming data with the given quantizer
    #[must_use]
    pub fn with_data_quant(mut self, quantizer: Quantizer) -> Self {
        self.data_quant = Some(quantizer);
        self
    }

    /// Quantize the stored weights with the given quantizer
    #[must_use]
    pub fn with_weight_quant(mut self, quantizer: Quantizer) -> Self {
        self.weight_quant = Some(quantizer);
        self
    }

    /// The stored full-precision weights
    pub fn weights(&self) -> &ArrayD<f32> {
        &self.weights
    }

    /// Run the layer: quantize operands, then delegate to the inner compute
    pub fn forward(&self, data: &ArrayD<f32>) -> ArrayD<f32> {
        let data = match &self.data_quant {
            Some(q) => q.apply(data),
            None => data.clone(),
        };
        let weights = match &self.weight_quant {
            Some(q) => q.apply(&self.weights),
            None => self.weights.clone(),
        };
        self.inner.compute(&data, &weights)
    }
}
