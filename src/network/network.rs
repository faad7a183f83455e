use log::warn;
use rand::Rng;

use crate::{activation::activation::ActivationFunction, layers::dense::Layer};
use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::math::matrix::Matrix;

/// Intermediates of one batch forward pass, kept for backprop.
#[derive(Debug, Clone)]
pub struct ForwardPass {
    pub z1: Matrix,
    pub a1: Matrix,
    pub z2: Matrix,
    pub probs: Matrix,
}

/// Gradients for every parameter, shaped like the parameters themselves.
#[derive(Debug, Clone)]
pub struct Gradients {
    pub w1: Matrix,
    pub b1: Matrix,
    pub w2: Matrix,
    pub b2: Matrix,
}

/// Two-layer perceptron: input → hidden (ReLU) → output (Softmax).
///
/// Owns W1/B1 (in `hidden`) and W2/B2 (in `output`). Shapes are fixed at
/// construction; the optimizer mutates values in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub hidden: Layer,
    pub output: Layer,
}

impl Network {
    /// W1 is drawn before W2, both from the same `rng`.
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        rng: &mut R,
    ) -> Network {
        let hidden = Layer::new(hidden_size, input_size, ActivationFunction::ReLU, rng);
        let output = Layer::new(output_size, hidden_size, ActivationFunction::Softmax, rng);
        Network { hidden, output }
    }

    pub fn input_size(&self) -> usize {
        self.hidden.input_size()
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden.size
    }

    pub fn output_size(&self) -> usize {
        self.output.size
    }

    /// Forward pass over a batch (one sample per row). Pure.
    pub fn forward(&self, inputs: &Matrix) -> ForwardPass {
        let (z1, a1) = self.hidden.feed_from(inputs);
        let (z2, probs) = self.output.feed_from(&a1);
        ForwardPass { z1, a1, z2, probs }
    }

    /// Gradients of the mean softmax cross-entropy over the batch.
    pub fn backward(&self, inputs: &Matrix, targets: &Matrix, pass: &ForwardPass) -> Gradients {
        // Softmax + CE: ∂L/∂z2 = probs - targets; the Softmax derivative is 1.
        let error = CrossEntropyLoss::derivative(&pass.probs, targets);
        let (w2, b2, dz2) = self.output.compute_gradients(&error, &pass.z2, &pass.a1);

        let upstream = &dz2 * &self.output.weights.transpose();
        let (w1, b1, _) = self.hidden.compute_gradients(&upstream, &pass.z1, inputs);

        Gradients { w1, b1, w2, b2 }
    }

    /// Predicted class for every row.
    pub fn predict(&self, inputs: &Matrix) -> Vec<usize> {
        self.forward(inputs).z2.row_argmax()
    }

    /// Fraction in [0, 1] of rows whose predicted class equals the label.
    pub fn accuracy(&self, inputs: &Matrix, labels: &[u8]) -> f64 {
        if labels.is_empty() {
            warn!("accuracy requested on an empty set");
            return 0.0;
        }
        let correct = self.predict(inputs).iter()
            .zip(labels.iter())
            .filter(|&(&pred, &label)| pred == label as usize)
            .count();
        correct as f64 / labels.len() as f64
    }

    pub fn is_finite(&self) -> bool {
        self.hidden.weights.is_finite()
            && self.hidden.biases.is_finite()
            && self.output.weights.is_finite()
            && self.output.biases.is_finite()
    }
}
