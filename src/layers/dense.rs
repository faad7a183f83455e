use rand::Rng;

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// A fully connected layer: `a = activation(x · weights + biases)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer{
    pub size: usize,
    pub weights: Matrix,  // input_size × size
    pub biases: Matrix,   // 1 × size
    pub activator: ActivationFunction
}

impl Layer {
    /// He-initialized weights drawn from `rng`, zero biases.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        Layer {
            size,
            weights: Matrix::he(input_size, size, rng),
            biases: Matrix::zeros(1, size),
            activator: activation
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Batch forward pass. Returns `(z, a)`: the pre-activation and the activation.
    pub fn feed_from(&self, inputs: &Matrix) -> (Matrix, Matrix) {
        let z = (inputs * &self.weights).add_row(&self.biases);
        let a = self.activator.apply(&z);
        (z, a)
    }

    /// Computes batch-averaged gradients. Returns `(weights_grad, biases_grad, delta)`.
    ///
    /// `upstream` is ∂L/∂a for this layer (M × size), `pre_activation` the `z`
    /// from `feed_from`, `inputs` the layer input. `delta` is ∂L/∂z, which the
    /// caller propagates to the previous layer.
    pub fn compute_gradients(
        &self,
        upstream: &Matrix,
        pre_activation: &Matrix,
        inputs: &Matrix,
    ) -> (Matrix, Matrix, Matrix) {
        let batch = inputs.rows.max(1) as f64;
        // δ = upstream ⊙ σ'(z)
        let delta = upstream.hadamard(&self.activator.derivative_mask(pre_activation));

        let weights_grad = (&inputs.transpose() * &delta).map(|x| x / batch);
        let biases_grad = delta.column_sums().map(|x| x / batch);

        (weights_grad, biases_grad, delta)
    }

    /// Applies pre-computed gradients scaled by lr, in place.
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, biases_grad: &Matrix, lr: f64) {
        descend(&mut self.weights, weights_grad, lr);
        descend(&mut self.biases, biases_grad, lr);
    }
}

fn descend(param: &mut Matrix, grad: &Matrix, lr: f64) {
    for (row, grad_row) in param.data.iter_mut().zip(grad.data.iter()) {
        for (p, g) in row.iter_mut().zip(grad_row.iter()) {
            *p -= lr * g;
        }
    }
}
