use crate::math::matrix::Matrix;

/// Categorical cross-entropy loss for use with a Softmax output layer.
pub struct CrossEntropyLoss;

/// Small epsilon added inside log() to prevent log(0) = -inf.
const EPS: f64 = 1e-12;

impl CrossEntropyLoss {
    /// Mean cross-entropy over the batch:
    ///   L = -(1/M) · Σ_rows Σ_i expected[i] · log(predicted[i] + eps)
    ///
    /// `predicted` holds softmax probabilities, `expected` one-hot targets,
    /// both M × n_classes. Returns 0 for an empty batch.
    pub fn loss(predicted: &Matrix, expected: &Matrix) -> f64 {
        if predicted.rows == 0 {
            return 0.0;
        }
        let total: f64 = predicted.data.iter().zip(expected.data.iter())
            .map(|(p_row, e_row)| {
                p_row.iter().zip(e_row.iter())
                    .map(|(p, e)| -e * (p + EPS).ln())
                    .sum::<f64>()
            })
            .sum();
        total / predicted.rows as f64
    }

    /// Gradient of the combined Softmax + cross-entropy w.r.t. the logits,
    /// per sample: `predicted - expected`. Averaging over the batch is left
    /// to the layer that turns this into parameter gradients.
    pub fn derivative(predicted: &Matrix, expected: &Matrix) -> Matrix {
        predicted.clone() - expected.clone()
    }
}
