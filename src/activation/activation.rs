use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    ReLU,
    /// Softmax is a vector-valued activation; it is applied row by row in
    /// `apply()`. The element-wise `function()` is not defined for it.
    Softmax,
}

impl ActivationFunction {
    /// Element-wise activation. Panics for `Softmax`, use `apply()`.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Softmax => {
                panic!("ActivationFunction::Softmax::function() must not be called directly; \
                        use apply() which normalizes whole rows.")
            }
        }
    }

    /// Element-wise derivative with respect to the pre-activation.
    ///
    /// ReLU gives the 0/1 mask with `x == 0.0` mapped to 0. For `Softmax` the
    /// loss is always cross-entropy and the combined gradient `probs - targets`
    /// already accounts for the Jacobian, so this returns `1.0`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Softmax => 1.0,
        }
    }

    /// Applies the activation to a whole batch (one sample per row).
    pub fn apply(&self, z: &Matrix) -> Matrix {
        match self {
            ActivationFunction::Softmax => softmax_rows(z),
            _ => z.map(|x| self.function(x)),
        }
    }

    /// Derivative evaluated at every entry of `z`.
    pub fn derivative_mask(&self, z: &Matrix) -> Matrix {
        z.map(|x| self.derivative(x))
    }
}

/// Row-wise softmax. Each row has its maximum subtracted before
/// exponentiation, so large logits cannot overflow.
pub fn softmax_rows(z: &Matrix) -> Matrix {
    let data = z.data.iter()
        .map(|row| {
            let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let exps: Vec<f64> = row.iter().map(|&x| (x - max).exp()).collect();
            let sum: f64 = exps.iter().sum();
            exps.into_iter().map(|e| e / sum).collect()
        })
        .collect();
    Matrix { rows: z.rows, cols: z.cols, data }
}
