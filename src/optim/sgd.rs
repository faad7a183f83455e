use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;
use crate::network::network::{Gradients, Network};

/// Plain gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

fn check(what: &'static str, param: &Matrix, grad: &Matrix) -> Result<()> {
    if param.shape() != grad.shape() {
        return Err(NetError::ShapeMismatch { what, expected: param.shape(), got: grad.shape() });
    }
    Ok(())
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// `param -= learning_rate * grad` for all four parameters.
    ///
    /// Every shape is checked before anything is written, so a mismatch
    /// leaves the network untouched.
    pub fn step(&self, network: &mut Network, grads: &Gradients) -> Result<()> {
        check("W1", &network.hidden.weights, &grads.w1)?;
        check("B1", &network.hidden.biases, &grads.b1)?;
        check("W2", &network.output.weights, &grads.w2)?;
        check("B2", &network.output.biases, &grads.b2)?;

        network.hidden.apply_gradients(&grads.w1, &grads.b1, self.learning_rate);
        network.output.apply_gradients(&grads.w2, &grads.b2, self.learning_rate);
        Ok(())
    }
}
