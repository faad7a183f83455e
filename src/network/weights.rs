use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetError, Result};
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// On-disk form of a trained network: the four parameters, matrices
/// flattened row-major. Shapes are W1 input×hidden, W2 hidden×output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsFile {
    #[serde(rename = "W1")]
    pub w1: Vec<f64>,
    #[serde(rename = "B1")]
    pub b1: Vec<f64>,
    #[serde(rename = "W2")]
    pub w2: Vec<f64>,
    #[serde(rename = "B2")]
    pub b2: Vec<f64>,
}

impl From<&Network> for WeightsFile {
    fn from(network: &Network) -> Self {
        WeightsFile {
            w1: network.hidden.weights.flatten(),
            b1: network.hidden.biases.flatten(),
            w2: network.output.weights.flatten(),
            b2: network.output.biases.flatten(),
        }
    }
}

fn rebuild(what: &'static str, rows: usize, cols: usize, flat: &[f64]) -> Result<Matrix> {
    Matrix::from_flat(rows, cols, flat).ok_or(NetError::LengthMismatch {
        what,
        expected: rows * cols,
        got: flat.len(),
    })
}

impl TryFrom<WeightsFile> for Network {
    type Error = NetError;

    /// Hidden size comes from `B1`, output size from `B2`, input size from `W1`.
    fn try_from(file: WeightsFile) -> Result<Network> {
        let hidden = file.b1.len();
        let output = file.b2.len();
        if hidden == 0 || file.w1.len() % hidden != 0 {
            // W1 has to be a whole number of rows of width `hidden`.
            return Err(NetError::LengthMismatch {
                what: "W1",
                expected: (file.w1.len() / hidden.max(1) + 1) * hidden,
                got: file.w1.len(),
            });
        }
        let input = file.w1.len() / hidden;

        Ok(Network {
            hidden: Layer {
                size: hidden,
                weights: rebuild("W1", input, hidden, &file.w1)?,
                biases: rebuild("B1", 1, hidden, &file.b1)?,
                activator: ActivationFunction::ReLU,
            },
            output: Layer {
                size: output,
                weights: rebuild("W2", hidden, output, &file.w2)?,
                biases: rebuild("B2", 1, output, &file.b2)?,
                activator: ActivationFunction::Softmax,
            },
        })
    }
}

impl Network {
    /// Serializes the parameters to a JSON file with fields `W1`, `B1`, `W2`, `B2`.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer(&mut writer, &WeightsFile::from(self))?;
        writer.flush()?;
        info!("saved weights to {}", path.as_ref().display());
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let reader = BufReader::new(File::open(path)?);
        let file: WeightsFile = serde_json::from_reader(reader)?;
        Network::try_from(file)
    }
}
